//! bn_store — the BlackNote encrypted record store.
//!
//! Keeps one opaque envelope per note identifier on top of the
//! `bn_crypto` pipeline. Only ciphertext and trusted metadata (id,
//! timestamps) are ever persisted; titles, bodies, and tags exist in
//! plaintext only inside a live [`models::Note`].
//!
//! # Module layout
//! - `models`  — Note, EncryptedNote, NoteMetadata, Backup wire types
//! - `storage` — persistence backends (file-backed, in-memory)
//! - `store`   — NoteStore: CRUD, metadata listing, backup export/import
//! - `error`   — unified error type

pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use error::StoreError;
pub use models::{Backup, EncryptedNote, Note, NoteMetadata};
pub use store::NoteStore;

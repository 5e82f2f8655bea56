//! bn_crypto — the BlackNote "Double Lock & Obfuscate" encryption pipeline
//!
//! Plaintext is protected at rest by four layered stages, each keyed
//! independently from the user password:
//!
//! ```text
//! plaintext
//!   → ChaCha20 stream cipher        (key1 = PBKDF2(password, salt1, "CHACHA20"))
//!   → HMAC-SHA256 over ciphertext   (key3 = PBKDF2(password, salt1, "INTEGRITY"))
//!   → glyph obfuscation of the hex  (seeded, reversible, zero security margin)
//!   → AES-256-GCM outer wrap        (key2 = PBKDF2(password, salt2, "AES-GCM"))
//!   → JSON envelope string
//! ```
//!
//! Decryption reverses each stage and fails closed at the first integrity
//! violation. A wrong password and tampered data are deliberately
//! indistinguishable (both surface as [`CryptoError::Authentication`]);
//! anything else would hand an attacker a password-verification oracle.
//!
//! # Module layout
//! - `chacha20`  — hand-rolled ChaCha20 stream cipher core
//! - `kdf`       — PBKDF2-HMAC-SHA256 with purpose-label domain separation
//! - `obfuscate` — seeded glyph-insertion scrambler (obscurity, not crypto)
//! - `mac`       — HMAC-SHA256 integrity tags
//! - `aead`      — AES-256-GCM outer authenticated encryption
//! - `envelope`  — JSON envelope codec
//! - `pipeline`  — `encrypt` / `decrypt` composing the stages
//! - `error`     — unified error type
//!
//! Every function here is pure given its explicit inputs; there is no
//! shared mutable state and no I/O.

pub mod aead;
pub mod chacha20;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod mac;
pub mod obfuscate;
pub mod pipeline;

pub use envelope::ParseError;
pub use error::CryptoError;
pub use pipeline::{decrypt, encrypt};

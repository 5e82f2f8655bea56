//! The encrypted record store.
//!
//! Every operation is a load-mutate-save over the single backing
//! collection, serialized by one mutex: two concurrent `put`s to the same
//! id cannot interleave their read-modify-write (last full snapshot
//! wins). Key derivation and encryption run *outside* the lock — they are
//! the expensive part and touch no shared state.

use parking_lot::Mutex;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{Backup, EncryptedNote, Note, NoteMetadata, NotePayload};
use crate::storage::{FileStorage, MemoryStorage, StorageBackend};

/// Backup format version written on export.
pub const BACKUP_VERSION: &str = "1.0.0";

pub struct NoteStore {
    backend: Mutex<Box<dyn StorageBackend>>,
}

impl NoteStore {
    /// Open a file-backed store at `path` (created on first save).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(Box::new(FileStorage::new(path)))
    }

    /// Ephemeral in-memory store.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryStorage::new()))
    }

    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend: Mutex::new(backend),
        }
    }

    fn load_collection(backend: &dyn StorageBackend) -> Result<Vec<EncryptedNote>, StoreError> {
        match backend.load()? {
            Some(serialized) => Ok(serde_json::from_str(&serialized)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_collection(
        backend: &mut dyn StorageBackend,
        notes: &[EncryptedNote],
    ) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(notes)?;
        backend.save(&serialized)
    }

    /// Encrypt and upsert `note`. The full note is always re-encrypted
    /// under freshly drawn salts/nonces/seed, even for an edit of an
    /// existing id.
    pub fn put(&self, note: &Note, password: &str) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&NotePayload {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
        })?;
        let encrypted_data = bn_crypto::encrypt(&payload, password)?;
        let record = EncryptedNote {
            id: note.id.clone(),
            encrypted_data,
            created_at: note.created_at,
            updated_at: note.updated_at,
        };

        let mut backend = self.backend.lock();
        let mut notes = Self::load_collection(backend.as_ref())?;
        match notes.iter_mut().find(|n| n.id == record.id) {
            Some(existing) => *existing = record,
            None => notes.push(record),
        }
        Self::save_collection(backend.as_mut(), &notes)?;
        debug!(id = %note.id, "note stored");
        Ok(())
    }

    /// Fetch and decrypt the note with `id`.
    pub fn get(&self, id: &str, password: &str) -> Result<Note, StoreError> {
        let record = {
            let backend = self.backend.lock();
            Self::load_collection(backend.as_ref())?
                .into_iter()
                .find(|n| n.id == id)
        }
        .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;

        let payload_json = bn_crypto::decrypt(&record.encrypted_data, password).map_err(|e| {
            if e.is_authentication() {
                warn!(%id, "decrypt failed — wrong password or tampered envelope");
            }
            e
        })?;
        let payload: NotePayload = serde_json::from_str(&payload_json)?;

        Ok(Note {
            id: record.id,
            title: payload.title,
            content: payload.content,
            tags: payload.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Remove the note with `id` entirely (no tombstone).
    /// Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut backend = self.backend.lock();
        let mut notes = Self::load_collection(backend.as_ref())?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        Self::save_collection(backend.as_mut(), &notes)?;
        debug!(%id, "note deleted");
        Ok(true)
    }

    /// Unencrypted metadata for every stored note. No password required;
    /// exposes nothing but ids and timestamps.
    pub fn list_metadata(&self) -> Result<Vec<NoteMetadata>, StoreError> {
        let backend = self.backend.lock();
        Ok(Self::load_collection(backend.as_ref())?
            .into_iter()
            .map(|n| NoteMetadata {
                id: n.id,
                created_at: n.created_at,
                updated_at: n.updated_at,
            })
            .collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let backend = self.backend.lock();
        Ok(Self::load_collection(backend.as_ref())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Export the full collection as a backup document.
    pub fn export(&self) -> Result<Backup, StoreError> {
        let backend = self.backend.lock();
        Ok(Backup {
            version: BACKUP_VERSION.to_owned(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            notes: Self::load_collection(backend.as_ref())?,
        })
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.export()?)?)
    }

    /// Merge a backup into the collection, last-writer-wins per id: an
    /// incoming record is kept iff its id is new or its `updated_at` is
    /// strictly greater than the stored one's. The merge keys on the
    /// unencrypted timestamp — trusted metadata even though the content
    /// is opaque. All-or-nothing: either the merged collection is saved
    /// or nothing changes.
    ///
    /// Returns the number of records added or replaced.
    pub fn import(&self, backup: Backup) -> Result<usize, StoreError> {
        let mut backend = self.backend.lock();
        let mut notes = Self::load_collection(backend.as_ref())?;
        let mut applied = 0usize;
        for incoming in backup.notes {
            match notes.iter_mut().find(|n| n.id == incoming.id) {
                Some(existing) if incoming.updated_at > existing.updated_at => {
                    *existing = incoming;
                    applied += 1;
                }
                Some(_) => {}
                None => {
                    notes.push(incoming);
                    applied += 1;
                }
            }
        }
        if applied > 0 {
            Self::save_collection(backend.as_mut(), &notes)?;
        }
        debug!(applied, total = notes.len(), "backup imported");
        Ok(applied)
    }

    /// Parse and import a backup JSON document. A document missing
    /// `version` or `notes` (or with an empty version) is rejected whole;
    /// no partial merge is applied.
    pub fn import_json(&self, json: &str) -> Result<usize, StoreError> {
        let backup: Backup =
            serde_json::from_str(json).map_err(|e| StoreError::ImportFormat(e.to_string()))?;
        if backup.version.is_empty() {
            return Err(StoreError::ImportFormat("empty version field".into()));
        }
        self.import(backup)
    }

    /// Wipe the entire collection.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut backend = self.backend.lock();
        Self::save_collection(backend.as_mut(), &[])?;
        debug!("store cleared");
        Ok(())
    }
}

//! Persistence backends for the encrypted-note collection.
//!
//! The whole collection is one serialized JSON array, loaded and saved
//! atomically. Backends never interpret the payload; the store above them
//! owns serialization and locking.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

pub trait StorageBackend: Send {
    /// Load the serialized collection. `None` means "never saved yet",
    /// which is distinct from an unreadable backend (an error).
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the serialized collection. Must be all-or-nothing: on
    /// failure the previous contents stay intact.
    fn save(&mut self, serialized: &str) -> Result<(), StoreError>;
}

/// File-backed storage. Saves write a sibling temp file and rename it over
/// the target, so a crash or full disk never leaves a half-written
/// collection behind.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for FileStorage {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Storage(e)),
        }
    }

    fn save(&mut self, serialized: &str) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(serialized.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Storage(e.error))?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    data: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, serialized: &str) -> Result<(), StoreError> {
        self.data = Some(serialized.to_owned());
        Ok(())
    }
}

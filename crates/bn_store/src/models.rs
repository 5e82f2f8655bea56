//! Wire and in-memory types for the note store.
//!
//! `EncryptedNote` and `Backup` are persisted formats and must stay
//! stable: camelCase field names, millisecond epoch timestamps.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A plaintext note. Never persisted directly — `put` serializes
/// title/content/tags together and encrypts the result.
///
/// Invariant: `updated_at >= created_at` (caller-maintained; use
/// [`Note::touch`] when editing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Milliseconds since epoch.
    pub created_at: i64,
    /// Milliseconds since epoch.
    pub updated_at: i64,
}

impl Note {
    /// Create a note with a fresh UUID and both timestamps set to now.
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at` to now. Call before re-saving an edited note.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().timestamp_millis();
    }
}

/// What actually gets encrypted: title, body, and tags serialized together.
/// Timestamps stay outside as trusted metadata.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NotePayload {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// One persisted record: an opaque envelope string plus unencrypted
/// metadata. The store owns all of these exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedNote {
    pub id: String,
    /// Opaque `bn_crypto` envelope string.
    pub encrypted_data: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Metadata-only view. Requires no password and exposes no plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    pub id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Exported backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub version: String,
    /// Export time, milliseconds since epoch. Optional on import — only
    /// `version` and `notes` are validated.
    #[serde(default)]
    pub timestamp: i64,
    pub notes: Vec<EncryptedNote>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_has_equal_timestamps_and_unique_id() {
        let a = Note::new("t", "c", vec![]);
        let b = Note::new("t", "c", vec![]);
        assert_eq!(a.created_at, a.updated_at);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn touch_never_goes_backwards() {
        let mut note = Note::new("t", "c", vec![]);
        let created = note.created_at;
        note.touch();
        assert!(note.updated_at >= created);
    }

    #[test]
    fn encrypted_note_wire_field_names() {
        let record = EncryptedNote {
            id: "n1".into(),
            encrypted_data: "{}".into(),
            created_at: 1,
            updated_at: 2,
        };
        let json = serde_json::to_value(&record).unwrap();
        for field in ["id", "encryptedData", "createdAt", "updatedAt"] {
            assert!(json.get(field).is_some(), "missing wire field {field}");
        }
    }

    #[test]
    fn backup_tolerates_missing_timestamp() {
        let backup: Backup =
            serde_json::from_str(r#"{"version":"1.0.0","notes":[]}"#).unwrap();
        assert_eq!(backup.timestamp, 0);
    }
}

use thiserror::Error;

use crate::envelope::ParseError;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Envelope structure is malformed. Distinct from authentication
    /// failure: the record could not even be read, so nothing was verified.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Outer AEAD tag or inner HMAC mismatch. Wrong password and tampered
    /// data are intentionally not distinguished.
    #[error("authentication failed — wrong password or tampered data")]
    Authentication,

    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    Seal,

    /// Structural damage found *after* the outer AEAD authenticated, e.g.
    /// a non-UTF-8 payload or an obfuscation-rule mismatch. Unreachable
    /// for envelopes produced by [`crate::encrypt`]; exists so no stage
    /// ever returns best-effort output.
    #[error("decrypted payload corrupt: {0}")]
    Corrupt(String),
}

impl CryptoError {
    /// True when the failure means "wrong password or tampering" as opposed
    /// to a malformed record.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }
}

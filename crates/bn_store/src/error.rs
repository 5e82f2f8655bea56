use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("crypto error: {0}")]
    Crypto(#[from] bn_crypto::CryptoError),

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("storage backend failure: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error("invalid backup format: {0}")]
    ImportFormat(String),
}

impl StoreError {
    /// True when the underlying cause is a wrong password or tampered
    /// envelope (as opposed to a missing note or a broken backend).
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Crypto(e) if e.is_authentication())
    }
}

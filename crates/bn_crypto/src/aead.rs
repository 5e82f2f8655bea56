//! Outer AEAD wrap — AES-256-GCM over the obfuscated blob.
//!
//! Key: 32 bytes (`kdf::PURPOSE_OUTER`, salt2). Nonce: 12 random bytes,
//! drawn fresh per encryption by the caller and stored as its own envelope
//! field (so unlike a nonce-prefixed wire format, it is passed in
//! explicitly here). Output is ciphertext || 16-byte tag.
//!
//! A tag mismatch on [`open`] surfaces as a typed authentication failure,
//! never as garbage plaintext.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};

use crate::error::CryptoError;

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Encrypt and authenticate `plaintext`.
pub fn seal(
    key: &[u8; 32],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| CryptoError::Seal)
}

/// Decrypt and verify `ciphertext` (ct || tag).
pub fn open(
    key: &[u8; 32],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Authentication)
}

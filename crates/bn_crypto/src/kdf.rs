//! Key derivation — PBKDF2-HMAC-SHA256 with purpose-label domain separation.
//!
//! The purpose label is appended to the password *before* derivation, so
//! one password+salt pair yields unrelated keys per pipeline stage. The
//! labels (and the iteration count) are wire-format constants: changing
//! any of them silently invalidates every stored envelope.
//!
//! No caching: every encrypt/decrypt re-derives its keys from scratch.
//! That is a deliberate latency-for-security tradeoff — do not add a key
//! cache without thinking through staleness and side channels.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// PBKDF2 iteration count. Wire constant.
pub const ITERATIONS: u32 = 100_000;

/// Inner stream-cipher key (derived from salt1).
pub const PURPOSE_STREAM: &str = "CHACHA20";
/// Outer AEAD key (derived from salt2).
pub const PURPOSE_OUTER: &str = "AES-GCM";
/// Integrity (HMAC) key (derived from salt1 — same salt as the stream key,
/// separated only by the label).
pub const PURPOSE_INTEGRITY: &str = "INTEGRITY";

/// 32-byte derived key. Zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey([u8; 32]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Derive a 256-bit key from `password || purpose` and `salt`.
pub fn derive(password: &str, salt: &[u8], purpose: &str) -> DerivedKey {
    let material = Zeroizing::new(format!("{password}{purpose}").into_bytes());
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(&material, salt, ITERATIONS, &mut key);
    DerivedKey(key)
}

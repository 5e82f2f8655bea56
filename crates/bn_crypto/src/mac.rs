//! Integrity layer — HMAC-SHA256 over the raw inner ciphertext.
//!
//! Keyed by its own derivation (`kdf::PURPOSE_INTEGRITY`, salt1), so the
//! tag is independent of the outer AEAD. Verification must run, and fail,
//! before the inner ciphertext is trusted for final decryption.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const TAG_LEN: usize = 32;

/// Compute the HMAC-SHA256 tag of `data`.
pub fn tag(data: &[u8], key: &[u8; 32]) -> [u8; TAG_LEN] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Constant-time verification of `expected` against the recomputed tag.
pub fn verify(data: &[u8], key: &[u8; 32], expected: &[u8]) -> bool {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.verify_slice(expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_verifies() {
        let key = [0x11u8; 32];
        let data = b"inner ciphertext";
        let t = tag(data, &key);
        assert!(verify(data, &key, &t));
    }

    #[test]
    fn modified_data_fails() {
        let key = [0x11u8; 32];
        let t = tag(b"inner ciphertext", &key);
        assert!(!verify(b"inner ciphertexT", &key, &t));
    }

    #[test]
    fn wrong_key_fails() {
        let t = tag(b"data", &[0x11u8; 32]);
        assert!(!verify(b"data", &[0x22u8; 32], &t));
    }

    #[test]
    fn truncated_tag_fails() {
        let key = [0x11u8; 32];
        let t = tag(b"data", &key);
        assert!(!verify(b"data", &key, &t[..16]));
    }
}

//! The Double Lock & Obfuscate pipeline — composes the stages into the two
//! operations the outside world sees.
//!
//! Every call to [`encrypt`] draws completely fresh salts, nonces, and
//! obfuscation seed from the OS RNG; cryptographic material is never
//! reused across saves, even when re-encrypting the same note.
//! [`decrypt`] reverses the stages and fails closed at the first
//! violation.

use rand::{rngs::OsRng, RngCore};

use crate::envelope::{self, Envelope, SALT_LEN, SEED_LEN};
use crate::error::CryptoError;
use crate::{aead, chacha20, kdf, mac, obfuscate};

/// Encrypt `plaintext` under `password`, returning the envelope string.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String, CryptoError> {
    let mut salt1 = [0u8; SALT_LEN];
    let mut salt2 = [0u8; SALT_LEN];
    let mut seed_bytes = [0u8; SEED_LEN];
    let mut inner_nonce = [0u8; chacha20::NONCE_LEN];
    let mut outer_nonce = [0u8; aead::NONCE_LEN];
    OsRng.fill_bytes(&mut salt1);
    OsRng.fill_bytes(&mut salt2);
    OsRng.fill_bytes(&mut seed_bytes);
    OsRng.fill_bytes(&mut inner_nonce);
    OsRng.fill_bytes(&mut outer_nonce);
    let seed = hex::encode(seed_bytes);

    let stream_key = kdf::derive(password, &salt1, kdf::PURPOSE_STREAM);
    let outer_key = kdf::derive(password, &salt2, kdf::PURPOSE_OUTER);
    let mac_key = kdf::derive(password, &salt1, kdf::PURPOSE_INTEGRITY);

    let inner_ciphertext = chacha20::apply(plaintext.as_bytes(), stream_key.as_bytes(), &inner_nonce);
    let tag = mac::tag(&inner_ciphertext, mac_key.as_bytes());
    let obfuscated = obfuscate::obfuscate(&inner_ciphertext, &seed);
    let outer_ciphertext = aead::seal(outer_key.as_bytes(), &outer_nonce, obfuscated.as_bytes())?;

    Ok(envelope::encode(&Envelope {
        salt1,
        salt2,
        obfuscation_seed: seed,
        hmac: tag,
        inner_nonce,
        outer_nonce,
        outer_ciphertext,
    }))
}

/// Decrypt an envelope string under `password`.
///
/// Order matters: outer AEAD first (auth failure on mismatch), then
/// de-obfuscation, then the inner HMAC *before* the inner ciphertext is
/// trusted for the final stream-cipher pass.
pub fn decrypt(envelope_str: &str, password: &str) -> Result<String, CryptoError> {
    let env = envelope::decode(envelope_str)?;

    let stream_key = kdf::derive(password, &env.salt1, kdf::PURPOSE_STREAM);
    let outer_key = kdf::derive(password, &env.salt2, kdf::PURPOSE_OUTER);
    let mac_key = kdf::derive(password, &env.salt1, kdf::PURPOSE_INTEGRITY);

    let obfuscated_bytes = aead::open(outer_key.as_bytes(), &env.outer_nonce, &env.outer_ciphertext)?;
    let obfuscated = std::str::from_utf8(&obfuscated_bytes)
        .map_err(|_| CryptoError::Corrupt("obfuscated payload is not UTF-8".into()))?;
    let inner_ciphertext = obfuscate::deobfuscate(obfuscated, &env.obfuscation_seed)?;

    if !mac::verify(&inner_ciphertext, mac_key.as_bytes(), &env.hmac) {
        return Err(CryptoError::Authentication);
    }

    let plaintext = chacha20::apply(&inner_ciphertext, stream_key.as_bytes(), &env.inner_nonce);
    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Corrupt("plaintext is not UTF-8".into()))
}

//! Envelope codec — the serialized record holding everything needed to
//! decrypt a note given the password.
//!
//! Wire format (stable across versions): a JSON object with string fields
//!
//! ```json
//! {
//!   "salt1": "<32 bytes hex>",
//!   "salt2": "<32 bytes hex>",
//!   "obfuscationSeed": "<16 bytes hex>",
//!   "hmac": "<32-byte tag hex>",
//!   "ciphertext": "<innerNonce hex>|<outerNonce hex>|<outerCiphertext+tag hex>"
//! }
//! ```
//!
//! Decode is strict: a missing field, non-hex content, a wrong-length
//! field, or a ciphertext without exactly three `|` parts is a hard
//! [`ParseError`] — never a silent default. Parse failures are a distinct
//! error class from authentication failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{aead, chacha20, mac};

/// Random salt length (bytes) for both key-derivation salts.
pub const SALT_LEN: usize = 32;
/// Random bytes behind the hex obfuscation seed.
pub const SEED_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("envelope is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field `{field}` is not valid hex")]
    BadHex { field: &'static str },

    #[error("field `{field}` has {got} bytes, expected {expected}")]
    BadLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("ciphertext must have exactly 3 `|`-separated parts, found {0}")]
    CiphertextParts(usize),
}

/// The JSON shape as persisted. Unknown fields are tolerated (matching
/// lenient JSON parsers elsewhere); missing ones are not.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeWire {
    salt1: String,
    salt2: String,
    obfuscation_seed: String,
    hmac: String,
    ciphertext: String,
}

/// A fully decoded, validated envelope.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Binds the stream-cipher and integrity keys.
    pub salt1: [u8; SALT_LEN],
    /// Binds the outer-cipher key.
    pub salt2: [u8; SALT_LEN],
    /// Hex string driving the obfuscation transform (kept as the literal
    /// seed characters, which is what the transform consumes).
    pub obfuscation_seed: String,
    /// HMAC-SHA256 tag over the inner ciphertext.
    pub hmac: [u8; mac::TAG_LEN],
    /// Stream-cipher nonce.
    pub inner_nonce: [u8; chacha20::NONCE_LEN],
    /// Outer AEAD nonce.
    pub outer_nonce: [u8; aead::NONCE_LEN],
    /// Outer ciphertext including the 16-byte GCM tag.
    pub outer_ciphertext: Vec<u8>,
}

/// Serialize an envelope to its wire string.
pub fn encode(envelope: &Envelope) -> String {
    let wire = EnvelopeWire {
        salt1: hex::encode(envelope.salt1),
        salt2: hex::encode(envelope.salt2),
        obfuscation_seed: envelope.obfuscation_seed.clone(),
        hmac: hex::encode(envelope.hmac),
        ciphertext: format!(
            "{}|{}|{}",
            hex::encode(envelope.inner_nonce),
            hex::encode(envelope.outer_nonce),
            hex::encode(&envelope.outer_ciphertext),
        ),
    };
    serde_json::to_string(&wire).expect("envelope wire struct always serialises")
}

fn hex_array<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], ParseError> {
    let bytes = hex::decode(value).map_err(|_| ParseError::BadHex { field })?;
    bytes.try_into().map_err(|bytes: Vec<u8>| ParseError::BadLength {
        field,
        expected: N,
        got: bytes.len(),
    })
}

/// Parse and validate a wire string.
pub fn decode(data: &str) -> Result<Envelope, ParseError> {
    let wire: EnvelopeWire = serde_json::from_str(data)?;

    let salt1 = hex_array::<SALT_LEN>("salt1", &wire.salt1)?;
    let salt2 = hex_array::<SALT_LEN>("salt2", &wire.salt2)?;

    // The seed is consumed as characters, but it must still be well-formed
    // hex of the right width.
    let seed_bytes = hex::decode(&wire.obfuscation_seed)
        .map_err(|_| ParseError::BadHex { field: "obfuscationSeed" })?;
    if seed_bytes.len() != SEED_LEN {
        return Err(ParseError::BadLength {
            field: "obfuscationSeed",
            expected: SEED_LEN,
            got: seed_bytes.len(),
        });
    }

    let hmac = hex_array::<{ mac::TAG_LEN }>("hmac", &wire.hmac)?;

    let parts: Vec<&str> = wire.ciphertext.split('|').collect();
    if parts.len() != 3 {
        return Err(ParseError::CiphertextParts(parts.len()));
    }
    let inner_nonce = hex_array::<{ chacha20::NONCE_LEN }>("ciphertext[0]", parts[0])?;
    let outer_nonce = hex_array::<{ aead::NONCE_LEN }>("ciphertext[1]", parts[1])?;
    let outer_ciphertext =
        hex::decode(parts[2]).map_err(|_| ParseError::BadHex { field: "ciphertext[2]" })?;

    Ok(Envelope {
        salt1,
        salt2,
        obfuscation_seed: wire.obfuscation_seed,
        hmac,
        inner_nonce,
        outer_nonce,
        outer_ciphertext,
    })
}

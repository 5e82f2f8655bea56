//! Seeded glyph-insertion scrambler over the hex rendering of cipher output.
//!
//! This is obscurity layering, NOT cryptography: it contributes zero
//! security margin and must be treated as such in any threat-model
//! reasoning. Its only load-bearing property is exact reversibility for a
//! given seed.
//!
//! The seed is an ASCII hex string (16 random bytes, hex-encoded, stored
//! in the envelope). After the hex character at index `i`,
//! `(seed_byte(i % seed_len) + i) % 7 == 0` decides whether a glyph from a
//! fixed 10-symbol alphabet is spliced in; the glyph itself is
//! `GLYPHS[seed_byte % 10]`. The alphabet is currency-style symbols chosen
//! to be disjoint from hex digits — that disjointness is what keeps
//! decoding unambiguous, so never add a hex digit to it.

use crate::error::CryptoError;

/// Fixed insertion alphabet. Wire constant, disjoint from `[0-9a-f]`.
pub const GLYPHS: [char; 10] = ['§', '¢', '€', '¥', '£', '₹', '₽', '₩', '₪', '₫'];

/// Hex-encode `data` and splice in seed-driven glyphs.
///
/// An empty seed disables insertion entirely (plain lowercase hex out).
pub fn obfuscate(data: &[u8], seed: &str) -> String {
    let hex = hex::encode(data);
    let seed_bytes = seed.as_bytes();
    if seed_bytes.is_empty() {
        return hex;
    }

    let mut out = String::with_capacity(hex.len() * 2);
    for (i, ch) in hex.chars().enumerate() {
        out.push(ch);
        let seed_byte = seed_bytes[i % seed_bytes.len()] as usize;
        if (seed_byte + i) % 7 == 0 {
            out.push(GLYPHS[seed_byte % GLYPHS.len()]);
        }
    }
    out
}

/// Invert [`obfuscate`]: strip the glyphs and hex-decode what remains.
///
/// The insertion rule is recomputed while scanning, so a glyph where none
/// was inserted, a missing glyph where one was, or any character outside
/// hex-plus-alphabet rejects the input. All of these are unreachable when
/// the outer AEAD has already authenticated the blob, hence `Corrupt`
/// rather than an authentication failure.
pub fn deobfuscate(obfuscated: &str, seed: &str) -> Result<Vec<u8>, CryptoError> {
    let seed_bytes = seed.as_bytes();
    let mut hex_chars = String::with_capacity(obfuscated.len());
    let mut position = 0usize; // index among original (kept) characters
    let mut expect_glyph = false;

    for ch in obfuscated.chars() {
        if GLYPHS.contains(&ch) {
            if !expect_glyph {
                return Err(CryptoError::Corrupt(
                    "obfuscation glyph at unexpected position".into(),
                ));
            }
            expect_glyph = false;
            continue;
        }
        if expect_glyph {
            return Err(CryptoError::Corrupt("missing obfuscation glyph".into()));
        }
        if !ch.is_ascii_hexdigit() {
            return Err(CryptoError::Corrupt(format!(
                "unexpected character {ch:?} in obfuscated payload"
            )));
        }
        hex_chars.push(ch);
        if !seed_bytes.is_empty() {
            let seed_byte = seed_bytes[position % seed_bytes.len()] as usize;
            expect_glyph = (seed_byte + position) % 7 == 0;
        }
        position += 1;
    }
    // obfuscate always emits an expected glyph, even after the last hex
    // character, so one still pending here means truncation.
    if expect_glyph {
        return Err(CryptoError::Corrupt("truncated obfuscated payload".into()));
    }

    hex::decode(&hex_chars)
        .map_err(|_| CryptoError::Corrupt("obfuscated payload is not valid hex".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn glyphs_are_disjoint_from_hex_digits() {
        for g in GLYPHS {
            assert!(!g.is_ascii_hexdigit(), "glyph {g:?} collides with hex");
        }
    }

    #[test]
    fn roundtrip_fixed_case() {
        let data = b"\x00\x01\xfe\xff inner ciphertext bytes";
        let seed = "a3f09c11b2445ed0a3f09c11b2445ed0";
        let obfuscated = obfuscate(data, seed);
        assert_eq!(deobfuscate(&obfuscated, seed).unwrap(), data);
    }

    #[test]
    fn obfuscation_actually_inserts_glyphs() {
        // Seed bytes chosen so the %7 rule fires often.
        let data = [0u8; 64];
        let seed = "0000000000000000";
        let obfuscated = obfuscate(&data, seed);
        assert!(obfuscated.chars().any(|c| GLYPHS.contains(&c)));
        assert!(obfuscated.len() > data.len() * 2);
    }

    #[test]
    fn empty_seed_is_plain_hex() {
        let data = b"abc";
        assert_eq!(obfuscate(data, ""), hex::encode(data));
        assert_eq!(deobfuscate(&hex::encode(data), "").unwrap(), data);
    }

    #[test]
    fn rejects_unexpected_glyph() {
        let seed = "a3f09c11b2445ed0";
        let mut obfuscated = obfuscate(b"tamper me", seed);
        obfuscated.insert(0, '§');
        assert!(deobfuscate(&obfuscated, seed).is_err());
    }

    #[test]
    fn rejects_foreign_characters() {
        let seed = "a3f09c11b2445ed0";
        let obfuscated = obfuscate(b"data", seed).replace('6', "z");
        assert!(deobfuscate(&obfuscated, seed).is_err());
    }

    #[test]
    fn rejects_wrong_seed_structure() {
        // A seed whose insertion positions differ must be rejected, not
        // silently decoded to the same bytes with a clear conscience.
        let data = [0x5au8; 48];
        let obfuscated = obfuscate(&data, "0000000000000000");
        assert!(deobfuscate(&obfuscated, "1111111111111111").is_err());
    }

    proptest! {
        // The most fragile stage of the pipeline gets property coverage:
        // exact reversibility for arbitrary data and arbitrary hex seeds.
        #[test]
        fn roundtrip_arbitrary(
            data in proptest::collection::vec(any::<u8>(), 0..512),
            seed_bytes in proptest::collection::vec(any::<u8>(), 1..64),
        ) {
            let seed = hex::encode(&seed_bytes);
            let obfuscated = obfuscate(&data, &seed);
            prop_assert_eq!(deobfuscate(&obfuscated, &seed).unwrap(), data);
        }
    }
}

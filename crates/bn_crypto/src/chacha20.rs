//! Hand-rolled ChaCha20 stream cipher core (RFC 8439 layout).
//!
//! State: 16 words — 4 constant words ("expand 32-byte k"), 8 key words,
//! 1 block counter word, 3 nonce words. Each block runs 10 double-rounds
//! of ARX quarter-rounds over the four columns and four diagonals, then
//! adds the seeded state back in and serialises little-endian.
//!
//! [`apply`] XORs data against successive keystream blocks starting at
//! block counter **1**; counter 0 is reserved and never used for data.
//! Encryption and decryption are the same operation.
//!
//! Contract: a (key, nonce) pair must never be reused across two
//! plaintexts. Callers satisfy this by drawing a fresh random nonce per
//! encryption (see `pipeline`).

/// "expand 32-byte k", little-endian.
const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;
pub const BLOCK_LEN: usize = 64;

#[inline]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

#[inline]
fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Compute the 64-byte keystream block for `counter`.
pub fn block(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], counter: u32) -> [u8; BLOCK_LEN] {
    let mut init = [0u32; 16];
    init[..4].copy_from_slice(&SIGMA);
    for i in 0..8 {
        init[4 + i] = read_u32_le(&key[i * 4..]);
    }
    init[12] = counter;
    for i in 0..3 {
        init[13 + i] = read_u32_le(&nonce[i * 4..]);
    }

    let mut state = init;
    for _ in 0..10 {
        // Columns
        quarter_round(&mut state, 0, 4, 8, 12);
        quarter_round(&mut state, 1, 5, 9, 13);
        quarter_round(&mut state, 2, 6, 10, 14);
        quarter_round(&mut state, 3, 7, 11, 15);
        // Diagonals
        quarter_round(&mut state, 0, 5, 10, 15);
        quarter_round(&mut state, 1, 6, 11, 12);
        quarter_round(&mut state, 2, 7, 8, 13);
        quarter_round(&mut state, 3, 4, 9, 14);
    }

    let mut out = [0u8; BLOCK_LEN];
    for i in 0..16 {
        let word = state[i].wrapping_add(init[i]);
        out[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// XOR `data` against the keystream for (key, nonce), blocks counted from 1.
///
/// Involution: `apply(apply(d, k, n), k, n) == d`.
pub fn apply(data: &[u8], key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for (i, chunk) in data.chunks(BLOCK_LEN).enumerate() {
        let keystream = block(key, nonce, i as u32 + 1);
        out.extend(chunk.iter().zip(keystream.iter()).map(|(d, k)| d ^ k));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rfc_key() -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        for (i, b) in key.iter_mut().enumerate() {
            *b = i as u8;
        }
        key
    }

    // RFC 8439 §2.3.2 — block function test vector.
    #[test]
    fn block_function_rfc8439_vector() {
        let key = rfc_key();
        let nonce: [u8; NONCE_LEN] = [
            0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00,
        ];
        let expected = hex::decode(
            "10f1e7e4d13b5915500fdd1fa32071c4\
             c7d1f4c733c068030422aa9ac3d46c4e\
             d2826446079faa0914c2d705d98b02a2\
             b5129cd1de164eb9cbd083e8a2503c4e",
        )
        .unwrap();
        assert_eq!(block(&key, &nonce, 1).to_vec(), expected);
    }

    // RFC 8439 §2.4.2 — encryption test vector (initial counter 1, which is
    // exactly where `apply` starts).
    #[test]
    fn encrypt_rfc8439_vector() {
        let key = rfc_key();
        let nonce: [u8; NONCE_LEN] = [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x00,
        ];
        let plaintext: &[u8] = b"Ladies and Gentlemen of the class of '99: \
                                 If I could offer you only one tip for the \
                                 future, sunscreen would be it.";
        let expected = hex::decode(
            "6e2e359a2568f98041ba0728dd0d6981\
             e97e7aec1d4360c20a27afccfd9fae0b\
             f91b65c5524733ab8f593dabcd62b357\
             1639d624e65152ab8f530c359f0861d8\
             07ca0dbf500d6a6156a38e088a22b65e\
             52bc514d16ccf806818ce91ab7793736\
             5af90bbf74a35be6b40b8eedf2785e42\
             874d",
        )
        .unwrap();
        assert_eq!(apply(plaintext, &key, &nonce), expected);
    }

    #[test]
    fn apply_is_an_involution() {
        let key = [0x42u8; KEY_LEN];
        let nonce = [0x07u8; NONCE_LEN];
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        assert_eq!(apply(&apply(&data, &key, &nonce), &key, &nonce), data);
    }

    #[test]
    fn apply_handles_empty_and_sub_block_inputs() {
        let key = [1u8; KEY_LEN];
        let nonce = [2u8; NONCE_LEN];
        assert!(apply(&[], &key, &nonce).is_empty());
        let short = b"abc";
        assert_eq!(apply(&apply(short, &key, &nonce), &key, &nonce), short);
    }

    #[test]
    fn different_nonces_give_different_keystreams() {
        let key = [3u8; KEY_LEN];
        let zeros = [0u8; 128];
        let a = apply(&zeros, &key, &[4u8; NONCE_LEN]);
        let b = apply(&zeros, &key, &[5u8; NONCE_LEN]);
        assert_ne!(a, b);
    }
}

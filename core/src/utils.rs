use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::MIB;

/// Deterministic pseudo-random bytes for a given seed.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    fill_random(&mut buf, seed);
    buf
}

pub fn fill_random(buf: &mut [u8], seed: u64) {
    StdRng::seed_from_u64(seed).fill_bytes(buf);
}

pub fn mib_to_bytes(mib: usize) -> usize {
    mib * MIB
}

pub fn bytes_to_mib(bytes: usize) -> f64 {
    bytes as f64 / MIB as f64
}

/// Decode a hex string, tolerating a `0x` prefix and surrounding whitespace.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, crate::crypto::CryptoError> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}

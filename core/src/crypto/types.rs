// ## 📂 File: `src/crypto/types.rs`

use std::fmt;

use crate::constants::BLOCK_LEN;

/// One cipher block: plaintext, ciphertext, counter or keystream.
pub type Block = [u8; BLOCK_LEN];

/// Supported AES key lengths (bytes).
pub const KEY_LEN_16: usize = 16;
pub const KEY_LEN_24: usize = 24;
pub const KEY_LEN_32: usize = 32;

pub const SUPPORTED_KEY_LENS: &[usize] = &[KEY_LEN_16, KEY_LEN_24, KEY_LEN_32];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key is not 16, 24 or 32 bytes.
    InvalidKeyLen { actual: usize },

    /// Counter / IV is not exactly one block.
    InvalidCounterLen { expected: usize, actual: usize },

    /// Hex-encoded key material did not parse.
    InvalidHex(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CryptoError::*;
        match self {
            InvalidKeyLen { actual } =>
                write!(f, "invalid key length: expected one of {:?}, actual={}", SUPPORTED_KEY_LENS, actual),
            InvalidCounterLen { expected, actual } =>
                write!(f, "invalid counter length: expected={}, actual={}", expected, actual),
            InvalidHex(msg) =>
                write!(f, "invalid hex: {}", msg),
        }
    }
}

impl std::error::Error for CryptoError {}

impl From<hex::FromHexError> for CryptoError {
    fn from(e: hex::FromHexError) -> Self {
        CryptoError::InvalidHex(e.to_string())
    }
}

//! crypto/cipher.rs
//! Single-block AES primitive and key expansion.
//!
//! Design notes:
//! - The AES key schedule is computed once by `expand_key` and kept inside `RoundKey`.
//! - `encrypt_block` has no state of its own, so any number of threads can call it
//!   on the same `&RoundKey` at once.
//! - Key size is selected by key length, mirroring how `AeadImpl` picks a cipher.

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::crypto::types::{Block, CryptoError, KEY_LEN_16, KEY_LEN_24, KEY_LEN_32};

/// Expanded key material for the block primitive.
///
/// `Clone` yields an independent copy of the whole schedule; that copy is what a
/// private-state worker holds for the length of a parallel phase.
#[derive(Clone)]
pub enum RoundKey {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl RoundKey {
    /// Expand a raw 16/24/32-byte key.
    pub fn expand(key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKeyLen { actual: key.len() };
        match key.len() {
            KEY_LEN_16 => Ok(Self::Aes128(Aes128::new_from_slice(key).map_err(invalid)?)),
            KEY_LEN_24 => Ok(Self::Aes192(Aes192::new_from_slice(key).map_err(invalid)?)),
            KEY_LEN_32 => Ok(Self::Aes256(Aes256::new_from_slice(key).map_err(invalid)?)),
            actual => Err(CryptoError::InvalidKeyLen { actual }),
        }
    }

    /// Key size in bits.
    pub fn bits(&self) -> usize {
        match self {
            RoundKey::Aes128(_) => 128,
            RoundKey::Aes192(_) => 192,
            RoundKey::Aes256(_) => 256,
        }
    }

    #[inline]
    pub fn encrypt_block(&self, block: &mut Block) {
        let block = GenericArray::from_mut_slice(block);
        match self {
            RoundKey::Aes128(c) => c.encrypt_block(block),
            RoundKey::Aes192(c) => c.encrypt_block(block),
            RoundKey::Aes256(c) => c.encrypt_block(block),
        }
    }
}

impl std::fmt::Debug for RoundKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print key material
        write!(f, "RoundKey(AES-{})", self.bits())
    }
}

/// Derive the round key for a session. Runs once, outside any timed region.
pub fn expand_key(key: &[u8]) -> Result<RoundKey, CryptoError> {
    RoundKey::expand(key)
}

/// Encrypt one block in place.
#[inline]
pub fn encrypt_block(round_key: &RoundKey, block: &mut Block) {
    round_key.encrypt_block(block);
}

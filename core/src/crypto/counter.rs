//! crypto/counter.rs
//! 128-bit big-endian CTR counter arithmetic.
//!
//! Design:
//! - `advance(c, n)` adds `n` byte-wise from the least significant (rightmost) byte,
//!   carrying toward the most significant one. Overflow past 2^128 wraps.
//! - The addition is associative: `advance(advance(c, a), b) == advance(c, a + b)`.
//!   A worker gets the counter of block `i` as `advance(snapshot, i)`.

use std::fmt;

use crate::constants::BLOCK_LEN;
use crate::crypto::types::{Block, CryptoError};

/// Add `n` to the big-endian counter in place.
#[inline]
pub fn advance(counter: &mut Block, n: u64) {
    let mut carry = n;
    for byte in counter.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = *byte as u64 + (carry & 0xFF);
        *byte = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
}

/// Add one to the big-endian counter in place.
#[inline]
pub fn increment(counter: &mut Block) {
    for byte in counter.iter_mut().rev() {
        if *byte == 0xFF {
            *byte = 0;
            continue;
        }
        *byte += 1;
        break;
    }
}

/// Caller-owned CTR counter (the IV, then the running counter).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counter(Block);

impl Counter {
    pub const fn new(block: Block) -> Self {
        Self(block)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let block: Block = bytes.try_into().map_err(|_| CryptoError::InvalidCounterLen {
            expected: BLOCK_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(block))
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &Block {
        &self.0
    }

    pub fn to_bytes(self) -> Block {
        self.0
    }

    pub fn advance(&mut self, n: u64) {
        advance(&mut self.0, n);
    }

    /// Copy of `self` advanced by `n`.
    #[must_use]
    pub fn advanced(mut self, n: u64) -> Self {
        self.advance(n);
        self
    }

    pub fn increment(&mut self) {
        increment(&mut self.0);
    }
}

impl From<Block> for Counter {
    fn from(block: Block) -> Self {
        Self(block)
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter({})", hex::encode(self.0))
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

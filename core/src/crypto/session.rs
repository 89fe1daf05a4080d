//! crypto/session.rs
//! Caller-owned cipher context: expanded key plus the running CTR counter.

use crate::crypto::cipher::RoundKey;
use crate::crypto::counter::Counter;
use crate::crypto::types::CryptoError;

/// Long-lived context a caller hands to every transform.
///
/// The round key never changes after construction. The counter is the only state
/// that survives from one transform call to the next.
#[derive(Debug, Clone)]
pub struct CipherSession {
    pub round_key: RoundKey,
    pub counter: Counter,
}

impl CipherSession {
    /// Expand `key` and start the counter at `iv`.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            round_key: RoundKey::expand(key)?,
            counter: Counter::from_slice(iv)?,
        })
    }

    pub fn from_parts(round_key: RoundKey, counter: Counter) -> Self {
        Self { round_key, counter }
    }

    pub fn counter(&self) -> Counter {
        self.counter
    }

    /// Rewind (or move) the counter, keeping the key schedule.
    pub fn set_counter(&mut self, counter: Counter) {
        self.counter = counter;
    }
}

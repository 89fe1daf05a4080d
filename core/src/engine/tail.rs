//! engine/tail.rs
//! Sequential finisher for the trailing partial block.

use crate::constants::BLOCK_LEN;
use crate::crypto::{Block, CipherSession};

/// XOR the first `tail.len()` keystream bytes of the session's current counter
/// into `tail`, then move the counter on by one.
///
/// Runs after the parallel phase has joined and the counter has been set past the
/// full blocks. An empty tail leaves the session untouched.
pub fn finish_tail(session: &mut CipherSession, tail: &mut [u8]) {
    if tail.is_empty() {
        return;
    }
    debug_assert!(tail.len() < BLOCK_LEN);

    let mut keystream: Block = session.counter.to_bytes();
    session.round_key.encrypt_block(&mut keystream);
    for (b, k) in tail.iter_mut().zip(keystream.iter()) {
        *b ^= k;
    }
    session.counter.increment();
}

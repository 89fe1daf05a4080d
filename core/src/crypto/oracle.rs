//! crypto/oracle.rs
//! Sequential CTR reference transform.
//!
//! Walks the buffer byte by byte, refilling the keystream block every
//! `BLOCK_LEN` bytes and incrementing the counter by one each time. Nothing
//! here is shared or reordered; every parallel engine is checked against it.

use crate::constants::BLOCK_LEN;
use crate::crypto::session::CipherSession;
use crate::crypto::types::Block;

/// Transform `buf` in place, leaving `session.counter` advanced by
/// `ceil(buf.len() / BLOCK_LEN)`.
pub fn sequential_transform(session: &mut CipherSession, buf: &mut [u8]) {
    let mut keystream: Block = [0u8; BLOCK_LEN];
    let mut bi = BLOCK_LEN;

    for byte in buf.iter_mut() {
        if bi == BLOCK_LEN {
            keystream = session.counter.to_bytes();
            session.round_key.encrypt_block(&mut keystream);
            session.counter.increment();
            bi = 0;
        }
        *byte ^= keystream[bi];
        bi += 1;
    }
}

/// Convenience wrapper: fresh session, transformed copy of `data`.
pub fn sequential_transform_copy(
    key: &[u8],
    iv: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, crate::crypto::CryptoError> {
    let mut session = CipherSession::new(key, iv)?;
    let mut out = data.to_vec();
    sequential_transform(&mut session, &mut out);
    Ok(out)
}

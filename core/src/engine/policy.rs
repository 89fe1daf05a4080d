//! engine/policy.rs
//! Worker state policies: what a worker owns and what it shares.
//!
//! A policy hands one `WorkerHandle` to each worker before the pool starts. The
//! worker calls `enter` on its own thread to build its `BlockWorker` state, then
//! runs every block of its range through `xcrypt_block`.
//!
//! | policy           | round key           | counter / keystream scratch      |
//! | ---------------- | ------------------- | -------------------------------- |
//! | `PrivateState`   | private copy        | worker stack                     |
//! | `SharedRoundKey` | caller's, read-only | worker stack                     |
//! | `SharedScratch`  | private copy        | unpadded shared arena slot       |

use std::hint::black_box;

use crate::constants::{BLOCK_LEN, MAX_WORKERS};
use crate::crypto::{advance, Block, RoundKey};
use crate::engine::scratch::ScratchArena;
use crate::types::CtrError;

/// Per-worker state that turns one block index into ciphertext.
pub trait BlockWorker {
    /// XOR the keystream for `block_index` (counted from `snapshot`) into `block`.
    fn xcrypt_block(&mut self, snapshot: &Block, block_index: u64, block: &mut [u8]);
}

/// Moved onto a worker thread; turned into that worker's state there.
pub trait WorkerHandle<'a>: Send {
    type State: BlockWorker;

    fn enter(self) -> Self::State;
}

pub trait WorkerStatePolicy {
    const NAME: &'static str;

    type Handle<'a>: WorkerHandle<'a>
    where
        Self: 'a;

    /// One handle per worker, in worker-id order.
    fn handles<'a>(
        &'a mut self,
        round_key: &'a RoundKey,
        workers: usize,
    ) -> Result<Vec<Self::Handle<'a>>, CtrError>;
}

/// Counter for `block_index`, its keystream, XOR into `block`.
#[inline(always)]
fn keystream_xor(
    round_key: &RoundKey,
    counter: &mut Block,
    keystream: &mut Block,
    snapshot: &Block,
    block_index: u64,
    block: &mut [u8],
) {
    *counter = *snapshot;
    advance(counter, block_index);
    *keystream = *counter;
    round_key.encrypt_block(keystream);
    for (b, k) in block.iter_mut().zip(keystream.iter()) {
        *b ^= k;
    }
}

// -----------------------------------------------------------------------------
// Variant A: private state
// -----------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct PrivateState;

pub struct PrivateHandle<'a> {
    source: &'a RoundKey,
}

pub struct PrivateWorker {
    round_key: RoundKey,
    counter: Block,
    keystream: Block,
}

impl<'a> WorkerHandle<'a> for PrivateHandle<'a> {
    type State = PrivateWorker;

    fn enter(self) -> PrivateWorker {
        // copied on the worker's own thread, into its own stack
        PrivateWorker {
            round_key: self.source.clone(),
            counter: [0u8; BLOCK_LEN],
            keystream: [0u8; BLOCK_LEN],
        }
    }
}

impl BlockWorker for PrivateWorker {
    #[inline]
    fn xcrypt_block(&mut self, snapshot: &Block, block_index: u64, block: &mut [u8]) {
        keystream_xor(&self.round_key, &mut self.counter, &mut self.keystream, snapshot, block_index, block);
    }
}

impl WorkerStatePolicy for PrivateState {
    const NAME: &'static str = "private";

    type Handle<'a> = PrivateHandle<'a>;

    fn handles<'a>(&'a mut self, round_key: &'a RoundKey, workers: usize) -> Result<Vec<PrivateHandle<'a>>, CtrError> {
        Ok((0..workers).map(|_| PrivateHandle { source: round_key }).collect())
    }
}

// -----------------------------------------------------------------------------
// Variant B: shared round key (read-only contention)
// -----------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct SharedRoundKey;

pub struct SharedKeyHandle<'a> {
    round_key: &'a RoundKey,
}

pub struct SharedKeyWorker<'a> {
    round_key: &'a RoundKey,
    counter: Block,
    keystream: Block,
}

impl<'a> WorkerHandle<'a> for SharedKeyHandle<'a> {
    type State = SharedKeyWorker<'a>;

    fn enter(self) -> SharedKeyWorker<'a> {
        SharedKeyWorker {
            round_key: self.round_key,
            counter: [0u8; BLOCK_LEN],
            keystream: [0u8; BLOCK_LEN],
        }
    }
}

impl BlockWorker for SharedKeyWorker<'_> {
    #[inline]
    fn xcrypt_block(&mut self, snapshot: &Block, block_index: u64, block: &mut [u8]) {
        keystream_xor(self.round_key, &mut self.counter, &mut self.keystream, snapshot, block_index, block);
    }
}

impl WorkerStatePolicy for SharedRoundKey {
    const NAME: &'static str = "shared-round-key";

    type Handle<'a> = SharedKeyHandle<'a>;

    fn handles<'a>(&'a mut self, round_key: &'a RoundKey, workers: usize) -> Result<Vec<SharedKeyHandle<'a>>, CtrError> {
        Ok((0..workers).map(|_| SharedKeyHandle { round_key }).collect())
    }
}

// -----------------------------------------------------------------------------
// Variant C: shared unpadded scratch (false sharing)
// -----------------------------------------------------------------------------

/// Owns the scratch arena for one transform session.
#[derive(Debug, Clone)]
pub struct SharedScratch {
    arena: ScratchArena,
}

impl Default for SharedScratch {
    fn default() -> Self {
        Self::new(MAX_WORKERS)
    }
}

impl SharedScratch {
    pub fn new(capacity: usize) -> Self {
        Self { arena: ScratchArena::new(capacity) }
    }

    pub fn arena(&self) -> &ScratchArena {
        &self.arena
    }
}

pub struct SlotHandle<'a> {
    source: &'a RoundKey,
    counter: &'a mut Block,
    keystream: &'a mut Block,
}

pub struct SlotWorker<'a> {
    round_key: RoundKey,
    counter: &'a mut Block,
    keystream: &'a mut Block,
}

impl<'a> WorkerHandle<'a> for SlotHandle<'a> {
    type State = SlotWorker<'a>;

    fn enter(self) -> SlotWorker<'a> {
        SlotWorker {
            round_key: self.source.clone(),
            counter: self.counter,
            keystream: self.keystream,
        }
    }
}

impl BlockWorker for SlotWorker<'_> {
    #[inline]
    fn xcrypt_block(&mut self, snapshot: &Block, block_index: u64, block: &mut [u8]) {
        keystream_xor(&self.round_key, self.counter, self.keystream, snapshot, block_index, block);
        // keep every slot write in memory; the shared cache line is the point of this variant
        black_box(&*self.counter);
        black_box(&*self.keystream);
    }
}

impl WorkerStatePolicy for SharedScratch {
    const NAME: &'static str = "false-sharing";

    type Handle<'a> = SlotHandle<'a>;

    fn handles<'a>(&'a mut self, round_key: &'a RoundKey, workers: usize) -> Result<Vec<SlotHandle<'a>>, CtrError> {
        Ok(self
            .arena
            .slots_mut(workers)?
            .into_iter()
            .map(|(counter, keystream)| SlotHandle { source: round_key, counter, keystream })
            .collect())
    }
}

//! engine/scratch.rs
//! Unpadded per-worker scratch arena for the false-sharing variant.
//!
//! Two flat arrays of `Block` slots, one for counters and one for keystream,
//! indexed by worker id. Slots are packed back to back with no padding, so
//! `CACHE_LINE_BYTES / BLOCK_LEN` neighbouring workers write into the same cache
//! line.
//!
//! Contract: slot `i` is handed out as an exclusive `&mut` to worker `i` only.
//! Workers never touch each other's slots, so there is no data race, only
//! cache-line invalidation traffic.

use std::mem::size_of;

use crate::constants::{BLOCK_LEN, CACHE_LINE_BYTES, MAX_WORKERS};
use crate::crypto::Block;
use crate::types::CtrError;

/// Exclusive view of one worker's two slots.
pub type SlotPair<'a> = (&'a mut Block, &'a mut Block);

#[derive(Debug, Clone)]
pub struct ScratchArena {
    counters: Vec<Block>,
    keystreams: Vec<Block>,
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new(MAX_WORKERS)
    }
}

impl ScratchArena {
    /// Pre-size the arena; it never grows afterwards.
    pub fn new(capacity: usize) -> Self {
        Self {
            counters: vec![[0u8; BLOCK_LEN]; capacity],
            keystreams: vec![[0u8; BLOCK_LEN]; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.counters.len()
    }

    /// Hand out slots `0..workers`, one exclusive pair per worker, in worker order.
    pub fn slots_mut(&mut self, workers: usize) -> Result<Vec<SlotPair<'_>>, CtrError> {
        if workers > self.capacity() {
            return Err(CtrError::ScratchCapacity {
                requested: workers,
                capacity: self.capacity(),
            });
        }
        Ok(self.counters[..workers]
            .iter_mut()
            .zip(self.keystreams[..workers].iter_mut())
            .collect())
    }

    /// Last counter value worker `worker` wrote.
    pub fn counter_slot(&self, worker: usize) -> Option<&Block> {
        self.counters.get(worker)
    }

    /// Last keystream block worker `worker` wrote.
    pub fn keystream_slot(&self, worker: usize) -> Option<&Block> {
        self.keystreams.get(worker)
    }

    /// Distance in bytes between neighbouring slots.
    pub fn slot_stride(&self) -> usize {
        match (self.counters.first(), self.counters.get(1)) {
            (Some(a), Some(b)) => b.as_ptr() as usize - a.as_ptr() as usize,
            _ => size_of::<Block>(),
        }
    }

    /// How many workers' slots alias one cache line.
    pub fn slots_per_cache_line(&self) -> usize {
        CACHE_LINE_BYTES / self.slot_stride()
    }
}

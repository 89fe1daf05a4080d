//! engine/partition.rs
//! Static block partitioning.
//!
//! `num_blocks = len / BLOCK_LEN`, `tail = len % BLOCK_LEN`. Full blocks are split
//! into contiguous ranges, one per worker, sized statically:
//! every worker gets `num_blocks / workers` blocks and the first
//! `num_blocks % workers` workers get one more. Ranges are fixed before any worker
//! starts; there is no rebalancing.

use std::ops::Range;

use crate::constants::BLOCK_LEN;
use crate::parallelism::validate_worker_count;
use crate::types::CtrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPartition {
    pub len: usize,
    pub num_blocks: usize,
    pub tail: usize,
    pub workers: usize,
}

/// One worker's share of the buffer: its block range and the bytes backing it.
#[derive(Debug)]
pub struct WorkerChunk<'a> {
    pub worker_id: usize,
    pub first_block: usize,
    pub bytes: &'a mut [u8],
}

impl BlockPartition {
    pub fn new(len: usize, workers: usize) -> Result<Self, CtrError> {
        validate_worker_count(workers)?;
        Ok(Self {
            len,
            num_blocks: len / BLOCK_LEN,
            tail: len % BLOCK_LEN,
            workers,
        })
    }

    /// Bytes covered by full blocks.
    pub fn full_len(&self) -> usize {
        self.num_blocks * BLOCK_LEN
    }

    /// Block-index range owned by `worker`. Empty when there are more workers than blocks.
    pub fn range(&self, worker: usize) -> Range<usize> {
        let base = self.num_blocks / self.workers;
        let extra = self.num_blocks % self.workers;
        let start = worker * base + worker.min(extra);
        let len = base + usize::from(worker < extra);
        start..start + len
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.workers).map(move |w| self.range(w))
    }

    /// How far the caller's counter moves for this buffer: `ceil(len / BLOCK_LEN)`.
    pub fn counter_advance(&self) -> u64 {
        self.num_blocks as u64 + u64::from(self.tail > 0)
    }

    /// Split `buf` into one disjoint chunk per worker plus the trailing partial block.
    ///
    /// `buf.len()` must equal `self.len`.
    pub fn split_mut<'a>(&self, buf: &'a mut [u8]) -> (Vec<WorkerChunk<'a>>, &'a mut [u8]) {
        debug_assert_eq!(buf.len(), self.len);
        let (mut body, tail) = buf.split_at_mut(self.full_len());

        let mut chunks = Vec::with_capacity(self.workers);
        for (worker_id, range) in self.ranges().enumerate() {
            let (head, rest) = std::mem::take(&mut body).split_at_mut(range.len() * BLOCK_LEN);
            chunks.push(WorkerChunk {
                worker_id,
                first_block: range.start,
                bytes: head,
            });
            body = rest;
        }
        (chunks, tail)
    }
}

//! telemetry/counters.rs
//! Deterministic counters for one transform call.
//!
//! Each worker fills its own `WorkerCounters` on its own stack; the engine merges
//! them after the join. No shared counter is touched inside the block loop.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Counters owned by a single worker for one parallel phase.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerCounters {
    pub worker_id: usize,
    pub blocks: u64,
}

/// Totals for one transform call.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformCounters {
    pub bytes: u64,
    pub blocks: u64,
    pub tail_bytes: u64,
    pub workers: u64,
    /// Workers whose static range was empty (more workers than blocks).
    pub idle_workers: u64,
}

impl TransformCounters {
    pub fn add_worker(&mut self, worker: &WorkerCounters) {
        self.workers += 1;
        self.blocks += worker.blocks;
        if worker.blocks == 0 {
            self.idle_workers += 1;
        }
    }

    pub fn add_tail(&mut self, tail_len: usize) {
        self.tail_bytes += tail_len as u64;
    }

    /// Blocks plus the partial tail block, if any.
    pub fn counter_advance(&self) -> u64 {
        self.blocks + u64::from(self.tail_bytes > 0)
    }

    pub fn merge(&mut self, other: &TransformCounters) {
        self.bytes += other.bytes;
        self.blocks += other.blocks;
        self.tail_bytes += other.tail_bytes;
        self.workers += other.workers;
        self.idle_workers += other.idle_workers;
    }
}

impl AddAssign for TransformCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

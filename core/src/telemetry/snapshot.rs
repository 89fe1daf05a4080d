//! telemetry/snapshot.rs
//! Immutable view of one measured transform: counters, elapsed time, throughput.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TransformCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

const MIB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub bytes: u64,
    pub blocks: u64,
    pub tail_bytes: u64,
    pub workers: u64,
    pub throughput_mib_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TransformCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();
        Self {
            bytes: counters.bytes,
            blocks: counters.blocks,
            tail_bytes: counters.tail_bytes,
            workers: counters.workers,
            throughput_mib_per_sec: throughput_mib_per_sec(counters.bytes, elapsed),
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    /// Stage times never exceed the wall clock they were measured inside.
    pub fn sanity_check(&self) -> bool {
        self.stage_times.total() <= self.elapsed
    }
}

/// MiB/s for `bytes` processed in `elapsed`; 0 when nothing was measured.
pub fn throughput_mib_per_sec(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        (bytes as f64 / MIB) / secs
    } else {
        0.0
    }
}

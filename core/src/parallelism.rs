//! parallelism.rs
//! Worker-pool sizing: ambient worker count and host profile.
//!
//! The worker count is a process-wide setting, read by the dispatch step on every
//! transform. Callers set it once and then invoke any
//! variant without passing it around.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

use crate::constants::{MAX_WORKERS, WORKERS_ENV};
use crate::types::CtrError;

/// 0 = not set explicitly.
static WORKER_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Set the ambient worker count used by `Variant::transform`.
pub fn set_worker_count(workers: usize) -> Result<(), CtrError> {
    validate_worker_count(workers)?;
    WORKER_COUNT.store(workers, Ordering::Relaxed);
    debug!(workers, "ambient worker count set");
    Ok(())
}

/// Forget the explicit setting; fall back to env / CPU count.
pub fn reset_worker_count() {
    WORKER_COUNT.store(0, Ordering::Relaxed);
}

/// Ambient worker count: explicit setting, then `CTR_NUM_WORKERS`, then logical CPUs.
pub fn worker_count() -> usize {
    match WORKER_COUNT.load(Ordering::Relaxed) {
        0 => env_worker_count().unwrap_or_else(default_worker_count),
        n => n,
    }
}

pub fn validate_worker_count(workers: usize) -> Result<(), CtrError> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(CtrError::InvalidWorkerCount { requested: workers, max: MAX_WORKERS });
    }
    Ok(())
}

fn default_worker_count() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

fn env_worker_count() -> Option<usize> {
    let raw = std::env::var(WORKERS_ENV).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(n) if validate_worker_count(n).is_ok() => Some(n),
        _ => {
            warn!(value = %raw, "ignoring invalid {}", WORKERS_ENV);
            None
        }
    }
}

/// Host parallelism profile
#[derive(Debug, Clone)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    /// Logical CPUs; sweeps stop before exceeding this.
    pub max_workers: usize,
    /// Available memory in bytes at profiling time (0 if unknown).
    pub available_memory: u64,
}

impl ParallelismProfile {
    pub fn single_threaded() -> Self {
        Self {
            worker_count: 1,
            max_workers: 1,
            available_memory: 0,
        }
    }

    pub fn dynamic() -> Self {
        let cores = num_cpus::get().clamp(1, MAX_WORKERS);

        let mut sys = sysinfo::System::new();
        sys.refresh_memory();
        let available_memory = sys.available_memory();

        debug!(cores, available_memory, "host parallelism profile");

        Self {
            worker_count: worker_count(),
            max_workers: cores,
            available_memory,
        }
    }

    /// Whether `bytes` of working set look affordable. Unknown memory counts as yes.
    pub fn fits_in_memory(&self, bytes: u64) -> bool {
        self.available_memory == 0 || bytes <= self.available_memory
    }
}

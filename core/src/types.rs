use std::io;

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::verify::Divergence;

/// Unified error for engines, verification and the benchmark harness.
/// - `From<T>` impls let `?` cross the crypto / io boundaries.
/// - A `Divergence` is fatal for the variant that produced it.
#[derive(Debug, Error)]
pub enum CtrError {
    /// Key or counter material rejected.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Worker pool size out of range.
    #[error("invalid worker count: requested={requested}, allowed=1..={max}")]
    InvalidWorkerCount { requested: usize, max: usize },

    /// Shared scratch arena has fewer slots than workers.
    #[error("scratch arena too small: requested={requested} slots, capacity={capacity}")]
    ScratchCapacity { requested: usize, capacity: usize },

    /// A worker thread panicked during the parallel phase.
    #[error("worker {worker} panicked during the parallel phase")]
    WorkerPanicked { worker: usize },

    /// The scoped pool failed outside any joined worker.
    #[error("worker pool panicked")]
    PoolPanicked,

    /// Output differs from the sequential oracle.
    #[error("correctness divergence: {0}")]
    Divergence(Divergence),

    /// Buffer for a benchmark size could not be allocated.
    #[error("allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Report serialization failure.
    #[error("report error: {0}")]
    Report(String),
}

impl From<Divergence> for CtrError {
    fn from(d: Divergence) -> Self {
        CtrError::Divergence(d)
    }
}

impl From<serde_json::Error> for CtrError {
    fn from(e: serde_json::Error) -> Self {
        CtrError::Report(e.to_string())
    }
}

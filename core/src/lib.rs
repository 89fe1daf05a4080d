//! ctr-core
//!
//! Parallel AES-CTR engines with different worker-state sharing strategies,
//! a sequential reference transform and a benchmark harness that compares them.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod parallelism;

// Cipher primitive, counters, oracle
pub mod crypto;

// Parallel engines
pub mod engine;
pub mod verify;

// Measurement
pub mod telemetry;
pub mod bench;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::crypto::{sequential_transform, CipherSession, Counter, RoundKey};
    pub use crate::engine::{LoopSync, TransformReport, Variant};
    pub use crate::parallelism::{set_worker_count, worker_count};
    pub use crate::types::CtrError;
    pub use crate::verify::{verify_all, verify_variant, Divergence};
}

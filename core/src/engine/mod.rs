//! engine/mod.rs
//! Parallel CTR engines: partitioning, worker state policies, dispatch, tail.

pub mod partition;
pub mod scratch;
pub mod policy;
pub mod dispatch;
pub mod tail;
pub mod variant;

pub use partition::{BlockPartition, WorkerChunk};
pub use scratch::ScratchArena;
pub use policy::{BlockWorker, PrivateState, SharedRoundKey, SharedScratch, WorkerHandle, WorkerStatePolicy};
pub use dispatch::{xcrypt_parallel, LoopSync, TransformReport};
pub use tail::finish_tail;
pub use variant::Variant;

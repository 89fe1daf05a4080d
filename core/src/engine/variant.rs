//! engine/variant.rs
//! The four harness-facing CTR variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::CipherSession;
use crate::engine::dispatch::{xcrypt_parallel, LoopSync, TransformReport};
use crate::engine::policy::{PrivateState, SharedRoundKey, SharedScratch};
use crate::parallelism::worker_count;
use crate::types::CtrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Private round key and scratch per worker, loop barrier.
    Private,
    /// Caller's round key read by every worker, loop barrier.
    SharedRoundKey,
    /// Unpadded shared scratch arena, loop barrier.
    FalseSharing,
    /// Private state, no loop barrier.
    Relaxed,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Private,
        Variant::SharedRoundKey,
        Variant::FalseSharing,
        Variant::Relaxed,
    ];

    /// Series label used in benchmark reports.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Private => "Private",
            Variant::SharedRoundKey => "SharedRoundKey",
            Variant::FalseSharing => "FalseSharing",
            Variant::Relaxed => "Relaxed",
        }
    }

    pub fn loop_sync(&self) -> LoopSync {
        match self {
            Variant::Relaxed => LoopSync::NoWait,
            _ => LoopSync::Barrier,
        }
    }

    /// Transform `buf` in place with the ambient worker count.
    pub fn transform(&self, session: &mut CipherSession, buf: &mut [u8]) -> Result<TransformReport, CtrError> {
        self.transform_with_workers(session, buf, worker_count())
    }

    /// Transform `buf` in place with exactly `workers` threads.
    pub fn transform_with_workers(
        &self,
        session: &mut CipherSession,
        buf: &mut [u8],
        workers: usize,
    ) -> Result<TransformReport, CtrError> {
        let sync = self.loop_sync();
        match self {
            Variant::Private | Variant::Relaxed => xcrypt_parallel(&mut PrivateState, sync, session, buf, workers),
            Variant::SharedRoundKey => xcrypt_parallel(&mut SharedRoundKey, sync, session, buf, workers),
            Variant::FalseSharing => {
                // arena lives for this transform only
                let mut scratch = SharedScratch::new(workers);
                xcrypt_parallel(&mut scratch, sync, session, buf, workers)
            }
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "private" | "a" => Ok(Variant::Private),
            "sharedroundkey" | "shared" | "b" => Ok(Variant::SharedRoundKey),
            "falsesharing" | "c" => Ok(Variant::FalseSharing),
            "relaxed" | "d" => Ok(Variant::Relaxed),
            other => Err(format!("unknown variant: {other}")),
        }
    }
}

//! engine/dispatch.rs
//! The parallel CTR engine, parameterized by worker state policy and loop sync.
//!
//! One call:
//! 1. partition the buffer and snapshot the caller's counter (once, before any worker)
//! 2. spawn a scoped worker per range; each computes block `i`'s counter as
//!    `advance(snapshot, i)`, so results never depend on scheduling
//! 3. join the whole pool (always, for every variant)
//! 4. set the caller's counter to `advance(snapshot, num_blocks)`
//! 5. finish the partial tail block sequentially

use std::time::Instant;

use crossbeam::sync::WaitGroup;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::BLOCK_LEN;
use crate::crypto::{Block, CipherSession, Counter, RoundKey};
use crate::engine::partition::{BlockPartition, WorkerChunk};
use crate::engine::policy::{BlockWorker, WorkerHandle, WorkerStatePolicy};
use crate::engine::tail::finish_tail;
use crate::telemetry::{Stage, StageTimes, TelemetryTimer, TransformCounters, WorkerCounters};
use crate::types::CtrError;

/// Synchronization at the end of the per-block loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopSync {
    /// Workers rendezvous after their block range before leaving the parallel phase.
    Barrier,
    /// Workers leave as soon as their own range is done. The pool join still applies.
    NoWait,
}

/// What one transform did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformReport {
    pub counters: TransformCounters,
    pub stage_times: StageTimes,
}

/// Transform `buf` in place with `workers` threads under `policy`.
///
/// On return the session counter has moved by exactly `ceil(buf.len() / BLOCK_LEN)`,
/// whatever the worker count.
pub fn xcrypt_parallel<P: WorkerStatePolicy>(
    policy: &mut P,
    sync: LoopSync,
    session: &mut CipherSession,
    buf: &mut [u8],
    workers: usize,
) -> Result<TransformReport, CtrError> {
    let mut timer = TelemetryTimer::new();
    let len = buf.len();

    let partition = timer.time(Stage::Partition, || BlockPartition::new(len, workers))?;
    let snapshot: Block = session.counter.to_bytes();
    let (chunks, tail) = partition.split_mut(buf);

    debug!(
        policy = P::NAME,
        sync = ?sync,
        workers,
        blocks = partition.num_blocks,
        tail = partition.tail,
        "parallel transform"
    );

    let start = Instant::now();
    let per_worker = run_pool(policy, sync, &session.round_key, &snapshot, chunks)?;
    timer.add_stage_time(Stage::Parallel, start.elapsed());

    // pool joined: every worker write is visible from here on
    let mut counters = TransformCounters { bytes: len as u64, ..Default::default() };
    for w in &per_worker {
        counters.add_worker(w);
    }
    session.counter = Counter::new(snapshot).advanced(partition.num_blocks as u64);

    if !tail.is_empty() {
        timer.time(Stage::Tail, || finish_tail(session, tail));
        counters.add_tail(partition.tail);
    }

    timer.finish();
    Ok(TransformReport {
        counters,
        stage_times: timer.stage_times,
    })
}

fn run_pool<P: WorkerStatePolicy>(
    policy: &mut P,
    sync: LoopSync,
    round_key: &RoundKey,
    snapshot: &Block,
    chunks: Vec<WorkerChunk<'_>>,
) -> Result<Vec<WorkerCounters>, CtrError> {
    let handles = policy.handles(round_key, chunks.len())?;
    let loop_barrier = match sync {
        LoopSync::Barrier => Some(WaitGroup::new()),
        LoopSync::NoWait => None,
    };

    let joined = crossbeam::thread::scope(|s| {
        let workers: Vec<_> = handles
            .into_iter()
            .zip(chunks)
            .map(|(handle, chunk)| {
                let barrier = loop_barrier.clone();
                s.spawn(move |_| run_worker(handle, chunk, snapshot, barrier))
            })
            .collect();
        // only workers hold the barrier now
        drop(loop_barrier);

        workers
            .into_iter()
            .enumerate()
            .map(|(worker, h)| h.join().map_err(|_| CtrError::WorkerPanicked { worker }))
            .collect::<Result<Vec<_>, _>>()
    });

    match joined {
        Ok(result) => result,
        Err(_) => Err(CtrError::PoolPanicked),
    }
}

fn run_worker<'a, H: WorkerHandle<'a>>(
    handle: H,
    chunk: WorkerChunk<'_>,
    snapshot: &Block,
    loop_barrier: Option<WaitGroup>,
) -> WorkerCounters {
    let mut state = handle.enter();

    let first = chunk.first_block as u64;
    for (i, block) in chunk.bytes.chunks_exact_mut(BLOCK_LEN).enumerate() {
        state.xcrypt_block(snapshot, first + i as u64, block);
    }

    if let Some(barrier) = loop_barrier {
        barrier.wait();
    }

    let counters = WorkerCounters {
        worker_id: chunk.worker_id,
        blocks: (chunk.bytes.len() / BLOCK_LEN) as u64,
    };
    trace!(worker = counters.worker_id, blocks = counters.blocks, "worker done");
    counters
}

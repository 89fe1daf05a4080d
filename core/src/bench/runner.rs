//! bench/runner.rs
//! Drives the correctness gate and the timed sweep.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::bench::{report, BenchConfig, BenchRecord, SEQUENTIAL_LABEL};
use crate::crypto::{sequential_transform, CipherSession};
use crate::engine::Variant;
use crate::parallelism::ParallelismProfile;
use crate::telemetry::{throughput_mib_per_sec, Stage, TelemetryTimer};
use crate::types::CtrError;
use crate::utils::{fill_random, mib_to_bytes, random_bytes};
use crate::verify::verify_all;

/// Run the whole benchmark. A divergence in the gate returns before any timing.
pub fn run(config: &BenchConfig) -> Result<Vec<BenchRecord>, CtrError> {
    let profile = ParallelismProfile::dynamic();
    let threads = sweep_threads(&config.thread_counts, profile.max_workers);
    info!(
        max_workers = profile.max_workers,
        ?threads,
        sizes_mib = ?config.sizes_mib,
        "starting benchmark"
    );

    let mut timer = TelemetryTimer::new();
    if config.gate_len > 0 {
        timer.time(Stage::Verify, || correctness_gate(config, &threads))?;
        info!(elapsed_ms = timer.stage_times.get_ms(Stage::Verify), "correctness gate passed");
    }

    let mut records = Vec::new();
    for &size_mib in &config.sizes_mib {
        let bytes = mib_to_bytes(size_mib);
        if !profile.fits_in_memory(bytes as u64) {
            warn!(size_mib, available = profile.available_memory, "size exceeds available memory, skipping");
            continue;
        }
        let mut data = match allocate(bytes) {
            Ok(buf) => buf,
            Err(e) => {
                warn!(size_mib, error = %e, "skipping size");
                continue;
            }
        };
        fill_random(&mut data, config.seed);
        records.extend(bench_size(config, size_mib, &mut data, &threads)?);
    }
    timer.finish();

    if let Some(path) = &config.csv_path {
        report::write_csv(path, &records)?;
        info!(path = %path.display(), "CSV written");
    }
    if let Some(path) = &config.json_path {
        report::write_json(path, config, &records)?;
        info!(path = %path.display(), "JSON written");
    }
    info!(records = records.len(), elapsed_s = timer.elapsed().as_secs_f64(), "benchmark finished");
    Ok(records)
}

/// Requested worker counts, cut at the first one the host cannot run in parallel.
pub fn sweep_threads(requested: &[usize], max_workers: usize) -> Vec<usize> {
    requested.iter().copied().take_while(|&t| t <= max_workers).filter(|&t| t > 0).collect()
}

/// Every variant against the oracle on one pseudo-random buffer.
pub fn correctness_gate(config: &BenchConfig, threads: &[usize]) -> Result<(), CtrError> {
    let data = random_bytes(config.gate_len, config.seed);
    let threads = if threads.is_empty() { &[1][..] } else { threads };
    verify_all(&config.key, &config.iv, &data, threads)
}

fn allocate(bytes: usize) -> Result<Vec<u8>, CtrError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes).map_err(|_| CtrError::Allocation { bytes })?;
    buf.resize(bytes, 0);
    Ok(buf)
}

fn bench_size(
    config: &BenchConfig,
    size_mib: usize,
    data: &mut [u8],
    threads: &[usize],
) -> Result<Vec<BenchRecord>, CtrError> {
    let iterations = config.iterations_for(size_mib);
    info!(size_mib, iterations, "benchmarking size");

    let mut records = Vec::new();

    let seq = average(iterations, || {
        let mut session = CipherSession::new(&config.key, &config.iv)?;
        let start = Instant::now();
        sequential_transform(&mut session, &mut *data);
        Ok(start.elapsed())
    })?;
    records.push(record(size_mib, SEQUENTIAL_LABEL, 1, data.len(), seq));

    for &variant in &config.variants {
        for &workers in threads {
            let avg = time_variant(config, variant, data, workers, iterations)?;
            let rec = record(size_mib, variant.label(), workers, data.len(), avg);
            info!(
                size_mib,
                variant = %variant,
                workers,
                throughput = rec.throughput_mib_s,
                "measured"
            );
            records.push(rec);
        }
    }
    Ok(records)
}

fn time_variant(
    config: &BenchConfig,
    variant: Variant,
    data: &mut [u8],
    workers: usize,
    iterations: usize,
) -> Result<Duration, CtrError> {
    average(iterations, || {
        let mut session = CipherSession::new(&config.key, &config.iv)?;
        let start = Instant::now();
        variant.transform_with_workers(&mut session, &mut *data, workers)?;
        Ok(start.elapsed())
    })
}

fn average(iterations: usize, mut f: impl FnMut() -> Result<Duration, CtrError>) -> Result<Duration, CtrError> {
    let iterations = iterations.max(1);
    let mut total = Duration::ZERO;
    for _ in 0..iterations {
        total += f()?;
    }
    Ok(total / iterations as u32)
}

fn record(size_mib: usize, series: &str, threads: usize, bytes: usize, avg: Duration) -> BenchRecord {
    BenchRecord {
        size_mib,
        series: series.to_string(),
        threads,
        throughput_mib_s: throughput_mib_per_sec(bytes as u64, avg),
        time_secs: avg.as_secs_f64(),
    }
}

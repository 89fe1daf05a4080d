//! bench/mod.rs
//! Benchmark harness: correctness gate, size × worker × variant sweep, reports.

pub mod runner;
pub mod report;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    test_vectors, DEFAULT_BENCH_SIZES_MIB, DEFAULT_ITERATIONS, DEFAULT_THREAD_SWEEP, LARGE_ITERATIONS,
    LARGE_SIZE_MIB,
};
use crate::engine::Variant;

pub use report::{summarize, write_csv, write_json, BenchSummary, CSV_HEADER};
pub use runner::run;

/// Series label for the sequential oracle rows.
pub const SEQUENTIAL_LABEL: &str = "Sequential";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    pub sizes_mib: Vec<usize>,
    /// Sweep stops at the first count above the host's logical CPUs.
    pub thread_counts: Vec<usize>,
    /// Fixed iteration count; `None` picks by size.
    pub iterations: Option<usize>,
    pub variants: Vec<Variant>,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    pub seed: u64,
    /// Size of the correctness gate buffer in bytes; 0 skips the gate.
    pub gate_len: usize,
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes_mib: DEFAULT_BENCH_SIZES_MIB.to_vec(),
            thread_counts: DEFAULT_THREAD_SWEEP.to_vec(),
            iterations: None,
            variants: Variant::ALL.to_vec(),
            key: test_vectors::KEY_128.to_vec(),
            iv: test_vectors::IV.to_vec(),
            seed: 0x5eed,
            gate_len: crate::constants::GATE_BUFFER_LEN,
            csv_path: None,
            json_path: None,
        }
    }
}

impl BenchConfig {
    pub fn iterations_for(&self, size_mib: usize) -> usize {
        match self.iterations {
            Some(n) => n.max(1),
            None if size_mib >= LARGE_SIZE_MIB => LARGE_ITERATIONS,
            None => DEFAULT_ITERATIONS,
        }
    }
}

/// One measured point: average over the iterations of one size/series/threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchRecord {
    pub size_mib: usize,
    /// `Sequential` or a variant label.
    pub series: String,
    pub threads: usize,
    pub throughput_mib_s: f64,
    pub time_secs: f64,
}

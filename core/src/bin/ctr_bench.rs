//! ctr-bench
//!
//! Checks every parallel CTR variant against the sequential oracle, then times
//! them across buffer sizes and worker counts.
//!
//! # Example
//!
//! ```bash
//! # Default sweep (1/10/100 MiB, 1..16 workers), CSV report
//! ctr-bench --csv results.csv
//!
//! # Only the false-sharing and private variants, 4 and 8 workers
//! ctr-bench -s 32 -t 4,8 --variant private --variant false-sharing
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ctr_core::bench::{self, BenchConfig};
use ctr_core::engine::Variant;
use ctr_core::utils::decode_hex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parallel AES-CTR benchmark
#[derive(Parser, Debug)]
#[command(name = "ctr-bench")]
#[command(version, about, long_about = None)]
struct Args {
    /// Buffer sizes in MiB
    #[arg(short = 's', long = "size", value_delimiter = ',', default_value = "1,10,100")]
    sizes: Vec<usize>,

    /// Worker counts to sweep (cut at the number of logical CPUs)
    #[arg(short = 't', long = "threads", value_delimiter = ',', default_value = "1,2,4,8,16")]
    threads: Vec<usize>,

    /// Iterations per measurement. Defaults to 5, or 3 for sizes of 64 MiB and up.
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Variants to run (private, shared-round-key, false-sharing, relaxed). Defaults to all.
    #[arg(long = "variant")]
    variants: Vec<Variant>,

    /// AES key as hex (16, 24 or 32 bytes)
    #[arg(long, default_value = "2b7e151628aed2a6abf7158809cf4f3c")]
    key: String,

    /// Initial counter block as hex (16 bytes)
    #[arg(long, default_value = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff")]
    iv: String,

    /// Seed for the pseudo-random input
    #[arg(long, default_value = "24301")]
    seed: u64,

    /// Skip the correctness gate
    #[arg(long)]
    no_verify: bool,

    /// Write results as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write results and speedups as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,ctr_core=info,ctr_bench=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = BenchConfig {
        sizes_mib: args.sizes,
        thread_counts: args.threads,
        iterations: args.iterations,
        key: decode_hex(&args.key).context("parsing --key")?,
        iv: decode_hex(&args.iv).context("parsing --iv")?,
        seed: args.seed,
        csv_path: args.csv,
        json_path: args.json,
        ..BenchConfig::default()
    };
    if !args.variants.is_empty() {
        config.variants = args.variants;
    }
    if args.no_verify {
        config.gate_len = 0;
    }

    let records = bench::run(&config).context("benchmark aborted")?;

    for s in bench::summarize(&records) {
        info!(
            size_mib = s.size_mib,
            series = %s.series,
            threads = s.threads,
            speedup_vs_sequential = s.speedup_vs_sequential.unwrap_or(0.0),
            speedup_vs_one_thread = s.speedup_vs_one_thread.unwrap_or(0.0),
            "speedup"
        );
    }
    Ok(())
}

//! bench/report.rs
//! CSV / JSON output and derived speedups.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bench::{BenchConfig, BenchRecord, SEQUENTIAL_LABEL};
use crate::engine::Variant;
use crate::types::CtrError;

pub const CSV_HEADER: &str = "DataSize_MB,Type,Threads,Throughput_MB_s,Time_Seconds";

pub fn write_csv(path: &Path, records: &[BenchRecord]) -> Result<(), CtrError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_csv_to(&mut out, records)?;
    out.flush()?;
    Ok(())
}

pub fn write_csv_to<W: Write>(out: &mut W, records: &[BenchRecord]) -> Result<(), CtrError> {
    writeln!(out, "{CSV_HEADER}")?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{:.6},{:.6}",
            r.size_mib, r.series, r.threads, r.throughput_mib_s, r.time_secs
        )?;
    }
    Ok(())
}

/// Derived comparison for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSummary {
    pub size_mib: usize,
    pub series: String,
    pub threads: usize,
    pub speedup_vs_sequential: Option<f64>,
    /// Against the same series at 1 thread.
    pub speedup_vs_one_thread: Option<f64>,
    /// `time / private_time` at the same size and thread count; >1 means slower.
    pub slowdown_vs_private: Option<f64>,
}

/// Speedups for every non-sequential record.
pub fn summarize(records: &[BenchRecord]) -> Vec<BenchSummary> {
    let time_of = |size: usize, series: &str, threads: usize| {
        records
            .iter()
            .find(|r| r.size_mib == size && r.series == series && r.threads == threads)
            .map(|r| r.time_secs)
            .filter(|t| *t > 0.0)
    };

    records
        .iter()
        .filter(|r| r.series != SEQUENTIAL_LABEL)
        .map(|r| {
            let ratio = |base: Option<f64>| base.filter(|_| r.time_secs > 0.0).map(|b| b / r.time_secs);
            let private_label = Variant::Private.label();
            let slowdown_vs_private = if r.series == private_label {
                None
            } else {
                time_of(r.size_mib, private_label, r.threads).map(|p| r.time_secs / p)
            };
            BenchSummary {
                size_mib: r.size_mib,
                series: r.series.clone(),
                threads: r.threads,
                speedup_vs_sequential: ratio(time_of(r.size_mib, SEQUENTIAL_LABEL, 1)),
                speedup_vs_one_thread: ratio(time_of(r.size_mib, &r.series, 1)),
                slowdown_vs_private,
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    config: &'a BenchConfig,
    records: &'a [BenchRecord],
    summary: Vec<BenchSummary>,
}

pub fn write_json(path: &Path, config: &BenchConfig, records: &[BenchRecord]) -> Result<(), CtrError> {
    let report = JsonReport {
        generated_at: Utc::now(),
        config,
        records,
        summary: summarize(records),
    };
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &report)?;
    out.flush()?;
    Ok(())
}

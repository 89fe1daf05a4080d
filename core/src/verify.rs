//! verify.rs
//! Oracle comparison for the parallel variants.
//!
//! Every variant is run on a copy of the same input from the same key/iv and
//! compared byte for byte with `sequential_transform`. The final session
//! counters are compared too.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::MAX_REPORTED_MISMATCHES;
use crate::crypto::{sequential_transform, CipherSession, Counter};
use crate::engine::Variant;
use crate::types::CtrError;

/// One differing byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub offset: usize,
    pub expected: u8,
    pub actual: u8,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}: expected {:02x}, got {:02x}", self.offset, self.expected, self.actual)
    }
}

/// A variant whose output or final counter differs from the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub variant: Variant,
    pub workers: usize,
    pub len: usize,
    /// Every differing byte, not only the reported ones.
    pub total_mismatches: usize,
    /// First `MAX_REPORTED_MISMATCHES` differing bytes.
    pub first: Vec<Mismatch>,
    /// `(expected, actual)` final counters when they differ.
    pub counter: Option<(Counter, Counter)>,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {} workers on {} bytes: {} mismatched bytes",
            self.variant, self.workers, self.len, self.total_mismatches
        )?;
        if let Some(m) = self.first.first() {
            write!(f, " (first at {m})")?;
        }
        if let Some((expected, actual)) = &self.counter {
            write!(f, ", final counter {actual} != {expected}")?;
        }
        Ok(())
    }
}

/// Byte-wise comparison, keeping the first `MAX_REPORTED_MISMATCHES` differences.
///
/// Returns `(total, first)`. A length difference counts every missing byte as a
/// mismatch, with the missing side reported as 0.
pub fn compare(expected: &[u8], actual: &[u8]) -> (usize, Vec<Mismatch>) {
    let len = expected.len().max(actual.len());
    let mut total = 0;
    let mut first = Vec::new();

    for offset in 0..len {
        let e = expected.get(offset).copied();
        let a = actual.get(offset).copied();
        if e == a {
            continue;
        }
        total += 1;
        if first.len() < MAX_REPORTED_MISMATCHES {
            first.push(Mismatch {
                offset,
                expected: e.unwrap_or(0),
                actual: a.unwrap_or(0),
            });
        }
    }
    (total, first)
}

/// Oracle output and final counter for `data`.
pub fn oracle_output(key: &[u8], iv: &[u8], data: &[u8]) -> Result<(Vec<u8>, Counter), CtrError> {
    let mut session = CipherSession::new(key, iv)?;
    let mut out = data.to_vec();
    sequential_transform(&mut session, &mut out);
    Ok((out, session.counter))
}

/// Check one variant at one worker count against a precomputed oracle result.
pub fn check_against(
    variant: Variant,
    key: &[u8],
    iv: &[u8],
    data: &[u8],
    expected: &(Vec<u8>, Counter),
    workers: usize,
) -> Result<(), CtrError> {
    let mut session = CipherSession::new(key, iv)?;
    let mut out = data.to_vec();
    variant.transform_with_workers(&mut session, &mut out, workers)?;

    let (expected_bytes, expected_counter) = expected;
    let (total_mismatches, first) = compare(expected_bytes, &out);
    let counter = (session.counter != *expected_counter).then_some((*expected_counter, session.counter));

    if total_mismatches == 0 && counter.is_none() {
        return Ok(());
    }

    for m in &first {
        warn!(variant = %variant, workers, "mismatch at {m}");
    }
    Err(Divergence {
        variant,
        workers,
        len: data.len(),
        total_mismatches,
        first,
        counter,
    }
    .into())
}

/// Check one variant at one worker count.
pub fn verify_variant(variant: Variant, key: &[u8], iv: &[u8], data: &[u8], workers: usize) -> Result<(), CtrError> {
    let expected = oracle_output(key, iv, data)?;
    check_against(variant, key, iv, data, &expected, workers)
}

/// Check every variant at every worker count. Stops at the first divergence.
pub fn verify_all(key: &[u8], iv: &[u8], data: &[u8], worker_counts: &[usize]) -> Result<(), CtrError> {
    let expected = oracle_output(key, iv, data)?;
    for &workers in worker_counts {
        for variant in Variant::ALL {
            check_against(variant, key, iv, data, &expected, workers)?;
        }
    }
    info!(bytes = data.len(), ?worker_counts, "all variants match the oracle");
    Ok(())
}

//! Bounded discrete-log search for decrypted balances
//!
//! `read_balance` splits `[low, high]` into chunks scanned on a rayon pool.
//! The scan stops early on a match, on cancellation or when the deadline
//! passes; it never outlives the call.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use zether_core::{Point, PublicParams, Scalar, ZetherError, ZetherResult};

/// Exclusive upper bound on recoverable balances
pub const MAX_BALANCE: u64 = 1 << 32;

/// Steps between deadline and cancellation checks
const CHECK_INTERVAL: u64 = 1024;

/// Tuning for the balance scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Candidates walked sequentially by one task
    pub chunk_size: u64,
    /// Wall-clock budget for the whole scan
    pub timeout_ms: u64,
    /// Worker threads, `0` uses the global rayon pool
    pub threads: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1 << 16,
            timeout_ms: 60_000,
            threads: 0,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> ZetherResult<()> {
        if self.chunk_size == 0 {
            return Err(ZetherError::Config("chunk_size must be positive".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ZetherError::Config("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

/// Shared flag that aborts a running scan
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Find `b ∈ [low, high]` with `b·G == target`.
///
/// Requires `low ≤ high < 2^32`; anything else is `OutOfRange`.
pub fn read_balance(
    params: &PublicParams,
    target: &Point,
    low: u64,
    high: u64,
    config: &ScanConfig,
    cancel: &CancelToken,
) -> ZetherResult<u64> {
    config.validate()?;
    if low > high {
        return Err(ZetherError::OutOfRange(format!("empty interval [{}, {}]", low, high)));
    }
    if high >= MAX_BALANCE {
        return Err(ZetherError::OutOfRange(format!(
            "upper bound {} exceeds {}",
            high,
            MAX_BALANCE - 1
        )));
    }

    let deadline = Instant::now() + Duration::from_millis(config.timeout_ms);
    let chunks = (high - low) / config.chunk_size + 1;
    debug!(low, high, chunks, "scanning for balance");

    let scan = || {
        (0..chunks)
            .into_par_iter()
            .find_map_any(|k| scan_chunk(params.g(), target, low + k * config.chunk_size, high, config, deadline, cancel))
    };
    let outcome = if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| ZetherError::Config(e.to_string()))?
            .install(scan)
    } else {
        scan()
    };

    match outcome {
        Some(result) => result,
        None => {
            warn!(low, high, "balance not found in interval");
            Err(ZetherError::BalanceNotFound { low, high })
        }
    }
}

/// Walk one chunk; `Some` ends the whole scan
fn scan_chunk(
    g: Point,
    target: &Point,
    start: u64,
    high: u64,
    config: &ScanConfig,
    deadline: Instant,
    cancel: &CancelToken,
) -> Option<ZetherResult<u64>> {
    let end = start.saturating_add(config.chunk_size - 1).min(high);
    let mut current = g * Scalar::from(start);
    for candidate in start..=end {
        if (candidate - start) % CHECK_INTERVAL == 0 {
            if cancel.is_cancelled() {
                return Some(Err(ZetherError::ScanCancelled));
            }
            if Instant::now() >= deadline {
                return Some(Err(ZetherError::ScanTimeout));
            }
        }
        if current == *target {
            return Some(Ok(candidate));
        }
        current += g;
    }
    None
}

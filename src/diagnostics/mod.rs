/*!
 * Dispatch Call Counter
 * Lock-free dispatch volume accounting with periodic emission
 *
 * Exists only under the `perf-stats` feature; without it no counter,
 * increment, or call site is compiled at all.
 */

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::types::SyscallNumber;

/// Dispatches between emission lines unless overridden
pub const DEFAULT_EMISSION_INTERVAL: u64 = 100_000;

static CALL_COUNT: AtomicU64 = AtomicU64::new(0);
static EMISSION_INTERVAL: AtomicU64 = AtomicU64::new(DEFAULT_EMISSION_INTERVAL);

/// Count one dispatched syscall (lock-free)
///
/// # Performance
/// Hot path - relaxed ordering; the emission check only needs an
/// eventually-consistent total
#[inline(always)]
pub(crate) fn record(n: SyscallNumber) {
    let count = CALL_COUNT.fetch_add(1, Ordering::Relaxed) + 1;
    let interval = EMISSION_INTERVAL.load(Ordering::Relaxed);
    if interval != 0 && count % interval == 0 {
        // Observational only; a missing sink drops the line silently
        info!(target: "simshim::calls", "calls={} last_n={}", count, n);
    }
}

/// Cumulative dispatches since process start
#[inline]
pub fn call_count() -> u64 {
    CALL_COUNT.load(Ordering::Relaxed)
}

/// Set how many dispatches separate emission lines
///
/// Zero keeps counting but never emits.
pub fn set_emission_interval(interval: u64) {
    EMISSION_INTERVAL.store(interval, Ordering::Relaxed);
}

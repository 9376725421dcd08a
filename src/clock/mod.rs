/*!
 * Simulated Clock Mirror
 * Process-wide copy of the simulator's clock backing the local fast path
 */

use std::sync::atomic::{AtomicU64, Ordering};

const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MICRO: u64 = 1_000;

// Zero doubles as "no simulated time published yet"; the simulated epoch
// starts strictly after zero, so no real instant collides with the sentinel.
static SIMULATED_NANOS: AtomicU64 = AtomicU64::new(0);

/// Publish the simulator's current time in nanoseconds since the simulated
/// epoch
///
/// Written by the surrounding runtime whenever the clock advances; read on
/// every locally-handled time syscall.
#[inline]
pub fn set_nanos(nanos: u64) {
    SIMULATED_NANOS.store(nanos, Ordering::Relaxed);
}

/// Forget the mirrored time; time reads fall through to the simulator again
pub fn clear() {
    SIMULATED_NANOS.store(0, Ordering::Relaxed);
}

/// Mirrored simulated time, if the runtime has published one
#[inline]
pub fn nanos() -> Option<u64> {
    match SIMULATED_NANOS.load(Ordering::Relaxed) {
        0 => None,
        nanos => Some(nanos),
    }
}

/// Seconds and remaining nanoseconds, `timespec` style
#[inline]
pub(crate) fn split_timespec(nanos: u64) -> (i64, i64) {
    ((nanos / NANOS_PER_SEC) as i64, (nanos % NANOS_PER_SEC) as i64)
}

/// Seconds and remaining microseconds, `timeval` style
#[inline]
pub(crate) fn split_timeval(nanos: u64) -> (i64, i64) {
    (
        (nanos / NANOS_PER_SEC) as i64,
        ((nanos % NANOS_PER_SEC) / NANOS_PER_MICRO) as i64,
    )
}

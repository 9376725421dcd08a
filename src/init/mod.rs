/*!
 * Initialization Guard
 * Establishes per-thread and process-wide shim state before any dispatch
 */

use std::cell::Cell;
use std::sync::OnceLock;
use std::time::Instant;

use crate::context;
use crate::ipc;

/// Per-thread progress through the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThreadState {
    Uninit,
    InProgress,
    Ready,
}

thread_local! {
    // Const-initialized so the very first read on a thread is safe even
    // when it happens inside a trap handler
    static THREAD_STATE: Cell<ThreadState> = const { Cell::new(ThreadState::Uninit) };
}

static PROCESS_START: OnceLock<Instant> = OnceLock::new();

/// Instant the shim finished process-wide initialization
///
/// Established exactly once, on the first `ensure_init` anywhere in the
/// process; every later caller sees the same instant.
pub fn process_start() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

/// Establish shim state for the calling thread, idempotently
///
/// Safe to call concurrently from any number of threads (each owns its own
/// slot; the process-wide piece is a `OnceLock`) and re-entrantly from a
/// trap interrupting the guard itself: the nested call observes the
/// in-progress marker and returns, leaving the interrupted syscall on the
/// native path, which the trap mechanism covers for exactly this window.
pub fn ensure_init() {
    THREAD_STATE.with(|state| match state.get() {
        ThreadState::Ready | ThreadState::InProgress => {}
        ThreadState::Uninit => {
            state.set(ThreadState::InProgress);
            let _ = process_start();
            // Fault the context slot in now, while nothing is trapped
            let _ = context::current();
            ipc::acquire_thread_channel();
            state.set(ThreadState::Ready);
        }
    });
}

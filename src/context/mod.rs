/*!
 * Execution Context Tracker
 * Per-thread record of whose code is currently running
 */

use std::cell::Cell;
use std::marker::PhantomData;

/// Whose code the calling thread is currently executing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Managed application code
    Application,
    /// Simulator-internal code sharing the address space
    Shadow,
}

thread_local! {
    // Const-initialized so a trap taken before any explicit swap still reads
    // a defined value. Thread bootstrap is simulator-internal code, hence
    // the Shadow default.
    static CURRENT: Cell<ExecutionContext> = const { Cell::new(ExecutionContext::Shadow) };
}

/// Context the calling thread is executing in right now
#[inline]
pub fn current() -> ExecutionContext {
    CURRENT.with(Cell::get)
}

/// Swap the calling thread into `ctx` until the guard drops
///
/// Used by the surrounding runtime at region boundaries; the dispatch core
/// itself only ever reads.
#[must_use = "the previous context is restored when the guard drops"]
pub fn enter(ctx: ExecutionContext) -> ContextGuard {
    let previous = CURRENT.with(|current| current.replace(ctx));
    ContextGuard {
        previous,
        _not_send: PhantomData,
    }
}

/// Restores the previous execution context on drop
pub struct ContextGuard {
    previous: ExecutionContext,
    // Pins the guard to the thread whose slot it swapped
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT.with(|current| current.set(self.previous));
    }
}

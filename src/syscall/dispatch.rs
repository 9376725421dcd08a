/*!
 * Syscall Dispatcher
 * Per-call routing between local, emulated, and native handling
 */

use log::{error, trace};

use crate::context::ExecutionContext;
use crate::core::types::SyscallNumber;
#[cfg(feature = "perf-stats")]
use crate::diagnostics;
use crate::init;
use crate::ipc;
use crate::syscall::types::{SyscallArgs, SyscallResult, TrappedContext};
use crate::syscall::{emulated, local, native, numbers};

/// Handling strategy chosen for one syscall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Resolved from state mirrored in the shim's address space
    Local,
    /// Emulated by the simulator over the thread's IPC channel
    Emulated,
    /// Issued directly for the kernel or the trap mechanism to handle
    Native,
}

/// Routing decision, first match wins
///
/// Pure so the branch logic is testable without channels or diagnostics:
/// 1. application code whose call the local table resolved stays local;
/// 2. application code, or any context making a simulator-bound call,
///    goes to the simulator when the thread has a channel;
/// 3. everything else is issued natively.
#[inline]
#[must_use]
pub fn route(
    exe_ctx: ExecutionContext,
    handled_locally: bool,
    simulator_bound: bool,
    channel_open: bool,
) -> Route {
    if exe_ctx == ExecutionContext::Application && handled_locally {
        Route::Local
    } else if (exe_ctx == ExecutionContext::Application || simulator_bound) && channel_open {
        Route::Emulated
    } else {
        Route::Native
    }
}

/// Dispatch one trapped or explicitly-invoked syscall
///
/// The sole entry point the trap/interception layer uses. Establishes shim
/// state if this thread has none yet, applies [`route`], runs the chosen
/// path, and returns the result exactly as the kernel would have. A failed
/// emulated round trip after routing chose emulation aborts the managed
/// process: retrying or falling back to the kernel would break simulated
/// ordering or duplicate side effects.
///
/// # Safety
/// `args` must hold the call's real arguments; the chosen handler may
/// dereference pointer-typed arguments or hand them to the kernel.
pub unsafe fn dispatch_syscall(
    ctx: &mut TrappedContext<'_>,
    exe_ctx: ExecutionContext,
    n: SyscallNumber,
    args: &SyscallArgs,
) -> SyscallResult {
    init::ensure_init();

    let local = if exe_ctx == ExecutionContext::Application {
        local::try_handle(n, args)
    } else {
        None
    };

    let chosen = route(
        exe_ctx,
        local.is_some(),
        numbers::is_simulator_bound(n),
        ipc::channel_open(),
    );

    let rv = match (chosen, local) {
        (Route::Local, Some(rv)) => {
            trace!("handled syscall {} inside the shim; avoided inter-process overhead", n);
            rv
        }
        (Route::Emulated, _) => {
            trace!("asking the simulator to handle syscall {} over the IPC channel", n);
            match emulated::invoke_emulated_syscall(ctx, n, args) {
                Ok(rv) => rv,
                Err(err) => {
                    error!("IPC round trip for syscall {} failed: {}", n, err);
                    std::process::abort();
                }
            }
        }
        _ => {
            trace!(
                "issuing syscall {} directly; the trap mechanism or the kernel handles it",
                n
            );
            native::invoke_native_syscall(n, args)
        }
    };

    #[cfg(feature = "perf-stats")]
    diagnostics::record(n);

    rv
}

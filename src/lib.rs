/*!
 * simshim
 * Syscall dispatch core of the in-process interposition shim for a
 * discrete-event network simulator
 *
 * Every syscall the managed process attempts is routed to exactly one of
 * three handling strategies: resolved locally from mirrored state, emulated
 * by the simulator over the calling thread's IPC channel, or issued
 * natively for the kernel (or the out-of-band trap mechanism) to handle.
 * The routing decision sits on the critical path of every syscall, so the
 * hot path is lock-free and safe to run from a trap handler with partially
 * initialized thread state.
 */

pub mod clock;
pub mod context;
pub mod core;
#[cfg(feature = "perf-stats")]
pub mod diagnostics;
pub mod init;
pub mod ipc;
pub mod syscall;

// Re-exports
pub use context::{ContextGuard, ExecutionContext};
pub use init::ensure_init;
pub use ipc::{install_provider, ChannelProvider, LoopbackProvider, SyscallChannel};
pub use syscall::dispatch::dispatch_syscall;
pub use syscall::emulated::invoke_emulated_syscall;
pub use syscall::native::invoke_native_syscall;
pub use syscall::numbers::{install_simulator_syscalls, SyscallSet};
pub use syscall::types::{ShimError, SyscallArgs, SyscallRequest, SyscallResult, TrappedContext};

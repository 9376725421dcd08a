/*!
 * IPC-Emulated Syscall Invoker
 * Request/response rendezvous with the simulator over the thread's channel
 */

use crate::core::types::SyscallNumber;
use crate::ipc;
use crate::syscall::types::{ShimError, SyscallArgs, SyscallRequest, SyscallResult, TrappedContext};

/// Hand syscall `n` to the simulator for emulation and block for its reply
///
/// The reply value is returned unmodified, negative encodings included. A
/// thread with no usable channel gets `ChannelUnavailable`; the call is
/// never downgraded to native execution, which would silently break the
/// simulation's view of this process.
pub fn invoke_emulated_syscall(
    ctx: &mut TrappedContext<'_>,
    n: SyscallNumber,
    args: &SyscallArgs,
) -> Result<SyscallResult, ShimError> {
    let request = SyscallRequest::new(n, *args);
    ipc::with_channel(|channel| channel.exchange(ctx, &request))
        .unwrap_or_else(|| Err(ShimError::channel_unavailable(n)))
}

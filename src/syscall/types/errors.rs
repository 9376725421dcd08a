/*!
 * Shim Error Types
 * Local failures of the shim itself, distinct from kernel error returns
 */

use thiserror::Error;

use crate::core::types::SyscallNumber;

/// Failures local to the shim
///
/// A negative return value from the kernel or the simulator's emulation is
/// never one of these; it is a normal syscall result and flows back to the
/// caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShimError {
    /// An emulated-path call has no usable channel on this thread
    #[error("no IPC channel for this thread (syscall {0})")]
    ChannelUnavailable(SyscallNumber),

    /// The channel round trip itself failed
    #[error("IPC exchange for syscall {number} failed: {reason}")]
    ChannelExchange {
        number: SyscallNumber,
        reason: String,
    },

    /// Dispatch entered before required state was established
    #[error("dispatch entered before shim state was established")]
    Uninitialized,
}

impl ShimError {
    /// Create a channel unavailable error
    #[inline]
    pub fn channel_unavailable(number: SyscallNumber) -> Self {
        Self::ChannelUnavailable(number)
    }

    /// Create a channel exchange error
    #[inline]
    pub fn channel_exchange(number: SyscallNumber, reason: impl Into<String>) -> Self {
        Self::ChannelExchange {
            number,
            reason: reason.into(),
        }
    }
}

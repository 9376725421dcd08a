/*!
 * Core Types
 * Common aliases used across the shim
 */

/// Maximum number of argument registers a syscall carries on the supported
/// platforms.
pub const MAX_SYSCALL_ARGS: usize = 6;

/// Syscall number type (the kernel's `long`)
pub type SyscallNumber = i64;

/// Machine-word syscall argument
pub type Word = u64;

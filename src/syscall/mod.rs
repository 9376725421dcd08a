/*!
 * Syscall Dispatch
 * Routing decision and the three handling paths
 */

pub mod dispatch;
pub mod emulated;
pub mod local;
pub mod native;
pub mod numbers;
pub mod types;

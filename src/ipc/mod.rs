/*!
 * IPC Syscall Channel
 * Seam to the simulator process, one channel per thread
 */

pub mod channel;
pub mod loopback;

pub use channel::{
    clear_provider, detach_thread_channel, install_provider, ChannelProvider, SyscallChannel,
};
pub use loopback::LoopbackProvider;

pub(crate) use channel::{acquire_thread_channel, channel_open, with_channel};

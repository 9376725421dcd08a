/*!
 * IPC Channel Seam
 * Per-thread channels to the simulator, behind an installed provider
 */

use arc_swap::ArcSwapOption;
use std::cell::RefCell;
use std::sync::Arc;

use crate::syscall::types::{ShimError, SyscallRequest, SyscallResult, TrappedContext};

/// Blocking request/response transport to the simulator
///
/// One instance per thread, owned by that thread for its whole lifetime.
/// The shared-memory framing behind `exchange` belongs to the transport,
/// not to this crate.
pub trait SyscallChannel: Send {
    /// Send one request and block until the simulator replies
    fn exchange(
        &mut self,
        ctx: &mut TrappedContext<'_>,
        request: &SyscallRequest,
    ) -> Result<SyscallResult, ShimError>;
}

/// Hands out one channel per thread
pub trait ChannelProvider: Send + Sync {
    /// Channel for the calling thread, or `None` when the transport cannot
    /// serve it; dispatch then stays on the native path
    fn channel_for_thread(&self) -> Option<Box<dyn SyscallChannel>>;
}

// Read-mostly: swapped at bootstrap, loaded lock-free on every dispatch
static PROVIDER: ArcSwapOption<Arc<dyn ChannelProvider>> = ArcSwapOption::const_empty();

thread_local! {
    static THREAD_CHANNEL: RefCell<Option<Box<dyn SyscallChannel>>> = const { RefCell::new(None) };
}

/// Install the transport that hands out per-thread channels; replaces any
/// previously installed one
pub fn install_provider(provider: Arc<dyn ChannelProvider>) {
    PROVIDER.store(Some(Arc::new(provider)));
}

/// Remove the installed transport
///
/// Threads keep channels they already hold; only future acquisitions fail.
pub fn clear_provider() {
    PROVIDER.store(None);
}

/// Drop the calling thread's channel, if any; the next dispatch asks the
/// installed provider for a fresh one
pub fn detach_thread_channel() {
    THREAD_CHANNEL.with(|slot| {
        if let Ok(mut channel) = slot.try_borrow_mut() {
            *channel = None;
        }
    });
}

fn provider() -> Option<Arc<dyn ChannelProvider>> {
    PROVIDER.load_full().map(|provider| (*provider).clone())
}

/// Whether the calling thread holds, or can lazily obtain, a usable channel
///
/// A thread re-entering dispatch from a trap taken mid-exchange finds its
/// own channel busy and reports it unusable, which keeps the nested call on
/// the native path where the trap mechanism covers it.
#[inline]
pub(crate) fn channel_open() -> bool {
    THREAD_CHANNEL.with(|slot| {
        let Ok(mut channel) = slot.try_borrow_mut() else {
            return false;
        };
        if channel.is_none() {
            *channel = provider().and_then(|provider| provider.channel_for_thread());
        }
        channel.is_some()
    })
}

/// Run `f` with the thread's channel, acquiring one first if needed
///
/// The channel stays borrowed for the whole rendezvous, so a nested dispatch
/// on this thread sees it as unavailable rather than corrupting an exchange
/// in flight.
pub(crate) fn with_channel<R>(f: impl FnOnce(&mut dyn SyscallChannel) -> R) -> Option<R> {
    THREAD_CHANNEL.with(|slot| {
        let mut channel = slot.try_borrow_mut().ok()?;
        if channel.is_none() {
            *channel = provider().and_then(|provider| provider.channel_for_thread());
        }
        let channel = channel.as_deref_mut()?;
        Some(f(channel))
    })
}

/// First acquisition attempt for this thread, run by the initialization
/// guard; later dispatches retry lazily if the provider appeared since
pub(crate) fn acquire_thread_channel() {
    let _ = channel_open();
}

/*!
 * Initialization Guard Tests
 * Idempotence across repeated and concurrent calls
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use pretty_assertions::assert_eq;
use serial_test::serial;

use simshim::{
    ensure_init, init, install_provider, ipc, ChannelProvider, ShimError, SyscallChannel,
    SyscallRequest, SyscallResult, TrappedContext,
};

/// Counts how many channels it has handed out
struct CountingProvider {
    handed_out: AtomicUsize,
}

impl ChannelProvider for CountingProvider {
    fn channel_for_thread(&self) -> Option<Box<dyn SyscallChannel>> {
        self.handed_out.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(IdleChannel))
    }
}

struct IdleChannel;

impl SyscallChannel for IdleChannel {
    fn exchange(
        &mut self,
        _ctx: &mut TrappedContext<'_>,
        _request: &SyscallRequest,
    ) -> Result<SyscallResult, ShimError> {
        Ok(SyscallResult::new(0))
    }
}

#[test]
#[serial]
fn test_one_initialization_per_thread_and_per_process() {
    ipc::clear_provider();
    let provider = Arc::new(CountingProvider {
        handed_out: AtomicUsize::new(0),
    });
    install_provider(provider.clone());

    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));
    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let barrier = Arc::clone(&barrier);
        handles.push(std::thread::spawn(move || {
            barrier.wait();
            for _ in 0..100 {
                ensure_init();
            }
            init::process_start()
        }));
    }
    let starts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // One channel acquisition per thread, despite 100 guard calls each
    assert_eq!(provider.handed_out.load(Ordering::SeqCst), THREADS);
    // One process-wide initialization, observed identically everywhere
    assert!(starts.windows(2).all(|pair| pair[0] == pair[1]));

    ipc::clear_provider();
}

#[test]
#[serial]
fn test_guard_is_idempotent_on_one_thread() {
    ensure_init();
    let first = init::process_start();
    ensure_init();
    assert_eq!(first, init::process_start());
}

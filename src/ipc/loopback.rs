/*!
 * Loopback Transport
 * In-process channels answering from a caller-supplied responder
 *
 * Lets an embedder run the simulator inside the managed process, and gives
 * tests a channel whose traffic they can inspect.
 */

use parking_lot::Mutex;
use std::sync::Arc;

use super::channel::{ChannelProvider, SyscallChannel};
use crate::syscall::types::{ShimError, SyscallRequest, SyscallResult, TrappedContext};

type Responder = dyn Fn(&SyscallRequest) -> SyscallResult + Send + Sync;

/// Provider whose channels answer synchronously from one shared responder
///
/// Every request is journaled in arrival order before the responder runs,
/// so callers can assert on exactly what crossed the channel.
pub struct LoopbackProvider {
    responder: Arc<Responder>,
    journal: Arc<Mutex<Vec<SyscallRequest>>>,
}

impl LoopbackProvider {
    pub fn new(
        responder: impl Fn(&SyscallRequest) -> SyscallResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Arc::new(responder),
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request exchanged so far, in arrival order
    pub fn requests(&self) -> Vec<SyscallRequest> {
        self.journal.lock().clone()
    }

    /// Number of requests exchanged so far
    pub fn request_count(&self) -> usize {
        self.journal.lock().len()
    }

    /// Forget the journal without touching live channels
    pub fn clear_requests(&self) {
        self.journal.lock().clear();
    }
}

impl ChannelProvider for LoopbackProvider {
    fn channel_for_thread(&self) -> Option<Box<dyn SyscallChannel>> {
        Some(Box::new(LoopbackChannel {
            responder: Arc::clone(&self.responder),
            journal: Arc::clone(&self.journal),
        }))
    }
}

struct LoopbackChannel {
    responder: Arc<Responder>,
    journal: Arc<Mutex<Vec<SyscallRequest>>>,
}

impl SyscallChannel for LoopbackChannel {
    fn exchange(
        &mut self,
        _ctx: &mut TrappedContext<'_>,
        request: &SyscallRequest,
    ) -> Result<SyscallResult, ShimError> {
        self.journal.lock().push(*request);
        Ok((self.responder)(request))
    }
}

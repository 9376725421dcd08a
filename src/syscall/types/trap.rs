/*!
 * Trapped Context
 * Register-state capture forwarded through dispatch untouched
 */

use std::fmt;

/// CPU state of the interrupted thread at the moment of interception
///
/// Borrowed for the duration of one dispatch and handed through to whichever
/// invoker runs the call; the dispatcher never looks inside. Calls that do
/// not originate from a trap carry a detached capture.
pub struct TrappedContext<'a> {
    ucontext: Option<&'a mut libc::ucontext_t>,
}

impl<'a> TrappedContext<'a> {
    /// Wrap the register state delivered to a trap handler
    #[inline]
    pub fn from_ucontext(ucontext: &'a mut libc::ucontext_t) -> Self {
        Self {
            ucontext: Some(ucontext),
        }
    }

    /// Capture for an explicitly-invoked syscall with no trap payload
    #[inline]
    pub fn detached() -> TrappedContext<'static> {
        TrappedContext { ucontext: None }
    }

    /// The trapped register file, when one was captured
    #[inline]
    pub fn ucontext(&mut self) -> Option<&mut libc::ucontext_t> {
        self.ucontext.as_deref_mut()
    }

    /// Whether this capture carries trap state
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.ucontext.is_none()
    }
}

impl fmt::Debug for TrappedContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrappedContext")
            .field("detached", &self.is_detached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_capture_has_no_register_file() {
        let mut ctx = TrappedContext::detached();
        assert!(ctx.is_detached());
        assert!(ctx.ucontext().is_none());
    }
}

//! Single-producer / single-consumer buffer-ready flag.
//!
//! The completion handler is the only writer of `true`; the consumer is the
//! only writer of `false`. Setting uses `Release` so everything the handler
//! did before (bumping the completion sequence) is visible to a consumer that
//! observes the flag with `Acquire`. On Cortex-M7 both compile to a `dmb`
//! around the access, which also orders the CPU against the DMA writes into
//! non-cacheable memory.

use core::sync::atomic::{AtomicBool, Ordering};

/// Buffer-ready handshake between interrupt and foreground context
#[derive(Debug)]
pub struct ReadyFlag {
    ready: AtomicBool,
}

impl ReadyFlag {
    /// Create a cleared flag (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }

    /// Mark a buffer ready. Completion handler only.
    #[inline(always)]
    pub fn set(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Observe the flag without clearing it.
    #[inline(always)]
    pub fn is_set(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether it was set. Consumer only.
    ///
    /// Clearing happens before the consumer copies the buffer, so a
    /// completion that lands during the copy sets the flag again and is seen
    /// on the next poll.
    #[inline(always)]
    pub fn take(&self) -> bool {
        self.ready.swap(false, Ordering::AcqRel)
    }
}

impl Default for ReadyFlag {
    fn default() -> Self {
        Self::new()
    }
}

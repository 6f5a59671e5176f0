//! What the consumer does while no buffer is ready.
//!
//! A [`WaitStrategy`] may return for any reason: `wfi` resumes on any
//! pending interrupt, not just the DMA one. Callers always re-check the
//! ready flag after [`WaitStrategy::wait`] returns.

/// Idle behavior between polls of the ready flag
pub trait WaitStrategy {
    /// Pause until something may have changed.
    fn wait(&mut self);
}

/// Busy-wait with a spin-loop hint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl WaitStrategy for Spin {
    #[inline(always)]
    fn wait(&mut self) {
        core::hint::spin_loop();
    }
}

/// Halt the core until the next interrupt.
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
#[cfg_attr(docsrs, doc(cfg(feature = "cortex-m")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Wfi;

#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
impl WaitStrategy for Wfi {
    #[inline(always)]
    fn wait(&mut self) {
        cortex_m::asm::wfi();
    }
}

/// Yield the host thread (simulation).
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldThread;

#[cfg(feature = "std")]
impl WaitStrategy for YieldThread {
    #[inline]
    fn wait(&mut self) {
        std::thread::yield_now();
    }
}

//! DMA-written sample buffer.
//!
//! [`SampleBuffer`] is the memory region the transfer engine fills. It is
//! aligned to the Cortex-M7 cache line and is meant to live in a
//! non-cacheable section (see [`crate::pipeline_static!`]); if it does not,
//! the consumer must invalidate it before every copy (see
//! [`crate::hal::cache`]).
//!
//! Elements are `AtomicU16` so that a copy racing a hardware (or simulated)
//! write is a torn read, never undefined behavior. `AtomicU16` has the layout
//! of `u16`, so the DMA engine sees a plain `[u16; N]`.

use core::sync::atomic::{AtomicU16, Ordering};

/// One ADC sample as stored by the transfer engine
pub type Sample = u16;

/// Fixed-capacity, cache-line aligned sample buffer written by DMA.
#[repr(C, align(32))]
pub struct SampleBuffer<const N: usize> {
    samples: [AtomicU16; N],
}

impl<const N: usize> SampleBuffer<N> {
    /// Create a zeroed buffer. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: [const { AtomicU16::new(0) }; N],
        }
    }

    /// Capacity in samples
    #[inline(always)]
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the buffer has zero capacity
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Base address handed to the transfer engine
    #[inline(always)]
    pub fn address(&self) -> usize {
        self.samples.as_ptr() as usize
    }

    /// Size in bytes
    #[inline(always)]
    pub const fn byte_len(&self) -> usize {
        N * core::mem::size_of::<Sample>()
    }

    /// Read one sample as it is right now.
    ///
    /// The value may be replaced by the engine at any moment; use a consumer
    /// copy for anything that needs a stable view.
    #[inline]
    pub fn peek(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).map(|s| s.load(Ordering::Relaxed))
    }

    /// Copy the whole buffer into `out`.
    ///
    /// Element loads are relaxed; ordering against the completion that made
    /// the buffer ready comes from the acquire on the ready flag.
    pub(crate) fn copy_into(&self, out: &mut [Sample; N]) {
        for (dst, src) in out.iter_mut().zip(self.samples.iter()) {
            *dst = src.load(Ordering::Relaxed);
        }
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::constants::CACHE_LINE_SIZE;

    fn write(buffer: &SampleBuffer<4>, index: usize, value: Sample) {
        buffer.samples[index].store(value, Ordering::Relaxed);
    }

    #[test]
    fn new_buffer_is_zeroed() {
        let buffer: SampleBuffer<8> = SampleBuffer::new();
        assert_eq!(buffer.len(), 8);
        assert!(!buffer.is_empty());
        for i in 0..8 {
            assert_eq!(buffer.peek(i), Some(0));
        }
    }

    #[test]
    fn buffer_is_cache_line_aligned() {
        assert_eq!(core::mem::align_of::<SampleBuffer<20>>(), CACHE_LINE_SIZE);
        let buffer: SampleBuffer<20> = SampleBuffer::new();
        assert_eq!(buffer.address() % CACHE_LINE_SIZE, 0);
    }

    #[test]
    fn layout_matches_plain_samples() {
        assert_eq!(core::mem::size_of::<AtomicU16>(), core::mem::size_of::<Sample>());
        let buffer: SampleBuffer<20> = SampleBuffer::new();
        assert_eq!(buffer.byte_len(), 40);
    }

    #[test]
    fn peek_out_of_range_is_none() {
        let buffer: SampleBuffer<4> = SampleBuffer::new();
        assert_eq!(buffer.peek(4), None);
    }

    #[test]
    fn copy_into_takes_current_values() {
        let buffer: SampleBuffer<4> = SampleBuffer::new();
        for i in 0..4 {
            write(&buffer, i, (i as Sample + 1) * 10);
        }

        let mut out = [0; 4];
        buffer.copy_into(&mut out);
        assert_eq!(out, [10, 20, 30, 40]);
    }
}

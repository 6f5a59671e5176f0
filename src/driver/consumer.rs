//! Foreground consumer of completed buffers.
//!
//! The [`Consumer`] is the only reader of the shared buffer and the only
//! writer of `false` to the ready flag. Each capture clears the flag first,
//! then copies the whole buffer into a private [`WorkingCopy`] that the
//! application may process for as long as it likes.
//!
//! The transfer engine keeps writing the shared buffer while the copy runs,
//! so a copy can mix samples from two cycles.
//! [`WorkingCopy::completed_during_copy`] reports only that a completion
//! landed between taking the flag and finishing the copy. The engine starts
//! refilling the buffer as soon as it is re-armed, so a copy begun after the
//! first sample of the next cycle can be mixed with the flag still clear.

use core::ops::{ControlFlow, Deref};
use core::sync::atomic::{Ordering, fence};

use crate::driver::buffer::Sample;
use crate::driver::pipeline::PipelineContext;
use crate::hal::cache::{CacheMaintenance, NonCacheable};
use crate::hal::wait::WaitStrategy;

/// Private copy of one completed buffer plus its capture metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingCopy<const N: usize> {
    samples: [Sample; N],
    sequence: u32,
    missed: u32,
    completed_during_copy: bool,
}

impl<const N: usize> WorkingCopy<N> {
    const fn new() -> Self {
        Self {
            samples: [0; N],
            sequence: 0,
            missed: 0,
            completed_during_copy: false,
        }
    }

    /// The copied samples
    #[inline(always)]
    pub fn samples(&self) -> &[Sample; N] {
        &self.samples
    }

    /// Completion count at the time of the copy (1 for the first buffer)
    #[inline(always)]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Completions since the previous copy that were never copied
    #[inline(always)]
    pub fn missed(&self) -> u32 {
        self.missed
    }

    /// Another completion landed while this copy was being taken.
    ///
    /// When set, the samples certainly span two cycles. When clear, they may
    /// still do so if the engine had already refilled part of the buffer.
    #[inline(always)]
    pub fn completed_during_copy(&self) -> bool {
        self.completed_during_copy
    }

    /// First sample of the buffer
    pub fn first(&self) -> Option<Sample> {
        self.samples.first().copied()
    }

    /// Last sample of the buffer
    pub fn last(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    /// Reduce the copy to a few statistics
    pub fn summary(&self) -> BufferSummary {
        let mut min = Sample::MAX;
        let mut max = Sample::MIN;
        let mut sum: u32 = 0;
        for &s in &self.samples {
            min = min.min(s);
            max = max.max(s);
            sum += u32::from(s);
        }

        BufferSummary {
            sequence: self.sequence,
            first: self.first().unwrap_or(0),
            last: self.last().unwrap_or(0),
            min,
            max,
            mean: (sum / N as u32) as Sample,
        }
    }
}

impl<const N: usize> Deref for WorkingCopy<N> {
    type Target = [Sample];

    fn deref(&self) -> &[Sample] {
        &self.samples
    }
}

/// Statistics of one working copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferSummary {
    /// Sequence of the copy this summarizes
    pub sequence: u32,
    /// First sample
    pub first: Sample,
    /// Last sample
    pub last: Sample,
    /// Smallest sample
    pub min: Sample,
    /// Largest sample
    pub max: Sample,
    /// Integer mean
    pub mean: Sample,
}

impl BufferSummary {
    /// Emit the first and last sample on the enabled logging backend.
    pub fn log(&self) {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "buffer {}: first = {}, last = {}",
            self.sequence,
            self.first,
            self.last
        );
        #[cfg(feature = "log")]
        log::info!(
            "buffer {}: first = {}, last = {}",
            self.sequence,
            self.first,
            self.last
        );
    }
}

/// Single consumer of a [`PipelineContext`].
///
/// Returned once by [`PipelineContext::initialize_and_arm`]. It is not
/// `Clone`, so there is never a second reader of the buffer.
///
/// # Type Parameters
/// * `N` - Samples per buffer
/// * `C` - Cache maintenance before each copy
pub struct Consumer<const N: usize, C: CacheMaintenance = NonCacheable> {
    ctx: &'static PipelineContext<N>,
    cache: C,
    copy: WorkingCopy<N>,
    last_sequence: u32,
    captures: u32,
}

impl<const N: usize> Consumer<N> {
    pub(crate) fn new(ctx: &'static PipelineContext<N>) -> Self {
        Self {
            ctx,
            cache: NonCacheable,
            copy: WorkingCopy::new(),
            last_sequence: 0,
            captures: 0,
        }
    }
}

impl<const N: usize, C: CacheMaintenance> Consumer<N, C> {
    /// Use `cache` to invalidate the buffer before each copy.
    ///
    /// Needed when the buffer is not in non-cacheable memory.
    pub fn with_cache_maintenance<C2: CacheMaintenance>(self, cache: C2) -> Consumer<N, C2> {
        Consumer {
            ctx: self.ctx,
            cache,
            copy: self.copy,
            last_sequence: self.last_sequence,
            captures: self.captures,
        }
    }

    /// The context this consumer reads from
    pub fn context(&self) -> &'static PipelineContext<N> {
        self.ctx
    }

    /// The most recent working copy (zeroed before the first capture)
    #[inline(always)]
    pub fn working_copy(&self) -> &WorkingCopy<N> {
        &self.copy
    }

    /// Number of buffers copied so far
    #[inline(always)]
    pub fn captures(&self) -> u32 {
        self.captures
    }

    /// Copy the buffer if a completion is pending.
    ///
    /// Clears the ready flag, then copies. Returns `false` without touching
    /// the working copy if nothing new completed since the last capture.
    pub fn try_capture(&mut self) -> bool {
        let ctx = self.ctx;
        if !ctx.ready_flag().take() {
            return false;
        }

        let start = ctx.completions();
        // A completion between the previous take and its sequence read
        // re-raises the flag for data that copy already covered.
        if self.captures > 0 && start == self.last_sequence {
            return false;
        }

        let buffer = ctx.buffer();
        self.cache.invalidate(buffer.address(), buffer.byte_len());
        buffer.copy_into(&mut self.copy.samples);
        // Sample loads must not move past the second count read
        fence(Ordering::Acquire);
        let end = ctx.completions();

        self.copy.sequence = start;
        self.copy.missed = start.wrapping_sub(self.last_sequence).saturating_sub(1);
        self.copy.completed_during_copy = end != start;
        self.last_sequence = start;
        self.captures = self.captures.wrapping_add(1);

        self.trace_capture();
        true
    }

    fn trace_capture(&self) {
        let copy = &self.copy;
        if copy.missed == 0 && !copy.completed_during_copy {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "buffer {}: missed {}, completed during copy {}",
            copy.sequence,
            copy.missed,
            copy.completed_during_copy
        );
        #[cfg(feature = "log")]
        log::trace!(
            "buffer {}: missed {}, completed during copy {}",
            copy.sequence,
            copy.missed,
            copy.completed_during_copy
        );
    }

    /// Non-blocking: the new working copy if a buffer was ready.
    pub fn poll(&mut self) -> Option<&WorkingCopy<N>> {
        if self.try_capture() {
            Some(&self.copy)
        } else {
            None
        }
    }

    /// Block on `wait` until a buffer is ready, then copy it.
    pub fn wait_next<W: WaitStrategy>(&mut self, wait: &mut W) -> &WorkingCopy<N> {
        while !self.try_capture() {
            wait.wait();
        }
        &self.copy
    }

    /// The foreground loop: wait, copy, hand the copy to `process`.
    ///
    /// Runs until `process` returns [`ControlFlow::Break`] and returns the
    /// number of buffers processed. On target this is the end of `main`;
    /// `process` never breaks there.
    pub fn run<W, F>(&mut self, wait: &mut W, mut process: F) -> u32
    where
        W: WaitStrategy,
        F: FnMut(&WorkingCopy<N>) -> ControlFlow<()>,
    {
        let mut processed = 0;
        loop {
            let copy = self.wait_next(wait);
            processed += 1;
            if process(copy).is_break() {
                return processed;
            }
        }
    }

    /// Wait for the next buffer without blocking the executor.
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn next_async(&mut self) -> &WorkingCopy<N> {
        loop {
            self.ctx.wait_ready().await;
            if self.try_capture() {
                break;
            }
        }
        &self.copy
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

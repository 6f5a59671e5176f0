//! Pipeline context: shared buffer, ready flag, and the completion handler.
//!
//! A [`PipelineContext`] holds everything both execution contexts touch. It
//! is created in a `static` (see [`crate::pipeline_static!`]) and lives for
//! the whole program:
//!
//! - start-up calls [`PipelineContext::initialize_and_arm`], which brings the
//!   ADC and DMA channel up and returns the single [`Consumer`];
//! - the DMA interrupt calls [`PipelineContext::handle_interrupt`] (or
//!   [`PipelineContext::on_transfer_complete`] when the HAL has already
//!   decoded the status), which marks the buffer ready and re-arms the
//!   channel.
//!
//! # Example
//!
//! ```ignore
//! imxrt_adc_stream::pipeline_static!(ADC_PIPELINE, 20);
//!
//! #[interrupt]
//! fn DMA3_DMA19() {
//!     // `dma` is the HAL's TransferEngine for eDMA channel 3
//!     ADC_PIPELINE.handle_interrupt(unsafe { &mut DMA });
//! }
//!
//! let mut consumer = ADC_PIPELINE
//!     .initialize_and_arm(&PipelineConfig::new(), &mut adc, &mut dma, &mut delay)
//!     .unwrap_or_else(|_| halt());
//!
//! consumer.run(&mut Wfi, |copy| {
//!     copy.summary().log();
//!     ControlFlow::Continue(())
//! });
//! ```

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use embedded_hal::delay::DelayNs;

use crate::driver::buffer::SampleBuffer;
use crate::driver::config::{PipelineConfig, State};
use crate::driver::consumer::Consumer;
use crate::driver::descriptor::TransferDescriptor;
use crate::driver::error::{ConfigError, Result, TransferResult};
use crate::driver::flag::ReadyFlag;
use crate::hal::calibration::Calibrator;
use crate::hal::source::SampleSource;
use crate::hal::transfer::{CompletionHandler, TransferEngine};
use crate::internal::constants::MAX_MAJOR_LOOP_COUNT;

#[cfg(feature = "async")]
use crate::sync::AtomicWaker;

/// State shared by the DMA completion handler and the consumer.
///
/// # Type Parameters
/// * `N` - Samples per completed buffer (DMA major loop length)
pub struct PipelineContext<const N: usize> {
    /// DMA destination
    buffer: SampleBuffer<N>,
    /// Buffer-ready handshake
    ready: ReadyFlag,
    /// Completed major loops since start
    completions: AtomicU32,
    /// Lifecycle state, a [`State`] discriminant
    state: AtomicU8,
    /// Woken by the handler for async consumers
    #[cfg(feature = "async")]
    waker: AtomicWaker,
}

impl<const N: usize> PipelineContext<N> {
    /// Create an idle context. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        const {
            assert!(
                N > 0 && N <= MAX_MAJOR_LOOP_COUNT,
                "buffer length must fit the DMA major loop counter"
            );
        }
        Self {
            buffer: SampleBuffer::new(),
            ready: ReadyFlag::new(),
            completions: AtomicU32::new(0),
            state: AtomicU8::new(State::Idle as u8),
            #[cfg(feature = "async")]
            waker: AtomicWaker::new(),
        }
    }

    /// The DMA destination buffer
    #[inline(always)]
    pub fn buffer(&self) -> &SampleBuffer<N> {
        &self.buffer
    }

    /// Whether a completed buffer is waiting for the consumer
    #[inline(always)]
    pub fn is_ready(&self) -> bool {
        self.ready.is_set()
    }

    /// Completed major loops since start (wraps)
    #[inline(always)]
    pub fn completions(&self) -> u32 {
        self.completions.load(Ordering::Acquire)
    }

    /// Current lifecycle state
    #[inline]
    pub fn state(&self) -> State {
        State::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn ready_flag(&self) -> &ReadyFlag {
        &self.ready
    }

    #[cfg(feature = "async")]
    pub(crate) fn waker(&self) -> &AtomicWaker {
        &self.waker
    }

    /// Descriptor moving `N` samples from `source` into this context's buffer.
    pub fn descriptor_for(&self, source: usize) -> TransferResult<TransferDescriptor> {
        TransferDescriptor::peripheral_to_memory(source, self.buffer.address(), N)
    }

    /// Bring the pipeline up and start sampling.
    ///
    /// Sequence: validate `config`, configure and calibrate the ADC, enable
    /// its DMA request, initialize and route the DMA channel, arm it with
    /// this context's descriptor, then trigger the first conversion.
    ///
    /// Any failure is fatal: it is reported once, the state becomes
    /// [`State::Failed`], nothing is armed, and every later call returns
    /// `AlreadyInitialized`.
    pub fn initialize_and_arm<S, E, D>(
        &'static self,
        config: &PipelineConfig,
        source: &mut S,
        engine: &mut E,
        delay: D,
    ) -> Result<Consumer<N>>
    where
        S: SampleSource,
        E: TransferEngine,
        D: DelayNs,
    {
        if self
            .state
            .compare_exchange(
                State::Idle as u8,
                State::Starting as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Err(ConfigError::AlreadyInitialized.into());
        }

        match self.bring_up(config, source, engine, delay) {
            Ok(()) => {
                self.state.store(State::Running as u8, Ordering::Release);

                #[cfg(feature = "defmt")]
                defmt::info!(
                    "ADC channel {} streaming to DMA channel {} ({} samples per buffer)",
                    config.source.channel,
                    config.dma_channel,
                    N
                );
                #[cfg(feature = "log")]
                log::info!(
                    "ADC channel {} streaming to DMA channel {} ({} samples per buffer)",
                    config.source.channel,
                    config.dma_channel,
                    N
                );

                Ok(Consumer::new(self))
            }
            Err(e) => {
                self.state.store(State::Failed as u8, Ordering::Release);

                #[cfg(feature = "defmt")]
                defmt::error!("ADC/DMA pipeline start failed: {}", e);
                #[cfg(feature = "log")]
                log::error!("ADC/DMA pipeline start failed: {e}");

                Err(e)
            }
        }
    }

    fn bring_up<S, E, D>(
        &'static self,
        config: &PipelineConfig,
        source: &mut S,
        engine: &mut E,
        delay: D,
    ) -> Result<()>
    where
        S: SampleSource,
        E: TransferEngine,
        D: DelayNs,
    {
        config.validate()?;

        source.configure(&config.source)?;
        Calibrator::with_timeout(delay, config.calibration_timeout_ms).calibrate(source)?;
        source.enable_dma_request(true);

        engine.init_channel(config.dma_channel, config.request_source)?;
        let descriptor = self.descriptor_for(source.result_register())?;
        // SAFETY: `self` is 'static and its buffer is written by no one but
        // this engine; the consumer only copies out of it.
        unsafe { engine.arm(&descriptor)? };

        source.start_conversion(config.source.channel);
        Ok(())
    }

    /// Completion handler body: mark the buffer ready, then re-arm at once.
    ///
    /// Interrupt context only. Bounded: two atomic stores, one counter
    /// increment, and the engine's restart.
    #[inline]
    pub fn on_transfer_complete<E: TransferEngine>(&self, engine: &mut E) {
        debug_assert!(
            engine
                .descriptor()
                .is_some_and(|d| d.destination() == self.buffer.address() && d.units() == N),
            "re-arming a channel that does not target this pipeline's buffer"
        );

        self.completions.fetch_add(1, Ordering::Relaxed);
        self.ready.set();
        engine.rearm();

        #[cfg(feature = "async")]
        self.waker.wake();
    }

    /// DMA interrupt entry: handle a pending major-loop completion, if any.
    ///
    /// Returns whether a completion was handled.
    #[inline]
    pub fn handle_interrupt<E: TransferEngine>(&self, engine: &mut E) -> bool {
        if engine.take_major_complete() {
            self.on_transfer_complete(engine);
            true
        } else {
            false
        }
    }
}

impl<const N: usize> Default for PipelineContext<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TransferEngine, const N: usize> CompletionHandler<E> for PipelineContext<N> {
    #[inline]
    fn on_complete(&self, engine: &mut E) {
        self.on_transfer_complete(engine);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

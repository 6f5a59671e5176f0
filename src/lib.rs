//! i.MX RT ADC Streaming Pipeline
//!
//! A `no_std`, `no_alloc` continuous sampling pipeline: ADC1 converts
//! back-to-back, an eDMA channel moves every result into a fixed buffer, and
//! the foreground loop copies each completed buffer out for processing.
//!
//! # Architecture
//!
//! Two execution contexts share one [`PipelineContext`]:
//!
//! 1. **Interrupt context**: the DMA major-loop interrupt runs the
//!    completion handler ([`PipelineContext::handle_interrupt`]), which sets
//!    the ready flag and immediately re-arms the channel. Nothing else.
//! 2. **Foreground context**: the [`Consumer`] waits for the flag, clears
//!    it, and copies the whole buffer into a private [`WorkingCopy`].
//!
//! The hardware is reached through two traits in [`hal`]:
//! [`SampleSource`] (the ADC) and [`TransferEngine`] (the DMA channel). A HAL
//! or board crate implements them; [`sim`] implements them on the host.
//!
//! ## Timing Contract
//!
//! The handler re-arms before returning, so the engine never stops between
//! buffers as long as the handler keeps up with one buffer per major loop.
//! The consumer is not part of that contract: if it is slow, intermediate
//! buffers are overwritten and it sees the latest one, once. Each
//! [`WorkingCopy`] reports how many buffers were skipped and whether a
//! completion landed during the copy.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting
//! - `log`: Enable `log` facade logging (hosted builds)
//! - `critical-section`: Enable the ISR-safe [`SharedEngine`] slot
//! - `async`: Enable [`Consumer::next_async`] with waker support
//! - `cortex-m`: Enable D-cache invalidation and `wfi` waiting
//! - `std`: Enable the threaded host simulation ([`sim::hosted`])
//!
//! # Example
//!
//! ```ignore
//! use core::ops::ControlFlow;
//! use imxrt_adc_stream::hal::Wfi;
//! use imxrt_adc_stream::{PipelineConfig, SharedEngine};
//!
//! imxrt_adc_stream::pipeline_static!(PIPELINE, 20);
//! static DMA: SharedEngine<board::AdcDmaChannel> = SharedEngine::new();
//!
//! #[entry]
//! fn main() -> ! {
//!     let (mut adc, mut channel, delay) = board::init();
//!
//!     let mut consumer = match PIPELINE.initialize_and_arm(
//!         &PipelineConfig::new(),
//!         &mut adc,
//!         &mut channel,
//!         delay,
//!     ) {
//!         Ok(consumer) => consumer,
//!         Err(_) => loop {},
//!     };
//!     DMA.install(channel);
//!
//!     consumer.run(&mut Wfi, |copy| {
//!         copy.summary().log();
//!         ControlFlow::Continue(())
//!     });
//!     loop {}
//! }
//!
//! #[interrupt]
//! fn DMA3_DMA19() {
//!     DMA.handle_interrupt(&PIPELINE);
//! }
//! ```
//!
//! # Memory Requirements
//!
//! With the default 20-sample buffer: 40 bytes of DMA-written memory padded
//! to two cache lines, plus a 40-byte working copy on the consumer's stack.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here and in Cargo.toml [lints].
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

#[cfg(feature = "std")]
extern crate std;

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod sim;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::buffer::{Sample, SampleBuffer};
pub use driver::config::{PipelineConfig, Resolution, SourceConfig, State};
pub use driver::consumer::{BufferSummary, Consumer, WorkingCopy};
pub use driver::descriptor::TransferDescriptor;
pub use driver::error::{
    ConfigError, ConfigResult, Error, Result, TransferError, TransferResult,
};
pub use driver::flag::ReadyFlag;
pub use driver::pipeline::PipelineContext;

pub use hal::{
    CacheMaintenance, CalibrationStatus, CompletionHandler, SampleSource, TransferEngine,
    WaitStrategy,
};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedEngine;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use sync::asynch::ReadyFuture;

/// Shared pipeline constants.
///
/// Defaults and hardware limits for i.MX RT1040 ADC1 and eDMA.
pub mod constants {
    pub use crate::internal::constants::{
        // Routing
        ADC_INPUT_CHANNELS,
        ADC1_DMAMUX_SOURCE,
        ADC1_R0_ADDR,
        // Geometry
        CACHE_LINE_SIZE,
        // Timing
        CALIBRATION_POLL_INTERVAL_US,
        CALIBRATION_TIMEOUT_MS,
        DEFAULT_ADC_CHANNEL,
        DEFAULT_BUFFER_LEN,
        DEFAULT_DMA_CHANNEL,
        DMA_CHANNEL_COUNT,
        DMAMUX_SOURCE_COUNT,
        MAX_MAJOR_LOOP_COUNT,
        SAMPLE_SIZE,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static [`PipelineContext`] in non-cacheable memory.
///
/// On ARM targets the static goes to the `.noncacheable` section, which the
/// linker script must map to a region the MPU marks non-cacheable and that
/// is zeroed at start-up (a zeroed context is an idle one). Elsewhere it is
/// an ordinary static.
///
/// The length defaults to [`constants::DEFAULT_BUFFER_LEN`].
///
/// # Examples
///
/// ```
/// imxrt_adc_stream::pipeline_static!(PIPELINE);
/// imxrt_adc_stream::pipeline_static!(WIDE, 64);
///
/// assert_eq!(PIPELINE.buffer().len(), 20);
/// assert_eq!(WIDE.buffer().len(), 64);
/// ```
#[macro_export]
macro_rules! pipeline_static {
    ($name:ident) => {
        $crate::pipeline_static!($name, $crate::constants::DEFAULT_BUFFER_LEN);
    };
    ($name:ident, $len:expr) => {
        #[cfg_attr(target_arch = "arm", unsafe(link_section = ".noncacheable"))]
        static $name: $crate::PipelineContext<{ $len }> = $crate::PipelineContext::new();
    };
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    pipeline_static!(DEFAULT_PIPELINE);
    pipeline_static!(SMALL_PIPELINE, 4);

    #[test]
    fn static_contexts_start_idle() {
        assert_eq!(DEFAULT_PIPELINE.state(), State::Idle);
        assert_eq!(DEFAULT_PIPELINE.buffer().len(), constants::DEFAULT_BUFFER_LEN);
        assert_eq!(SMALL_PIPELINE.buffer().len(), 4);
        assert_eq!(
            SMALL_PIPELINE.buffer().address() % constants::CACHE_LINE_SIZE,
            0
        );
    }

    #[test]
    fn error_display() {
        let e: Error = ConfigError::CalibrationFailed.into();
        assert!(e.to_string().starts_with("config: "));
    }
}

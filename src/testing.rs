//! Testing utilities and mock implementations
//!
//! Mocks for the hardware seams so the pipeline can be exercised on the host
//! without an ADC or eDMA controller.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::boxed::Box;

use crate::driver::config::SourceConfig;
use crate::driver::descriptor::TransferDescriptor;
use crate::driver::error::{ConfigError, Result};
use crate::driver::pipeline::PipelineContext;
use crate::hal::source::{CalibrationStatus, SampleSource};
use crate::hal::transfer::TransferEngine;
use crate::internal::constants::ADC1_R0_ADDR;

/// Leak a fresh pipeline context to get the `'static` borrow start-up needs.
pub fn leak_context<const N: usize>() -> &'static PipelineContext<N> {
    Box::leak(Box::new(PipelineContext::new()))
}

// =============================================================================
// Mock Sample Source
// =============================================================================

/// Mock ADC that records how the pipeline drives it
///
/// # Example
///
/// ```ignore
/// let mut adc = MockSource::new().calibrating_for(3);
/// Calibrator::new(MockDelay::new()).calibrate(&mut adc).unwrap();
/// assert_eq!(adc.calibrations_started, 1);
/// ```
#[derive(Debug)]
pub struct MockSource {
    /// Last configuration applied
    pub configured: Option<SourceConfig>,
    /// Number of `start_calibration` calls
    pub calibrations_started: u32,
    /// DMA request enable state
    pub dma_request: bool,
    /// Number of software triggers
    pub conversions_started: u32,
    /// Channel of the last software trigger
    pub started_channel: Option<u8>,
    /// Polls that still report `InProgress`
    busy_polls: Cell<u32>,
    /// Calibration ends with the failure flag
    fail_calibration: bool,
    /// Reported result register address
    result_register: usize,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            configured: None,
            calibrations_started: 0,
            dma_request: false,
            conversions_started: 0,
            started_channel: None,
            busy_polls: Cell::new(0),
            fail_calibration: false,
            result_register: ADC1_R0_ADDR,
        }
    }
}

impl MockSource {
    /// Create a mock ADC that calibrates immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `InProgress` for `polls` status reads before finishing
    pub fn calibrating_for(self, polls: u32) -> Self {
        self.busy_polls.set(polls);
        self
    }

    /// Finish calibration with the failure flag set
    pub fn failing_calibration(mut self) -> Self {
        self.fail_calibration = true;
        self
    }

    /// Report a different result register address
    pub fn with_result_register(mut self, address: usize) -> Self {
        self.result_register = address;
        self
    }
}

impl SampleSource for MockSource {
    fn configure(&mut self, config: &SourceConfig) -> Result<()> {
        self.configured = Some(*config);
        Ok(())
    }

    fn start_calibration(&mut self) {
        self.calibrations_started += 1;
    }

    fn calibration_status(&self) -> CalibrationStatus {
        let busy = self.busy_polls.get();
        if busy > 0 {
            self.busy_polls.set(busy - 1);
            CalibrationStatus::InProgress
        } else if self.fail_calibration {
            CalibrationStatus::Failed
        } else {
            CalibrationStatus::Done
        }
    }

    fn enable_dma_request(&mut self, enable: bool) {
        self.dma_request = enable;
    }

    fn result_register(&self) -> usize {
        self.result_register
    }

    fn start_conversion(&mut self, channel: u8) {
        self.conversions_started += 1;
        self.started_channel = Some(channel);
    }
}

// =============================================================================
// Mock Transfer Engine
// =============================================================================

/// Mock DMA channel that records calls and never touches memory
///
/// Completions are injected with [`MockEngine::complete_major_loop`].
#[derive(Default)]
pub struct MockEngine {
    /// `(channel, request_source)` from `init_channel`
    pub routed: Option<(u8, u8)>,
    /// Number of `arm` calls
    pub arm_count: u32,
    /// Number of `rearm` calls
    pub rearm_count: u32,
    /// Value of the watch check at the last re-arm
    pub ready_seen_at_rearm: bool,
    descriptor: Option<TransferDescriptor>,
    armed: bool,
    major_complete: bool,
    fail_init: bool,
    watch: Option<Box<dyn Fn() -> bool + Send>>,
}

impl MockEngine {
    /// Create a mock channel that initializes successfully
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `init_channel` with `TransferInitFailed`
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Evaluate `check` on every re-arm and keep the result in
    /// `ready_seen_at_rearm`
    pub fn watching(mut self, check: impl Fn() -> bool + Send + 'static) -> Self {
        self.watch = Some(Box::new(check));
        self
    }

    /// Simulate the channel finishing its major loop
    pub fn complete_major_loop(&mut self) {
        self.armed = false;
        self.major_complete = true;
    }
}

impl TransferEngine for MockEngine {
    fn init_channel(&mut self, channel: u8, request_source: u8) -> Result<()> {
        if self.fail_init {
            return Err(ConfigError::TransferInitFailed.into());
        }
        self.routed = Some((channel, request_source));
        Ok(())
    }

    unsafe fn arm(&mut self, descriptor: &TransferDescriptor) -> Result<()> {
        self.descriptor = Some(*descriptor);
        self.armed = true;
        self.arm_count += 1;
        Ok(())
    }

    fn rearm(&mut self) {
        if self.descriptor.is_some() {
            self.armed = true;
            self.rearm_count += 1;
            if let Some(check) = &self.watch {
                self.ready_seen_at_rearm = check();
            }
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn take_major_complete(&mut self) -> bool {
        core::mem::take(&mut self.major_complete)
    }

    fn descriptor(&self) -> Option<&TransferDescriptor> {
        self.descriptor.as_ref()
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Async Helpers
// =============================================================================

/// Wake counter behind a [`counting_waker`]
#[cfg(feature = "async")]
#[derive(Debug, Default)]
pub struct WakeCount(std::sync::atomic::AtomicUsize);

#[cfg(feature = "async")]
impl WakeCount {
    pub fn get(&self) -> usize {
        self.0.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "async")]
impl std::task::Wake for WakeCount {
    fn wake(self: std::sync::Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &std::sync::Arc<Self>) {
        self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

/// A waker that counts how often it is woken
#[cfg(feature = "async")]
pub fn counting_waker() -> (core::task::Waker, std::sync::Arc<WakeCount>) {
    let count = std::sync::Arc::new(WakeCount::default());
    (core::task::Waker::from(std::sync::Arc::clone(&count)), count)
}

/// Poll `future` once with `waker`
#[cfg(feature = "async")]
pub fn poll_once<F: core::future::Future>(
    future: core::pin::Pin<&mut F>,
    waker: &core::task::Waker,
) -> core::task::Poll<F::Output> {
    future.poll(&mut core::task::Context::from_waker(waker))
}

// =============================================================================
// Log Capture
// =============================================================================

/// `log` backend recording the level of every record, per test thread.
///
/// The logger is process-global, but each test runs on its own thread, so
/// records from tests running in parallel never mix.
#[cfg(feature = "log")]
pub mod captured_log {
    use std::cell::RefCell;
    use std::vec::Vec;

    std::thread_local! {
        static LEVELS: RefCell<Vec<log::Level>> = const { RefCell::new(Vec::new()) };
    }

    struct ThreadLogger;

    impl log::Log for ThreadLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            LEVELS.with(|levels| levels.borrow_mut().push(record.level()));
        }

        fn flush(&self) {}
    }

    static LOGGER: ThreadLogger = ThreadLogger;

    /// Install the capturing logger (once per process) and clear this
    /// thread's records.
    pub fn start() {
        // Fails only when already installed by another test
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
        LEVELS.with(|levels| levels.borrow_mut().clear());
    }

    /// Levels logged on this thread since [`start`]
    pub fn levels() -> Vec<log::Level> {
        LEVELS.with(|levels| levels.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_source_counts_busy_polls() {
        let source = MockSource::new().calibrating_for(2);
        assert_eq!(source.calibration_status(), CalibrationStatus::InProgress);
        assert_eq!(source.calibration_status(), CalibrationStatus::InProgress);
        assert_eq!(source.calibration_status(), CalibrationStatus::Done);
    }

    #[test]
    fn mock_source_failure_after_busy() {
        let source = MockSource::new().calibrating_for(1).failing_calibration();
        assert_eq!(source.calibration_status(), CalibrationStatus::InProgress);
        assert_eq!(source.calibration_status(), CalibrationStatus::Failed);
    }

    #[test]
    fn mock_engine_rearm_without_descriptor_is_noop() {
        let mut engine = MockEngine::new();
        engine.rearm();
        assert!(!engine.is_armed());
        assert_eq!(engine.rearm_count, 0);
    }

    #[test]
    fn mock_engine_completion_is_taken_once() {
        let mut engine = MockEngine::new();
        engine.complete_major_loop();
        assert!(engine.take_major_complete());
        assert!(!engine.take_major_complete());
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0);

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1_000_000);
        assert_eq!(delay.total_ms(), 1);
    }
}

//! ADC calibration helper
//!
//! Starts the converter's auto-calibration and polls it to completion with a
//! timeout. A failed or stuck calibration is fatal to the pipeline.

use embedded_hal::delay::DelayNs;

use crate::driver::error::{ConfigError, ConfigResult};
use crate::hal::source::{CalibrationStatus, SampleSource};
use crate::internal::constants::{CALIBRATION_POLL_INTERVAL_US, CALIBRATION_TIMEOUT_MS};

/// Polls ADC auto-calibration with a bounded wait
#[derive(Debug)]
pub struct Calibrator<D: DelayNs> {
    /// Delay provider
    delay: D,
    /// Calibration timeout in milliseconds
    timeout_ms: u32,
}

impl<D: DelayNs> Calibrator<D> {
    /// Create a calibrator with the default timeout
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            timeout_ms: CALIBRATION_TIMEOUT_MS,
        }
    }

    /// Create a calibrator with a custom timeout
    pub fn with_timeout(delay: D, timeout_ms: u32) -> Self {
        Self { delay, timeout_ms }
    }

    /// Run auto-calibration on `source`.
    ///
    /// Returns `CalibrationFailed` if the converter flags a failure, or
    /// `CalibrationTimeout` if it is still busy after the timeout.
    pub fn calibrate<S: SampleSource>(&mut self, source: &mut S) -> ConfigResult<()> {
        source.start_calibration();

        let max_iterations = self.timeout_ms.saturating_mul(1000) / CALIBRATION_POLL_INTERVAL_US;
        for _ in 0..=max_iterations {
            match source.calibration_status() {
                CalibrationStatus::Done => return Ok(()),
                CalibrationStatus::Failed => return Err(ConfigError::CalibrationFailed),
                CalibrationStatus::InProgress => {
                    self.delay.delay_us(CALIBRATION_POLL_INTERVAL_US);
                }
            }
        }

        Err(ConfigError::CalibrationTimeout)
    }

    /// Get the current timeout setting
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

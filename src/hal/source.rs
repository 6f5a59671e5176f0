//! Sample source (ADC) abstraction.
//!
//! The pipeline never touches ADC registers itself. A HAL or board crate
//! implements [`SampleSource`] for its converter; the pipeline drives it
//! through configure → calibrate → enable DMA request → single software
//! trigger, and from then on only the transfer engine reads it.

use crate::driver::config::SourceConfig;
use crate::driver::error::Result;

/// Progress of the ADC auto-calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationStatus {
    /// Calibration still running
    InProgress,
    /// Calibration finished successfully
    Done,
    /// Calibration finished with the failure flag set
    Failed,
}

/// A free-running analog-to-digital converter
pub trait SampleSource {
    /// Apply conversion settings (continuous mode, overwrite, resolution).
    fn configure(&mut self, config: &SourceConfig) -> Result<()>;

    /// Begin hardware auto-calibration.
    fn start_calibration(&mut self);

    /// Poll calibration progress.
    fn calibration_status(&self) -> CalibrationStatus;

    /// Raise a DMA request after each conversion instead of an interrupt.
    fn enable_dma_request(&mut self, enable: bool);

    /// Address of the result register the transfer engine reads.
    fn result_register(&self) -> usize;

    /// Software-trigger the first conversion on `channel`.
    ///
    /// Called exactly once; continuous mode keeps converting afterwards.
    fn start_conversion(&mut self, channel: u8);
}

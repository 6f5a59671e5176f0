//! Simulated ADC.

use crate::driver::buffer::Sample;
use crate::driver::config::SourceConfig;
use crate::driver::error::{ConfigError, Result};
use crate::hal::source::{CalibrationStatus, SampleSource};
use crate::internal::constants::{ADC_INPUT_CHANNELS, ADC1_R0_ADDR};

/// Produces the value of each simulated conversion
pub trait SampleGenerator {
    /// Next conversion result, before masking to the configured resolution.
    fn next_sample(&mut self) -> Sample;
}

impl<F: FnMut() -> Sample> SampleGenerator for F {
    fn next_sample(&mut self) -> Sample {
        self()
    }
}

/// Counts up by one per conversion: 0, 1, 2, ...
///
/// Makes every sample identify its position in the stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ramp {
    next: Sample,
}

impl Ramp {
    /// Ramp starting at `start`
    pub const fn starting_at(start: Sample) -> Self {
        Self { next: start }
    }
}

impl SampleGenerator for Ramp {
    fn next_sample(&mut self) -> Sample {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }
}

/// Host stand-in for ADC1 in continuous, DMA-request mode
#[derive(Debug)]
pub struct SimulatedAdc<G = Ramp> {
    config: Option<SourceConfig>,
    calibration: CalibrationStatus,
    calibration_ok: bool,
    dma_request: bool,
    channel: Option<u8>,
    conversions: u64,
    generator: G,
}

impl SimulatedAdc<Ramp> {
    /// ADC producing a ramp from zero
    pub fn new() -> Self {
        Self::with_generator(Ramp::default())
    }
}

impl Default for SimulatedAdc<Ramp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SampleGenerator> SimulatedAdc<G> {
    /// ADC producing values from `generator`
    pub fn with_generator(generator: G) -> Self {
        Self {
            config: None,
            calibration: CalibrationStatus::InProgress,
            calibration_ok: true,
            dma_request: false,
            channel: None,
            conversions: 0,
            generator,
        }
    }

    /// Make auto-calibration end with the failure flag
    pub fn failing_calibration(mut self) -> Self {
        self.calibration_ok = false;
        self
    }

    /// Whether a conversion result raises a DMA request
    pub fn dma_request_enabled(&self) -> bool {
        self.dma_request
    }

    /// Whether the first conversion has been triggered
    pub fn is_converting(&self) -> bool {
        self.channel.is_some()
    }

    /// Conversions performed so far
    pub fn conversions(&self) -> u64 {
        self.conversions
    }

    /// Run one conversion.
    ///
    /// Returns `None` until the first software trigger. After it, continuous
    /// mode converts on every call; without continuous mode only the
    /// triggered conversion happens.
    pub fn convert(&mut self) -> Option<Sample> {
        let (Some(config), Some(_)) = (self.config, self.channel) else {
            return None;
        };

        if !config.continuous && self.conversions > 0 {
            return None;
        }

        self.conversions += 1;
        Some(self.generator.next_sample() & config.resolution.max_value())
    }
}

impl<G: SampleGenerator> SampleSource for SimulatedAdc<G> {
    fn configure(&mut self, config: &SourceConfig) -> Result<()> {
        if config.channel >= ADC_INPUT_CHANNELS {
            return Err(ConfigError::InvalidChannel.into());
        }
        self.config = Some(*config);
        Ok(())
    }

    fn start_calibration(&mut self) {
        self.calibration = if self.calibration_ok {
            CalibrationStatus::Done
        } else {
            CalibrationStatus::Failed
        };
    }

    fn calibration_status(&self) -> CalibrationStatus {
        self.calibration
    }

    fn enable_dma_request(&mut self, enable: bool) {
        self.dma_request = enable;
    }

    fn result_register(&self) -> usize {
        ADC1_R0_ADDR
    }

    fn start_conversion(&mut self, channel: u8) {
        self.channel = Some(channel);
    }
}

//! Configuration types for the sampling pipeline

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    ADC_INPUT_CHANNELS, ADC1_DMAMUX_SOURCE, CALIBRATION_TIMEOUT_MS, DEFAULT_ADC_CHANNEL,
    DEFAULT_DMA_CHANNEL, DMA_CHANNEL_COUNT, DMAMUX_SOURCE_COUNT,
};

/// ADC conversion resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 8-bit conversion
    Bits8,
    /// 10-bit conversion
    Bits10,
    /// 12-bit conversion
    #[default]
    Bits12,
}

impl Resolution {
    /// Number of significant bits in a sample
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Resolution::Bits8 => 8,
            Resolution::Bits10 => 10,
            Resolution::Bits12 => 12,
        }
    }

    /// Largest value a sample can take at this resolution
    #[must_use]
    pub const fn max_value(self) -> u16 {
        ((1u32 << self.bits()) - 1) as u16
    }
}

/// Pipeline lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum State {
    /// Not started
    #[default]
    Idle = 0,
    /// Start-up sequence in progress
    Starting = 1,
    /// Channel armed, ADC converting
    Running = 2,
    /// Start-up failed; the pipeline will not run
    Failed = 3,
}

impl State {
    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => State::Starting,
            2 => State::Running,
            3 => State::Failed,
            _ => State::Idle,
        }
    }
}

/// Sample source (ADC) configuration
///
/// Mirrors the settings the pipeline depends on: continuous conversion so
/// every result raises a DMA request, and overwrite so a late DMA read loses
/// a sample instead of stalling the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceConfig {
    /// ADC input channel
    pub channel: u8,
    /// Convert back-to-back after the first software trigger
    pub continuous: bool,
    /// Allow a new result to overwrite an unread one
    pub overwrite: bool,
    /// High-speed conversion mode (more bus pressure)
    pub high_speed: bool,
    /// Conversion resolution
    pub resolution: Resolution,
}

impl SourceConfig {
    /// Create the default source configuration (const-compatible)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            channel: DEFAULT_ADC_CHANNEL,
            continuous: true,
            overwrite: true,
            high_speed: false,
            resolution: Resolution::Bits12,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete pipeline configuration
///
/// # Example
///
/// ```
/// use imxrt_adc_stream::{PipelineConfig, Resolution};
///
/// let config = PipelineConfig::new()
///     .with_adc_channel(5)
///     .with_dma_channel(7)
///     .with_resolution(Resolution::Bits10);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PipelineConfig {
    /// ADC settings
    pub source: SourceConfig,
    /// eDMA channel carrying the ADC requests
    pub dma_channel: u8,
    /// DMAMUX request source routed to `dma_channel`
    pub request_source: u8,
    /// Calibration timeout in milliseconds
    pub calibration_timeout_ms: u32,
}

impl PipelineConfig {
    /// Create the default configuration (ADC1 channel 3 on eDMA channel 3)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: SourceConfig::new(),
            dma_channel: DEFAULT_DMA_CHANNEL,
            request_source: ADC1_DMAMUX_SOURCE,
            calibration_timeout_ms: CALIBRATION_TIMEOUT_MS,
        }
    }

    /// Set the ADC input channel
    #[must_use]
    pub const fn with_adc_channel(mut self, channel: u8) -> Self {
        self.source.channel = channel;
        self
    }

    /// Set the eDMA channel
    #[must_use]
    pub const fn with_dma_channel(mut self, channel: u8) -> Self {
        self.dma_channel = channel;
        self
    }

    /// Set the DMAMUX request source
    #[must_use]
    pub const fn with_request_source(mut self, source: u8) -> Self {
        self.request_source = source;
        self
    }

    /// Enable or disable ADC result overwrite
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.source.overwrite = overwrite;
        self
    }

    /// Enable or disable high-speed conversion
    #[must_use]
    pub const fn with_high_speed(mut self, high_speed: bool) -> Self {
        self.source.high_speed = high_speed;
        self
    }

    /// Set the conversion resolution
    #[must_use]
    pub const fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.source.resolution = resolution;
        self
    }

    /// Set the calibration timeout
    #[must_use]
    pub const fn with_calibration_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.calibration_timeout_ms = timeout_ms;
        self
    }

    /// Check channel ranges and the settings the pipeline cannot run without.
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.source.channel >= ADC_INPUT_CHANNELS
            || self.dma_channel >= DMA_CHANNEL_COUNT
            || self.request_source >= DMAMUX_SOURCE_COUNT
        {
            return Err(ConfigError::InvalidChannel);
        }
        // A single-shot ADC would complete one sample and never another
        if !self.source.continuous || self.calibration_timeout_ms == 0 {
            return Err(ConfigError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_board_setup() {
        let config = PipelineConfig::default();
        assert_eq!(config.source.channel, 3);
        assert_eq!(config.dma_channel, 3);
        assert_eq!(config.request_source, ADC1_DMAMUX_SOURCE);
        assert!(config.source.continuous);
        assert!(config.source.overwrite);
        assert!(!config.source.high_speed);
        assert_eq!(config.source.resolution, Resolution::Bits12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = PipelineConfig::new()
            .with_adc_channel(7)
            .with_dma_channel(12)
            .with_request_source(25)
            .with_overwrite(false)
            .with_high_speed(true)
            .with_resolution(Resolution::Bits8)
            .with_calibration_timeout_ms(5);

        assert_eq!(config.source.channel, 7);
        assert_eq!(config.dma_channel, 12);
        assert_eq!(config.request_source, 25);
        assert!(!config.source.overwrite);
        assert!(config.source.high_speed);
        assert_eq!(config.source.resolution, Resolution::Bits8);
        assert_eq!(config.calibration_timeout_ms, 5);
    }

    #[test]
    fn validate_rejects_out_of_range_channels() {
        assert_eq!(
            PipelineConfig::new().with_adc_channel(16).validate(),
            Err(ConfigError::InvalidChannel)
        );
        assert_eq!(
            PipelineConfig::new().with_dma_channel(32).validate(),
            Err(ConfigError::InvalidChannel)
        );
        assert_eq!(
            PipelineConfig::new().with_request_source(128).validate(),
            Err(ConfigError::InvalidChannel)
        );
    }

    #[test]
    fn validate_rejects_single_shot_source() {
        let mut config = PipelineConfig::new();
        config.source.continuous = false;
        assert_eq!(config.validate(), Err(ConfigError::InvalidConfig));
    }

    #[test]
    fn validate_rejects_zero_calibration_timeout() {
        let config = PipelineConfig::new().with_calibration_timeout_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidConfig));
    }

    #[test]
    fn resolution_max_values() {
        assert_eq!(Resolution::Bits8.max_value(), 0xFF);
        assert_eq!(Resolution::Bits10.max_value(), 0x3FF);
        assert_eq!(Resolution::Bits12.max_value(), 0xFFF);
    }

    #[test]
    fn state_round_trips_through_u8() {
        for state in [State::Idle, State::Starting, State::Running, State::Failed] {
            assert_eq!(State::from_u8(state as u8), state);
        }
        assert_eq!(State::from_u8(200), State::Idle);
    }
}

//! Error types for the sampling pipeline
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Start-up and configuration failures (all fatal)
//! - [`TransferError`]: Transfer descriptor and DMA channel issues
//!
//! The unified [`Error`] enum wraps both domains and is returned by most
//! driver methods. Data-quality degradations (ADC overwrite, samples dropped
//! while the channel re-arms, torn copies) are not errors and never appear
//! here.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and start-up errors
///
/// These errors occur while bringing the pipeline up. None of them is
/// retried: they indicate a non-functional configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pipeline already started (or a previous start failed)
    AlreadyInitialized,
    /// Invalid configuration parameter
    InvalidConfig,
    /// ADC input, DMA channel, or DMAMUX source out of range
    InvalidChannel,
    /// ADC auto-calibration reported failure
    CalibrationFailed,
    /// ADC auto-calibration did not finish in time
    CalibrationTimeout,
    /// DMA channel could not be initialized
    TransferInitFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::InvalidChannel => "channel out of range",
            ConfigError::CalibrationFailed => "ADC calibration failed",
            ConfigError::CalibrationTimeout => "ADC calibration timed out",
            ConfigError::TransferInitFailed => "DMA channel initialization failed",
        }
    }
}

// =============================================================================
// Transfer Errors
// =============================================================================

/// Transfer descriptor and DMA channel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// Major loop count is zero or exceeds the hardware counter
    InvalidLength,
    /// Source or destination address not aligned as required
    Misaligned,
    /// Channel armed before it was initialized and routed
    ChannelNotConfigured,
}

impl core::fmt::Display for TransferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransferError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransferError::InvalidLength => "invalid major loop length",
            TransferError::Misaligned => "misaligned transfer address",
            TransferError::ChannelNotConfigured => "DMA channel not configured",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match CTX.initialize_and_arm(&config, &mut adc, &mut dma, &mut delay) {
///     Err(Error::Config(ConfigError::CalibrationFailed)) => { /* halt */ }
///     Err(Error::Transfer(TransferError::Misaligned)) => { /* fix linker script */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Transfer error
    Transfer(TransferError),
}

impl Error {
    /// Returns a human-readable description of the inner error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::Config(e) => e.as_str(),
            Error::Transfer(e) => e.as_str(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Transfer(e) => write!(f, "transfer: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<TransferError> for Error {
    fn from(e: TransferError) -> Self {
        Error::Transfer(e)
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for transfer operations
pub type TransferResult<T> = core::result::Result<T, TransferError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn config_error_as_str_non_empty() {
        let variants = [
            ConfigError::AlreadyInitialized,
            ConfigError::InvalidConfig,
            ConfigError::InvalidChannel,
            ConfigError::CalibrationFailed,
            ConfigError::CalibrationTimeout,
            ConfigError::TransferInitFailed,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "{variant:?} has empty string");
        }
    }

    #[test]
    fn config_error_display() {
        let display = format!("{}", ConfigError::CalibrationFailed);
        assert_eq!(display, "ADC calibration failed");
    }

    #[test]
    fn transfer_error_as_str_non_empty() {
        let variants = [
            TransferError::InvalidLength,
            TransferError::Misaligned,
            TransferError::ChannelNotConfigured,
        ];

        for variant in variants {
            assert!(!variant.as_str().is_empty(), "{variant:?} has empty string");
        }
    }

    #[test]
    fn transfer_error_display() {
        let display = format!("{}", TransferError::Misaligned);
        assert_eq!(display, "misaligned transfer address");
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::TransferInitFailed.into();
        assert_eq!(err, Error::Config(ConfigError::TransferInitFailed));
    }

    #[test]
    fn error_from_transfer_error() {
        let err: Error = TransferError::InvalidLength.into();
        assert_eq!(err, Error::Transfer(TransferError::InvalidLength));
    }

    #[test]
    fn error_display_prefixes_domain() {
        let config = format!("{}", Error::Config(ConfigError::CalibrationTimeout));
        assert!(config.starts_with("config:"));
        assert!(config.contains("timed out"));

        let transfer = format!("{}", Error::Transfer(TransferError::ChannelNotConfigured));
        assert!(transfer.starts_with("transfer:"));
        assert!(transfer.contains("not configured"));
    }

    #[test]
    fn error_as_str_forwards_inner() {
        let err = Error::Config(ConfigError::InvalidChannel);
        assert_eq!(err.as_str(), ConfigError::InvalidChannel.as_str());
    }

    #[test]
    fn question_mark_converts_domains() {
        fn arm() -> TransferResult<()> {
            Err(TransferError::ChannelNotConfigured)
        }

        fn start() -> Result<()> {
            arm()?;
            Ok(())
        }

        assert_eq!(
            start(),
            Err(Error::Transfer(TransferError::ChannelNotConfigured))
        );
    }
}

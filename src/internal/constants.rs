//! Centralized Constants
//!
//! Single source of truth for the magic numbers used by the sampling
//! pipeline.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Buffer geometry**: sample width, buffer length, cache line
//! - **Routing defaults**: ADC input, eDMA channel, DMAMUX request source
//! - **Hardware limits**: channel counts, major loop counter width
//! - **Timing**: calibration timeout and polling interval

// =============================================================================
// Buffer Geometry
// =============================================================================

/// Number of samples per DMA major loop (one completed buffer)
pub const DEFAULT_BUFFER_LEN: usize = 20;

/// Size of one sample in bytes (ADC result register is read as 16 bits)
pub const SAMPLE_SIZE: usize = 2;

/// Cortex-M7 data cache line size in bytes
pub const CACHE_LINE_SIZE: usize = 32;

// =============================================================================
// Routing Defaults
// =============================================================================

/// ADC input channel sampled by default (ADC1_IN3)
pub const DEFAULT_ADC_CHANNEL: u8 = 3;

/// eDMA channel used for ADC transfers by default
pub const DEFAULT_DMA_CHANNEL: u8 = 3;

/// DMAMUX request source for ADC1 conversion complete
pub const ADC1_DMAMUX_SOURCE: u8 = 24;

/// ADC1 result register R0 (ADC1 base 0x400C_4000 + 0x24)
pub const ADC1_R0_ADDR: usize = 0x400C_4024;

// =============================================================================
// Hardware Limits
// =============================================================================

/// Number of eDMA channels on i.MX RT1040
pub const DMA_CHANNEL_COUNT: u8 = 32;

/// Number of DMAMUX request sources
pub const DMAMUX_SOURCE_COUNT: u8 = 128;

/// Number of external ADC input channels
pub const ADC_INPUT_CHANNELS: u8 = 16;

/// Largest major loop iteration count (CITER is 15 bits without channel linking)
pub const MAX_MAJOR_LOOP_COUNT: usize = 0x7FFF;

// =============================================================================
// Timing Constants
// =============================================================================

/// Default ADC auto-calibration timeout in milliseconds
pub const CALIBRATION_TIMEOUT_MS: u32 = 100;

/// Calibration status poll interval in microseconds
pub const CALIBRATION_POLL_INTERVAL_US: u32 = 10;

//! Hardware Abstraction Layer
//!
//! The traits here are the seams between the pipeline and the platform. Pin
//! muxing, clocks, and register-level ADC/eDMA/DMAMUX setup live behind them
//! in a HAL or board crate; the pipeline only sequences them.
//!
//! # Modules
//!
//! - [`source`]: ADC abstraction ([`SampleSource`])
//! - [`transfer`]: DMA channel abstraction ([`TransferEngine`]) and the
//!   completion callback ([`CompletionHandler`])
//! - [`calibration`]: Bounded ADC auto-calibration
//! - [`cache`]: D-cache maintenance for the DMA buffer
//! - [`wait`]: Consumer idle strategies
//!
//! # Delay Integration
//!
//! Calibration polling uses `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod cache;
pub mod calibration;
pub mod source;
pub mod transfer;
pub mod wait;

// Re-export commonly used types
pub use cache::{CacheMaintenance, NonCacheable};
pub use calibration::Calibrator;
pub use source::{CalibrationStatus, SampleSource};
pub use transfer::{CompletionHandler, TransferEngine};
pub use wait::{Spin, WaitStrategy};

#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
pub use cache::DcacheInvalidate;
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
pub use wait::Wfi;
#[cfg(feature = "std")]
pub use wait::YieldThread;

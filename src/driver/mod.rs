//! Core pipeline components.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`descriptor`] - Peripheral-to-memory transfer description
//! - [`buffer`] - The DMA-written sample buffer
//! - [`flag`] - Buffer-ready handshake
//! - [`pipeline`] - Start-up sequence and the completion handler
//! - [`consumer`] - Foreground copy-out loop
//!
//! # Example
//!
//! ```
//! use imxrt_adc_stream::driver::{PipelineConfig, PipelineContext, State};
//!
//! static PIPELINE: PipelineContext<20> = PipelineContext::new();
//!
//! assert_eq!(PIPELINE.state(), State::Idle);
//! assert!(PipelineConfig::new().validate().is_ok());
//! ```

// Submodules
pub mod buffer;
pub mod config;
pub mod consumer;
pub mod descriptor;
pub mod error;
pub mod flag;
pub mod pipeline;

// Re-exports for convenience
pub use buffer::{Sample, SampleBuffer};
pub use config::{PipelineConfig, Resolution, SourceConfig, State};
pub use consumer::{BufferSummary, Consumer, WorkingCopy};
pub use descriptor::TransferDescriptor;
pub use error::{ConfigError, ConfigResult, Error, Result, TransferError, TransferResult};
pub use flag::ReadyFlag;
pub use pipeline::PipelineContext;

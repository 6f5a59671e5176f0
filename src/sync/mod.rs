//! Synchronization and Concurrency Support
//!
//! Interrupt-safe helpers around the pipeline. The pipeline core itself only
//! needs atomics; these are for sharing the transfer engine with the DMA
//! interrupt and for async consumers.
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - [`AtomicWaker`] - Waker slot signalled by the completion handler
//!
//! - **Shared Engine** (`shared`): [`SharedEngine`], the `static` home of the
//!   transfer engine that the DMA interrupt re-arms
//!
//! - **Async Support** (`asynch`): [`ReadyFuture`] and
//!   [`Consumer::next_async`](crate::Consumer::next_async)
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables `primitives` and `shared` modules
//! - `async`: Enables `asynch` module (also requires `critical-section`)

mod primitives;

pub use primitives::CriticalSectionCell;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;

mod shared;

pub use shared::SharedEngine;

#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::ReadyFuture;

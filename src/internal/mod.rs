//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Buffer geometry, routing defaults, hardware limits, timing
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. The values that matter to
//! users are re-exported through [`crate::constants`].

pub(crate) mod constants;

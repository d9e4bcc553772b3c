//! Core types for a-contrario histogram analysis
//!
//! This crate holds the pieces shared by every acontrario crate: the unified
//! [`Error`] type and the number-of-false-alarms math used by the mode
//! detector.
//!
//! # Example
//!
//! ```rust
//! use acontrario_core::math::{detection_threshold, relative_entropy};
//!
//! // 7 bins holding 26 samples, one expected false alarm
//! let threshold = detection_threshold(7, 26.0, 1.0);
//!
//! // a single bin holding 20 of the 26 samples
//! let h = relative_entropy(20.0 / 26.0, 1.0 / 7.0);
//! assert!(h > threshold);
//! ```

pub mod error;
pub mod math;

// Re-export core types
pub use error::{Error, Result};

//! A-contrario mode detection for histograms
//!
//! This crate re-exports the acontrario workspace crates:
//!
//! - [`core`]: error type and number-of-false-alarms math
//! - [`histogram`]: validated histograms, intervals and text formats
//! - [`modality`]: maximal meaningful mode detection
//!
//! # Example
//!
//! ```rust
//! use acontrario::detect_modes;
//!
//! let counts = [1.0, 1.0, 30.0, 30.0, 1.0, 1.0, 1.0, 1.0, 30.0, 30.0, 1.0, 1.0];
//! let modes = detect_modes(&counts, false, 1.0)?;
//! assert_eq!(modes, vec![(2, 3), (8, 9)]);
//!
//! // A peak split across both ends is one mode on a circle
//! let modes = detect_modes(&[20.0, 1.0, 1.0, 1.0, 1.0, 20.0], true, 1.0)?;
//! assert_eq!(modes, vec![(5, 0)]);
//! # Ok::<(), acontrario::Error>(())
//! ```

pub use acontrario_core as core;
pub use acontrario_histogram as histogram;
pub use acontrario_modality as modality;

pub use acontrario_core::{Error, Result};
pub use acontrario_histogram::{Histogram, Interval};
pub use acontrario_modality::{
    default_detector, detect_modes, DetectorConfig, MeaningfulMode, ModeDetectionResult,
    ModeDetector, ModeDetectorBuilder, NfaModeDetector, NullObserver,
};

//! Maximal meaningful mode detection in histograms
//!
//! This crate detects the modes of a histogram with the a-contrario
//! framework of Desolneux, Moisan and Morel. An interval of bins is a
//! *meaningful mode* when it holds so much more mass than a uniform
//! distribution would that, after accounting for the `size(size+1)/2` tested
//! intervals, fewer than `epsilon` such intervals are expected by chance.
//!
//! # Algorithm Overview
//!
//! 1. Score every interval with the relative entropy of its mass proportion
//!    against its length proportion
//! 2. Classify intervals above the detection threshold as modes (excess mass)
//!    or gaps (deficit mass)
//! 3. Drop modes that contain a meaningful gap
//! 4. Keep modes not dominated in entropy by a nested or enclosing mode
//!
//! Circular histograms (angles, hues, time of day) also evaluate wrap-around
//! intervals, written `(start, end)` with `start > end`.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust
//! use acontrario_modality::{default_detector, ModeDetector};
//! use acontrario_histogram::Histogram;
//!
//! let histogram = Histogram::new(vec![1.0, 1.0, 1.0, 20.0, 1.0, 1.0, 1.0]).unwrap();
//! let result = default_detector().detect(&histogram).unwrap();
//!
//! assert_eq!(result.intervals(), vec![(3, 3)]);
//! for mode in result.modes() {
//!     println!("{mode}");
//! }
//! ```
//!
//! ## Circular Histograms
//!
//! ```rust
//! use acontrario_modality::{ModeDetectorBuilder, ModeDetector, NullObserver};
//! use acontrario_histogram::Histogram;
//!
//! let detector = ModeDetectorBuilder::new(NullObserver)
//!     .epsilon(1.0)
//!     .circular(true)
//!     .build();
//!
//! let histogram = Histogram::new(vec![20.0, 1.0, 1.0, 1.0, 1.0, 20.0]).unwrap();
//! let result = detector.detect(&histogram).unwrap();
//! assert_eq!(result.intervals(), vec![(5, 0)]);
//! ```

pub mod analysis;
pub mod builder;
pub mod detector;
pub mod observer;
pub mod tables;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_data;

// Re-exports
pub use analysis::IntervalAnalysis;
pub use builder::{
    circular_detector, default_detector, detector_with_epsilon, DetectorConfig,
    ModeDetectorBuilder,
};
pub use detector::NfaModeDetector;
pub use observer::{DetectionObserver, DetectionTrace, NullObserver, RecordingObserver};
pub use tables::IntervalTable;
pub use traits::ModeDetector;
pub use types::{MeaningfulMode, ModeDetectionResult, ModeSummary};

use acontrario_core::Result;
use acontrario_histogram::Histogram;

// Type aliases for convenience
pub type DefaultDetector = NfaModeDetector<NullObserver>;

/// Detect the maximal meaningful modes of raw bin counts
///
/// Returns the `(start, end)` pairs in increasing order; the number of modes
/// is the length of the vector.
///
/// ```rust
/// let modes = acontrario_modality::detect_modes(&[5.0; 6], false, 1.0).unwrap();
/// assert!(modes.is_empty());
/// ```
pub fn detect_modes(
    histogram: &[f64],
    circular: bool,
    epsilon: f64,
) -> Result<Vec<(usize, usize)>> {
    let histogram = Histogram::new(histogram.to_vec())?;
    let detector = ModeDetectorBuilder::new(NullObserver)
        .epsilon(epsilon)
        .circular(circular)
        .build();
    Ok(detector.detect_modes(&histogram)?.intervals())
}

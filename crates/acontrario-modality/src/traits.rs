//! Core traits for mode detection

use crate::types::ModeDetectionResult;
use acontrario_core::Result;
use acontrario_histogram::Histogram;

/// Trait for histogram mode detection algorithms
pub trait ModeDetector {
    /// Detect the modes of a histogram
    fn detect(&self, histogram: &Histogram) -> Result<ModeDetectionResult>;

    /// Detect the modes of raw bin counts, validating them first
    fn detect_counts(&self, counts: &[f64]) -> Result<ModeDetectionResult> {
        self.detect(&Histogram::new(counts.to_vec())?)
    }

    /// Expected number of false alarms allowed (if applicable)
    fn epsilon(&self) -> f64 {
        1.0
    }

    /// Check if this detector treats histograms as circular
    fn is_circular(&self) -> bool {
        false
    }
}

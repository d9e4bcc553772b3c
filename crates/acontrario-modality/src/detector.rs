use crate::analysis::IntervalAnalysis;
use crate::observer::DetectionObserver;
use crate::traits::ModeDetector;
use crate::types::ModeDetectionResult;
use acontrario_core::Result;
use acontrario_histogram::Histogram;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The maximal meaningful mode detector.
///
/// This detector identifies modes as intervals of bins holding significantly
/// more mass than a uniform distribution would put there. The algorithm works by:
/// 1. Scoring every interval with its relative entropy against uniformity
/// 2. Keeping intervals whose number of false alarms is below `epsilon`
/// 3. Dropping modes that contain a meaningful gap
/// 4. Keeping only modes not dominated by a nested or enclosing mode
///
/// This implementation follows the maximal meaningful modes of:
/// Desolneux, Moisan & Morel, "From Gestalt theory to image analysis", ch. 7.
#[derive(Debug, Clone)]
pub struct NfaModeDetector<V> {
    observer: V,
    epsilon: f64,
    circular: bool,
}

impl<V> NfaModeDetector<V> {
    /// Creates a new detector.
    ///
    /// # Arguments
    /// * `observer` - Receives the intermediate stages of each detection
    /// * `epsilon` - Expected number of false detections under uniformity (> 0).
    ///   Larger values lower the threshold and detect more modes
    /// * `circular` - Whether the last bin is adjacent to the first one
    pub fn new(observer: V, epsilon: f64, circular: bool) -> Self {
        Self {
            observer,
            epsilon,
            circular,
        }
    }

    /// Sets the epsilon parameter.
    ///
    /// The value is not clamped: a non-positive epsilon makes detection fail.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets whether histograms are circular.
    pub fn with_circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    /// Get a reference to the observer
    pub fn observer(&self) -> &V {
        &self.observer
    }
}

impl<V> NfaModeDetector<V>
where
    V: DetectionObserver,
{
    /// Compute all interval tables of a histogram
    #[instrument(
        skip_all,
        fields(bins = histogram.len(), circular = self.circular, epsilon = self.epsilon)
    )]
    pub fn analyze(&self, histogram: &Histogram) -> Result<IntervalAnalysis> {
        IntervalAnalysis::compute_observed(histogram, self.circular, self.epsilon, &self.observer)
    }

    /// Detect the maximal meaningful modes of a histogram
    pub fn detect_modes(&self, histogram: &Histogram) -> Result<ModeDetectionResult> {
        let result = self.analyze(histogram)?.into_result();
        debug!(modes = result.mode_count(), "detection finished");
        Ok(result)
    }

    /// Detect the modes of several independent histograms
    ///
    /// With the `parallel` feature the histograms are processed on the rayon
    /// thread pool; results keep the input order either way.
    pub fn detect_batch(&self, histograms: &[Histogram]) -> Vec<Result<ModeDetectionResult>>
    where
        V: Sync,
    {
        debug!(histograms = histograms.len(), "batch detection");

        #[cfg(feature = "parallel")]
        let results: Vec<_> = histograms.par_iter().map(|h| self.detect_modes(h)).collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = histograms.iter().map(|h| self.detect_modes(h)).collect();

        results
    }
}

impl<V> ModeDetector for NfaModeDetector<V>
where
    V: DetectionObserver,
{
    fn detect(&self, histogram: &Histogram) -> Result<ModeDetectionResult> {
        self.detect_modes(histogram)
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn is_circular(&self) -> bool {
        self.circular
    }
}

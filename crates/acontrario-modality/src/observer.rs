//! Observation hooks for mode detection
//!
//! The detector calls these methods while it runs so that callers can
//! inspect intermediate stages without reading the full interval tables.

use crate::types::MeaningfulMode;
use acontrario_core::Result;
use acontrario_histogram::Interval;
use std::sync::{Mutex, PoisonError};

/// Trait for observing the stages of mode detection
pub trait DetectionObserver {
    /// Record the detection threshold and the number of tested intervals
    fn record_threshold(&self, threshold: f64, test_count: f64) -> Result<()>;

    /// Record every meaningful gap, in evaluation order
    fn record_gaps(&self, gaps: &[Interval]) -> Result<()>;

    /// Record a candidate mode dropped because it contains a meaningful gap
    fn record_suppressed(&self, mode: Interval, gap: Interval) -> Result<()>;

    /// Record the final maximal meaningful modes
    fn record_final_modes(&self, modes: &[MeaningfulMode]) -> Result<()>;

    /// Check if this observer wants to be fed at all
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Null observer that does nothing (for when observation is disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DetectionObserver for NullObserver {
    fn record_threshold(&self, _threshold: f64, _test_count: f64) -> Result<()> {
        Ok(())
    }

    fn record_gaps(&self, _gaps: &[Interval]) -> Result<()> {
        Ok(())
    }

    fn record_suppressed(&self, _mode: Interval, _gap: Interval) -> Result<()> {
        Ok(())
    }

    fn record_final_modes(&self, _modes: &[MeaningfulMode]) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Everything a [`RecordingObserver`] has seen
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DetectionTrace {
    /// Threshold of the last detection
    pub threshold: Option<f64>,
    /// Number of tested intervals of the last detection
    pub test_count: Option<f64>,
    /// Meaningful gaps
    pub gaps: Vec<Interval>,
    /// `(mode, gap)` pairs: each suppressed mode with the first gap found in it
    pub suppressed: Vec<(Interval, Interval)>,
    /// Final maximal meaningful modes
    pub final_modes: Vec<MeaningfulMode>,
}

/// Observer that keeps a [`DetectionTrace`] in memory
///
/// Traces accumulate across detections; call [`RecordingObserver::take`] to
/// reset between runs.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    trace: Mutex<DetectionTrace>,
}

impl RecordingObserver {
    /// Create an empty recording observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of what has been recorded so far
    pub fn trace(&self) -> DetectionTrace {
        self.lock().clone()
    }

    /// Return the recorded trace and start a fresh one
    pub fn take(&self) -> DetectionTrace {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DetectionTrace> {
        self.trace.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DetectionObserver for RecordingObserver {
    fn record_threshold(&self, threshold: f64, test_count: f64) -> Result<()> {
        let mut trace = self.lock();
        trace.threshold = Some(threshold);
        trace.test_count = Some(test_count);
        Ok(())
    }

    fn record_gaps(&self, gaps: &[Interval]) -> Result<()> {
        self.lock().gaps.extend_from_slice(gaps);
        Ok(())
    }

    fn record_suppressed(&self, mode: Interval, gap: Interval) -> Result<()> {
        self.lock().suppressed.push((mode, gap));
        Ok(())
    }

    fn record_final_modes(&self, modes: &[MeaningfulMode]) -> Result<()> {
        self.lock().final_modes.extend_from_slice(modes);
        Ok(())
    }
}

impl<O: DetectionObserver + ?Sized> DetectionObserver for &O {
    fn record_threshold(&self, threshold: f64, test_count: f64) -> Result<()> {
        (**self).record_threshold(threshold, test_count)
    }

    fn record_gaps(&self, gaps: &[Interval]) -> Result<()> {
        (**self).record_gaps(gaps)
    }

    fn record_suppressed(&self, mode: Interval, gap: Interval) -> Result<()> {
        (**self).record_suppressed(mode, gap)
    }

    fn record_final_modes(&self, modes: &[MeaningfulMode]) -> Result<()> {
        (**self).record_final_modes(modes)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

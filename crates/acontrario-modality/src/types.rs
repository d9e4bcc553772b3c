//! Core types for mode detection results

use acontrario_histogram::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A maximal meaningful mode of a histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeaningfulMode {
    /// The bins covered by the mode
    pub interval: Interval,
    /// Relative entropy of the interval against the uniform distribution
    pub entropy: f64,
    /// Proportion of the total mass inside the interval
    pub mass: f64,
    /// Proportion of the bins covered by the interval
    pub length: f64,
    /// Number of false alarms, always below the detection epsilon
    pub nfa: f64,
}

impl MeaningfulMode {
    /// First bin of the mode
    pub fn start(&self) -> usize {
        self.interval.start
    }

    /// Last bin of the mode (inclusive)
    pub fn end(&self) -> usize {
        self.interval.end
    }

    /// Whether the mode wraps past the last bin of a circular histogram
    pub fn is_wrapping(&self) -> bool {
        self.interval.is_wrapping()
    }

    /// Ratio between the observed mass and the mass expected under uniformity
    pub fn concentration(&self) -> f64 {
        self.mass / self.length
    }
}

impl fmt::Display for MeaningfulMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mode(bins={}, mass={:.3}, length={:.3}, entropy={:.4}, nfa={:.3e})",
            self.interval, self.mass, self.length, self.entropy, self.nfa
        )
    }
}

/// Result of mode detection: the maximal meaningful modes and their context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDetectionResult {
    /// The detected modes, ordered by start bin then end bin
    modes: Vec<MeaningfulMode>,
    /// Number of bins of the analysed histogram
    size: usize,
    /// Whether the histogram was treated as circular
    circular: bool,
    /// Expected number of false alarms allowed
    epsilon: f64,
    /// Entropy an interval had to exceed to be meaningful
    threshold: f64,
}

impl ModeDetectionResult {
    /// Create a new detection result
    pub fn new(
        modes: Vec<MeaningfulMode>,
        size: usize,
        circular: bool,
        epsilon: f64,
        threshold: f64,
    ) -> Self {
        Self {
            modes,
            size,
            circular,
            epsilon,
            threshold,
        }
    }

    /// Get the detected modes
    pub fn modes(&self) -> &[MeaningfulMode] {
        &self.modes
    }

    /// Get the number of detected modes
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// The mode intervals as `(start, end)` pairs, in result order
    pub fn intervals(&self) -> Vec<(usize, usize)> {
        self.modes.iter().map(|m| m.interval.as_tuple()).collect()
    }

    /// The mode intervals, in result order
    pub fn interval_list(&self) -> Vec<Interval> {
        self.modes.iter().map(|m| m.interval).collect()
    }

    /// Check if exactly one mode was found
    pub fn is_unimodal(&self) -> bool {
        self.modes.len() == 1
    }

    /// Check if more than one mode was found
    pub fn is_multimodal(&self) -> bool {
        self.modes.len() > 1
    }

    /// Find which mode (if any) covers a given bin
    pub fn find_mode(&self, bin: usize) -> Option<usize> {
        self.modes
            .iter()
            .position(|mode| mode.interval.contains_bin(bin, self.size))
    }

    /// Number of bins of the analysed histogram
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the histogram was treated as circular
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Expected number of false alarms allowed
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Entropy an interval had to exceed to be meaningful
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Get summary statistics
    pub fn summary(&self) -> ModeSummary {
        let max_entropy = self.modes.iter().map(|m| m.entropy).fold(None, |acc: Option<f64>, h| {
            Some(acc.map_or(h, |a| a.max(h)))
        });
        let min_nfa = self.modes.iter().map(|m| m.nfa).fold(None, |acc: Option<f64>, n| {
            Some(acc.map_or(n, |a| a.min(n)))
        });

        ModeSummary {
            mode_count: self.mode_count(),
            total_bins: self.size,
            circular: self.circular,
            threshold: self.threshold,
            max_entropy,
            min_nfa,
        }
    }
}

impl fmt::Display for ModeDetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModeDetectionResult({} modes detected)", self.mode_count())
    }
}

/// Summary statistics for a mode detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSummary {
    /// Number of detected modes
    pub mode_count: usize,
    /// Total number of histogram bins
    pub total_bins: usize,
    /// Whether the histogram was circular
    pub circular: bool,
    /// Detection threshold
    pub threshold: f64,
    /// Largest entropy among the modes
    pub max_entropy: Option<f64>,
    /// Smallest NFA among the modes
    pub min_nfa: Option<f64>,
}

impl fmt::Display for ModeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Modes: {}, Bins: {}, Circular: {}, Threshold: {:.4}",
            self.mode_count, self.total_bins, self.circular, self.threshold
        )
    }
}

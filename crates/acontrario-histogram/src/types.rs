//! Core types for histogram representation

use acontrario_core::math::ring;
use acontrario_core::{Error, Result};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An interval of consecutive bins `[start, end]`
///
/// On a circular histogram `start > end` denotes the wrap-around interval
/// covering bins `start..size` followed by `0..=end`. On a linear histogram
/// intervals always satisfy `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    /// First bin of the interval
    pub start: usize,
    /// Last bin of the interval (inclusive)
    pub end: usize,
}

impl Interval {
    /// Create a new interval
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether the interval wraps past the last bin
    pub fn is_wrapping(&self) -> bool {
        self.start > self.end
    }

    /// Number of bins covered on a histogram with `size` bins
    pub fn bin_count(&self, size: usize) -> usize {
        ring::distance(self.start, self.end, size) + 1
    }

    /// Check if a bin falls within this interval
    pub fn contains_bin(&self, bin: usize, size: usize) -> bool {
        if bin >= size {
            return false;
        }
        if self.start <= self.end {
            bin >= self.start && bin <= self.end
        } else {
            bin >= self.start || bin <= self.end
        }
    }

    /// Bin indices covered by the interval, in walking order from `start`
    pub fn bins(&self, size: usize) -> impl Iterator<Item = usize> {
        let start = self.start;
        (0..self.bin_count(size)).map(move |offset| (start + offset) % size)
    }

    /// The interval as a `(start, end)` pair
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

impl From<(usize, usize)> for Interval {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Interval> for (usize, usize) {
    fn from(interval: Interval) -> Self {
        interval.as_tuple()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A histogram of non-negative bin counts with positive total mass
///
/// Construction validates the counts, so every `Histogram` is a legal input
/// for mode detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Histogram {
    /// Count (mass) of each bin
    counts: Vec<f64>,
    /// Sum of all counts
    total: f64,
}

impl Histogram {
    /// Create a new histogram from bin counts
    ///
    /// Fails with [`Error::InvalidInput`] if there are no bins, a count is
    /// negative, NaN or infinite, or the counts sum to zero.
    pub fn new(counts: Vec<f64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(Error::empty_input("histogram"));
        }
        if counts.iter().any(|c| !c.is_finite()) {
            return Err(Error::non_finite("histogram"));
        }
        if let Some((bin, &value)) = counts.iter().enumerate().find(|(_, c)| **c < 0.0) {
            return Err(Error::negative_count(bin, value));
        }

        let total: f64 = counts.iter().sum();
        if !total.is_finite() {
            return Err(Error::non_finite("histogram total"));
        }
        if total <= 0.0 {
            return Err(Error::zero_mass());
        }

        Ok(Self { counts, total })
    }

    /// Create a histogram from any numeric counts
    pub fn from_counts<T: ToPrimitive>(counts: &[T]) -> Result<Self> {
        let converted = counts
            .iter()
            .enumerate()
            .map(|(bin, c)| {
                c.to_f64().ok_or_else(|| {
                    Error::InvalidInput(format!("bin {bin} is not representable as f64"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::new(converted)
    }

    /// Get the bin counts
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the histogram is empty (never true for a constructed histogram)
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Get the total mass
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Get the count of a single bin
    pub fn get(&self, bin: usize) -> Option<f64> {
        self.counts.get(bin).copied()
    }

    /// Get the maximum count in any bin
    pub fn max_count(&self) -> f64 {
        self.counts.iter().copied().fold(0.0, f64::max)
    }

    /// Index of the fullest bin (first one on ties)
    pub fn peak_bin(&self) -> usize {
        let max = self.max_count();
        self.counts.iter().position(|&c| c == max).unwrap_or(0)
    }

    /// Compute the cumulated histogram
    pub fn cumulative(&self) -> CumulativeHistogram {
        CumulativeHistogram::new(self)
    }
}

impl TryFrom<Vec<f64>> for Histogram {
    type Error = Error;

    fn try_from(counts: Vec<f64>) -> Result<Self> {
        Self::new(counts)
    }
}

impl From<Histogram> for Vec<f64> {
    fn from(histogram: Histogram) -> Self {
        histogram.counts
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, total={:.3}, max={:.3})",
            self.len(),
            self.total,
            self.max_count()
        )
    }
}

/// Prefix sums of a histogram
///
/// `cumulated[k] = counts[0] + ... + counts[k]`, so the mass of any interval
/// is a single difference.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeHistogram {
    cumulated: Vec<f64>,
}

impl CumulativeHistogram {
    /// Create the cumulated histogram
    pub fn new(histogram: &Histogram) -> Self {
        let cumulated = histogram
            .counts()
            .iter()
            .scan(0.0, |acc, &c| {
                *acc += c;
                Some(*acc)
            })
            .collect();
        Self { cumulated }
    }

    /// Get the cumulated sums
    pub fn values(&self) -> &[f64] {
        &self.cumulated
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.cumulated.len()
    }

    /// Check if there are no bins
    pub fn is_empty(&self) -> bool {
        self.cumulated.is_empty()
    }

    /// Total mass, the last cumulated value
    pub fn total(&self) -> f64 {
        self.cumulated.last().copied().unwrap_or(0.0)
    }

    /// Mass inside an interval, always in `[0, total]`
    ///
    /// A wrap-around interval's mass is the total minus the excluded middle
    /// segment `end+1..start`. An interval covering every bin returns the
    /// total exactly.
    pub fn mass(&self, interval: Interval) -> f64 {
        let Interval { start: i, end: j } = interval;
        let total = self.total();
        if interval.bin_count(self.len()) == self.len() {
            return total;
        }

        let mass = if i <= j {
            self.cumulated[j] - self.before(i)
        } else {
            total - (self.cumulated[i - 1] - self.cumulated[j])
        };
        mass.clamp(0.0, total)
    }

    /// Proportion of the total mass inside an interval, in `[0, 1]`
    pub fn mass_proportion(&self, interval: Interval) -> f64 {
        (self.mass(interval) / self.total()).clamp(0.0, 1.0)
    }

    /// Cumulated mass of the bins before `bin`
    fn before(&self, bin: usize) -> f64 {
        if bin == 0 {
            0.0
        } else {
            self.cumulated[bin - 1]
        }
    }
}

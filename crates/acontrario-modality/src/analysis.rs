//! Interval tables of the a-contrario mode detection
//!
//! [`IntervalAnalysis`] evaluates every interval of a histogram against the
//! uniform null hypothesis and keeps the resulting tables:
//!
//! 1. entropy of each interval and its mode/gap classification
//! 2. candidate modes containing a meaningful gap are dropped
//! 3. remaining modes dominated in entropy by a sub-interval or a
//!    super-interval mode are dropped, leaving the maximal meaningful modes
//!
//! Every interval may scan `O(size^2)` sub- and super-intervals, so the whole
//! analysis is `O(size^4)` time and `O(size^2)` memory.

use crate::observer::{DetectionObserver, NullObserver};
use crate::tables::IntervalTable;
use crate::types::{MeaningfulMode, ModeDetectionResult};
use acontrario_core::math::{
    detection_threshold, number_of_false_alarms, relative_entropy, ring, test_count,
};
use acontrario_core::{Error, Result};
use acontrario_histogram::{CumulativeHistogram, Histogram, Interval};
use tracing::{debug, trace};

/// Reject epsilons that would make the threshold meaningless
pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(Error::invalid_epsilon(epsilon));
    }
    Ok(())
}

/// All intervals of a histogram in evaluation order
///
/// Linear histograms only have `start <= end`; circular ones also have every
/// wrap-around interval.
pub fn intervals(size: usize, circular: bool) -> impl Iterator<Item = Interval> {
    (0..size).flat_map(move |i| {
        let first = if circular { 0 } else { i };
        (first..size).map(move |j| Interval::new(i, j))
    })
}

/// Every interval lying inside `interval`, the interval itself included
///
/// Sub-intervals keep the orientation of the walk from `interval.start`, so
/// those of a wrap-around interval may wrap as well.
pub fn sub_intervals(interval: Interval, size: usize) -> impl Iterator<Item = Interval> {
    let len = interval.bin_count(size);
    let start = interval.start;
    (0..len).flat_map(move |s| {
        (s..len).map(move |t| Interval::new((start + s) % size, (start + t) % size))
    })
}

/// Every interval containing `interval`, the interval itself included
///
/// On a ring the start walks backwards from `interval.start` over the bins
/// outside the interval, and for each start the end walks forwards from
/// `interval.end` up to the bin before that start. Both walks are counted.
pub fn super_intervals(
    interval: Interval,
    size: usize,
    circular: bool,
) -> Box<dyn Iterator<Item = Interval>> {
    let Interval { start: i, end: j } = interval;
    if !circular {
        return Box::new(
            (0..=i)
                .rev()
                .flat_map(move |a| (j..size).map(move |b| Interval::new(a, b))),
        );
    }

    let outside = size - interval.bin_count(size);
    let after = ring::next(j, size);
    let starts = std::iter::successors(Some(i), move |&a| Some(ring::prev(a, size)));
    Box::new(starts.take(outside + 1).flat_map(move |a| {
        let ends = ring::distance(after, a, size) + 1;
        (0..ends).map(move |t| Interval::new(a, (j + t) % size))
    }))
}

/// Tables of one mode detection run
#[derive(Debug, Clone)]
pub struct IntervalAnalysis {
    size: usize,
    circular: bool,
    epsilon: f64,
    threshold: f64,
    cumulative: CumulativeHistogram,
    entropy: IntervalTable<f64>,
    candidate: IntervalTable<bool>,
    gap: IntervalTable<bool>,
    meaningful: IntervalTable<bool>,
    maximal: IntervalTable<bool>,
}

impl IntervalAnalysis {
    /// Run the full analysis of a histogram
    pub fn compute(histogram: &Histogram, circular: bool, epsilon: f64) -> Result<Self> {
        Self::compute_observed(histogram, circular, epsilon, &NullObserver)
    }

    /// Run the full analysis, reporting intermediate stages to `observer`
    pub fn compute_observed<O: DetectionObserver + ?Sized>(
        histogram: &Histogram,
        circular: bool,
        epsilon: f64,
        observer: &O,
    ) -> Result<Self> {
        check_epsilon(epsilon)?;

        let size = histogram.len();
        let cumulative = histogram.cumulative();
        let threshold = detection_threshold(size, cumulative.total(), epsilon);
        debug!(size, circular, epsilon, threshold, "evaluating intervals");
        if observer.is_enabled() {
            let _ = observer.record_threshold(threshold, test_count(size));
        }

        let mut entropy = IntervalTable::try_new(size, 0.0, "entropy table")?;
        let mut candidate = IntervalTable::try_new(size, false, "mode table")?;
        let mut gap = IntervalTable::try_new(size, false, "gap table")?;

        for interval in intervals(size, circular) {
            let r = cumulative.mass_proportion(interval);
            let p = interval.bin_count(size) as f64 / size as f64;
            let h = relative_entropy(r, p);
            entropy.set(interval, h);
            candidate.set(interval, r > p && h > threshold);
            gap.set(interval, r < p && h > threshold);
        }

        let meaningful = candidate.try_clone("meaningful mode table")?;
        let maximal = candidate.try_clone("maximal mode table")?;
        let mut analysis = Self {
            size,
            circular,
            epsilon,
            threshold,
            cumulative,
            entropy,
            candidate,
            gap,
            meaningful,
            maximal,
        };

        if observer.is_enabled() {
            let _ = observer.record_gaps(&analysis.gaps());
        }
        analysis.suppress_gapped_modes(observer);
        analysis.select_maximal_modes();

        let maximal_modes = analysis.maximal_mode_details();
        debug!(
            candidates = analysis.candidate_modes().len(),
            meaningful = analysis.meaningful_modes().len(),
            maximal = maximal_modes.len(),
            "mode selection finished"
        );
        if observer.is_enabled() {
            let _ = observer.record_final_modes(&maximal_modes);
        }

        Ok(analysis)
    }

    /// Drop every candidate mode that contains a meaningful gap
    fn suppress_gapped_modes<O: DetectionObserver + ?Sized>(&mut self, observer: &O) {
        let suppressed: Vec<(Interval, Interval)> = self
            .intervals()
            .filter(|&interval| self.candidate.get(interval))
            .filter_map(|interval| {
                sub_intervals(interval, self.size)
                    .find(|&inner| self.gap.get(inner))
                    .map(|inner| (interval, inner))
            })
            .collect();

        for &(mode, gap) in &suppressed {
            trace!(%mode, %gap, "mode contains a meaningful gap");
            self.meaningful.set(mode, false);
            self.maximal.set(mode, false);
            if observer.is_enabled() {
                let _ = observer.record_suppressed(mode, gap);
            }
        }
    }

    /// Drop every meaningful mode dominated by a sub- or super-interval mode
    ///
    /// Domination requires strictly greater entropy, on both sides.
    fn select_maximal_modes(&mut self) {
        let dominated: Vec<Interval> = self
            .meaningful_modes()
            .into_iter()
            .filter(|&interval| {
                let h = self.entropy.get(interval);
                let beats =
                    |other: Interval| self.meaningful.get(other) && self.entropy.get(other) > h;
                sub_intervals(interval, self.size).any(beats)
                    || super_intervals(interval, self.size, self.circular).any(beats)
            })
            .collect();

        for &mode in &dominated {
            trace!(%mode, "mode dominated by a higher entropy mode");
            self.maximal.set(mode, false);
        }
    }

    /// Number of bins
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether wrap-around intervals were evaluated
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Expected number of false alarms allowed
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Total mass of the histogram
    pub fn total(&self) -> f64 {
        self.cumulative.total()
    }

    /// Entropy an interval must exceed to be meaningful
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of tested intervals used by the multiple-testing correction
    pub fn test_count(&self) -> f64 {
        test_count(self.size)
    }

    /// Evaluated intervals in evaluation order
    pub fn intervals(&self) -> impl Iterator<Item = Interval> {
        intervals(self.size, self.circular)
    }

    /// Relative entropy of an interval
    pub fn entropy<I: Into<Interval>>(&self, interval: I) -> f64 {
        self.entropy.get(interval)
    }

    /// Proportion of the total mass inside an interval
    pub fn mass_proportion<I: Into<Interval>>(&self, interval: I) -> f64 {
        self.cumulative.mass_proportion(interval.into())
    }

    /// Proportion of the bins covered by an interval
    pub fn length_proportion<I: Into<Interval>>(&self, interval: I) -> f64 {
        interval.into().bin_count(self.size) as f64 / self.size as f64
    }

    /// Number of false alarms of an interval
    pub fn nfa<I: Into<Interval>>(&self, interval: I) -> f64 {
        number_of_false_alarms(self.size, self.total(), self.entropy(interval))
    }

    /// Whether the interval has excess mass beyond the threshold
    pub fn is_candidate_mode<I: Into<Interval>>(&self, interval: I) -> bool {
        self.candidate.get(interval)
    }

    /// Whether the interval has a mass deficit beyond the threshold
    pub fn is_gap<I: Into<Interval>>(&self, interval: I) -> bool {
        self.gap.get(interval)
    }

    /// Whether the interval is a candidate mode without any meaningful gap inside
    pub fn is_meaningful_mode<I: Into<Interval>>(&self, interval: I) -> bool {
        self.meaningful.get(interval)
    }

    /// Whether the interval is a maximal meaningful mode
    pub fn is_maximal_mode<I: Into<Interval>>(&self, interval: I) -> bool {
        self.maximal.get(interval)
    }

    /// Candidate modes, before gap suppression
    pub fn candidate_modes(&self) -> Vec<Interval> {
        self.intervals().filter(|&i| self.candidate.get(i)).collect()
    }

    /// Meaningful gaps
    pub fn gaps(&self) -> Vec<Interval> {
        self.intervals().filter(|&i| self.gap.get(i)).collect()
    }

    /// Meaningful modes (candidates surviving gap suppression)
    pub fn meaningful_modes(&self) -> Vec<Interval> {
        self.intervals().filter(|&i| self.meaningful.get(i)).collect()
    }

    /// Maximal meaningful modes, ordered by start then end
    pub fn maximal_modes(&self) -> Vec<Interval> {
        self.intervals().filter(|&i| self.maximal.get(i)).collect()
    }

    /// Statistics of one interval as a [`MeaningfulMode`]
    pub fn mode_details<I: Into<Interval>>(&self, interval: I) -> MeaningfulMode {
        let interval = interval.into();
        MeaningfulMode {
            interval,
            entropy: self.entropy(interval),
            mass: self.mass_proportion(interval),
            length: self.length_proportion(interval),
            nfa: self.nfa(interval),
        }
    }

    fn maximal_mode_details(&self) -> Vec<MeaningfulMode> {
        self.maximal_modes()
            .into_iter()
            .map(|interval| self.mode_details(interval))
            .collect()
    }

    /// Extract the maximal meaningful modes as a detection result
    pub fn into_result(self) -> ModeDetectionResult {
        ModeDetectionResult::new(
            self.maximal_mode_details(),
            self.size,
            self.circular,
            self.epsilon,
            self.threshold,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn hist(counts: &[f64]) -> Histogram {
        Histogram::new(counts.to_vec()).unwrap()
    }

    #[test]
    fn test_interval_enumeration() {
        assert_eq!(intervals(3, false).count(), 6);
        assert_eq!(intervals(3, true).count(), 9);
        let linear: Vec<_> = intervals(3, false).map(|i| i.as_tuple()).collect();
        assert_eq!(linear, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_sub_intervals_of_wrapping_interval() {
        let subs: Vec<_> = sub_intervals(Interval::new(4, 0), 5)
            .map(|i| i.as_tuple())
            .collect();
        assert_eq!(subs, vec![(4, 4), (4, 0), (0, 0)]);
        assert_eq!(sub_intervals(Interval::new(1, 3), 5).count(), 6);
    }

    #[test]
    fn test_super_intervals_linear() {
        let supers: HashSet<_> = super_intervals(Interval::new(1, 2), 4, false)
            .map(|i| i.as_tuple())
            .collect();
        let expected: HashSet<_> = [(1, 2), (1, 3), (0, 2), (0, 3)].into_iter().collect();
        assert_eq!(supers, expected);
    }

    #[test]
    fn test_super_intervals_circular_are_exactly_the_containing_intervals() {
        for size in 1..8 {
            for interval in intervals(size, true) {
                let walked: Vec<Interval> = super_intervals(interval, size, true).collect();
                let unique: HashSet<Interval> = walked.iter().copied().collect();
                assert_eq!(unique.len(), walked.len(), "duplicates for {interval}");

                // brute force: every interval whose bins include all bins of `interval`,
                // walking in the same direction from a start outside or at interval.start
                let inner: HashSet<usize> = interval.bins(size).collect();
                for candidate in intervals(size, true) {
                    let bins: Vec<usize> = candidate.bins(size).collect();
                    let covers = inner.iter().all(|b| bins.contains(b));
                    let offset_start = bins.iter().position(|&b| b == interval.start);
                    let ordered = offset_start.is_some_and(|s| {
                        bins.len() - s >= interval.bin_count(size)
                    });
                    assert_eq!(
                        unique.contains(&candidate),
                        covers && ordered,
                        "size {size}, interval {interval}, candidate {candidate}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_threshold_and_entropy_table() {
        let counts = [1.0, 1.0, 1.0, 20.0, 1.0, 1.0, 1.0];
        let analysis = IntervalAnalysis::compute(&hist(&counts), false, 1.0).unwrap();
        assert_relative_eq!(analysis.threshold(), 28.0_f64.ln() / 26.0);
        assert_eq!(analysis.test_count(), 28.0);
        assert_eq!(analysis.total(), 26.0);

        let r: f64 = 20.0 / 26.0;
        let p: f64 = 1.0 / 7.0;
        let expected = r * (r / p).ln() + (1.0 - r) * ((1.0 - r) / (1.0 - p)).ln();
        assert_relative_eq!(analysis.entropy((3, 3)), expected);
        assert_relative_eq!(analysis.mass_proportion((3, 3)), r);
        assert_relative_eq!(analysis.length_proportion((3, 3)), p);
        assert!(analysis.nfa((3, 3)) < 1.0);

        // whole histogram: r == 1 and p == 1
        assert_eq!(analysis.entropy((0, 6)), 0.0);
        assert!(!analysis.is_candidate_mode((0, 6)));
    }

    #[test]
    fn test_zero_mass_interval_entropy() {
        let analysis =
            IntervalAnalysis::compute(&hist(&[0.0, 0.0, 0.0, 50.0]), false, 1.0).unwrap();
        assert_relative_eq!(analysis.entropy((0, 2)), -(0.25_f64).ln());
        assert!(analysis.is_gap((0, 2)));
        assert_relative_eq!(analysis.entropy((3, 3)), -(0.25_f64).ln());
        assert!(analysis.is_candidate_mode((3, 3)));
        assert_eq!(analysis.maximal_modes(), vec![Interval::new(3, 3)]);
    }

    #[test]
    fn test_gap_suppression_is_observed() {
        let counts = [1.0, 1.0, 30.0, 30.0, 1.0, 1.0, 1.0, 1.0, 30.0, 30.0, 1.0, 1.0];
        let observer = RecordingObserver::new();
        let analysis =
            IntervalAnalysis::compute_observed(&hist(&counts), false, 1.0, &observer).unwrap();

        assert!(analysis.is_candidate_mode((2, 9)));
        assert!(!analysis.is_meaningful_mode((2, 9)));
        assert!(analysis.is_gap((4, 7)));

        let trace = observer.trace();
        assert_eq!(trace.threshold, Some(analysis.threshold()));
        assert_eq!(trace.gaps, analysis.gaps());
        assert!(trace.suppressed.iter().any(|&(mode, _)| mode == Interval::new(2, 9)));
        for &(mode, gap) in &trace.suppressed {
            assert!(analysis.is_gap(gap));
            assert!(sub_intervals(mode, analysis.size()).any(|s| s == gap));
        }
        assert_eq!(
            trace.final_modes.iter().map(|m| m.interval).collect::<Vec<_>>(),
            vec![Interval::new(2, 3), Interval::new(8, 9)]
        );
    }

    #[test]
    fn test_rejects_bad_epsilon() {
        let h = hist(&[1.0, 2.0]);
        for epsilon in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                IntervalAnalysis::compute(&h, false, epsilon),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_single_bin_histogram() {
        let analysis = IntervalAnalysis::compute(&hist(&[7.0]), true, 1.0).unwrap();
        assert_eq!(analysis.entropy((0, 0)), 0.0);
        assert!(analysis.maximal_modes().is_empty());
        assert!(analysis.into_result().modes().is_empty());
    }
}

//! Test histograms for mode detection
//!
//! This module provides standardized histograms that can be used across all
//! tests to ensure consistency and reproducibility. Sampled histograms are
//! seeded, so the same call always returns the same counts.

use acontrario_histogram::Histogram;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use std::f64::consts::TAU;

/// Standard test histograms for mode detection
pub struct TestHistograms;

impl TestHistograms {
    /// Flat histogram `[5, 5, 5, 5, 5, 5]`: nothing is surprising
    pub fn uniform() -> Histogram {
        Self::from_counts(&[5.0; 6])
    }

    /// One sharp peak on bin 3 of 7
    pub fn single_peak() -> Histogram {
        Self::from_counts(&[1.0, 1.0, 1.0, 20.0, 1.0, 1.0, 1.0])
    }

    /// A peak split between the first and the last bin
    pub fn circular_wrap_peak() -> Histogram {
        Self::from_counts(&[20.0, 1.0, 1.0, 1.0, 1.0, 20.0])
    }

    /// Peaks on bins 2-3 and 8-9 separated by a deep valley
    pub fn two_peaks_with_valley() -> Histogram {
        Self::from_counts(&[1.0, 1.0, 30.0, 30.0, 1.0, 1.0, 1.0, 1.0, 30.0, 30.0, 1.0, 1.0])
    }

    /// All the mass in a single bin surrounded by empty bins
    pub fn isolated_spike() -> Histogram {
        Self::from_counts(&[0.0, 0.0, 0.0, 50.0, 0.0, 0.0, 0.0, 0.0])
    }

    /// 2000 samples from N(0, 1) binned on `[-4, 4)`
    pub fn sampled_unimodal(bins: usize, seed: u64) -> Histogram {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0_f64, 1.0).unwrap();
        let samples: Vec<f64> = (0..2000).map(|_| normal.sample(&mut rng)).collect();
        Self::bin(&samples, -4.0, 4.0, bins)
    }

    /// 1000 samples from N(-3, 0.8) and 1000 from N(3, 0.8) binned on `[-6, 6)`
    pub fn sampled_bimodal(bins: usize, seed: u64) -> Histogram {
        let mut rng = StdRng::seed_from_u64(seed);
        let left = Normal::new(-3.0_f64, 0.8).unwrap();
        let right = Normal::new(3.0_f64, 0.8).unwrap();

        let mut samples = Vec::with_capacity(2000);
        for _ in 0..1000 {
            samples.push(left.sample(&mut rng));
        }
        for _ in 0..1000 {
            samples.push(right.sample(&mut rng));
        }
        Self::bin(&samples, -6.0, 6.0, bins)
    }

    /// 1000 angles concentrated around 0 rad, binned on `[0, 2pi)`
    ///
    /// The peak straddles the first and last bins.
    pub fn sampled_angles(bins: usize, seed: u64) -> Histogram {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0_f64, 0.5).unwrap();
        let samples: Vec<f64> = (0..1000)
            .map(|_| normal.sample(&mut rng).rem_euclid(TAU))
            .collect();
        Self::bin(&samples, 0.0, TAU, bins)
    }

    /// Random counts in `[0, max)` with at least one non-empty bin
    pub fn random_counts(bins: usize, max: f64, seed: u64) -> Histogram {
        let mut rng = StdRng::seed_from_u64(seed);
        let uniform = Uniform::new(0.0, max);
        let mut counts: Vec<f64> = (0..bins).map(|_| uniform.sample(&mut rng).floor()).collect();
        counts[0] += 1.0;
        Self::from_counts(&counts)
    }

    fn bin(samples: &[f64], low: f64, high: f64, bins: usize) -> Histogram {
        let mut counts = vec![0.0; bins];
        let width = (high - low) / bins as f64;
        for &x in samples {
            if x >= low && x < high {
                let bin = (((x - low) / width) as usize).min(bins - 1);
                counts[bin] += 1.0;
            }
        }
        Self::from_counts(&counts)
    }

    fn from_counts(counts: &[f64]) -> Histogram {
        Histogram::new(counts.to_vec()).unwrap()
    }
}

/// Standard epsilon values for testing
pub struct TestParameters;

impl TestParameters {
    /// One expected false alarm, the usual choice
    pub const DEFAULT_EPSILON: f64 = 1.0;

    /// Strict detection: one false alarm per thousand histograms
    pub const STRICT_EPSILON: f64 = 1e-3;

    /// Lenient detection: accepts many false alarms
    pub const LENIENT_EPSILON: f64 = 10.0;
}

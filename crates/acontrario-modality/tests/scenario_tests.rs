//! Tests on small hand-made histograms with known modes

use acontrario_core::Error;
use acontrario_histogram::Histogram;
use acontrario_modality::test_data::{TestHistograms, TestParameters};
use acontrario_modality::{
    default_detector, detect_modes, IntervalAnalysis, ModeDetector, ModeDetectorBuilder,
    NullObserver,
};
use approx::assert_relative_eq;

fn modes(counts: &[f64], circular: bool) -> Vec<(usize, usize)> {
    detect_modes(counts, circular, TestParameters::DEFAULT_EPSILON).unwrap()
}

#[test]
fn test_uniform_histogram_has_no_mode() {
    assert!(modes(&[5.0; 6], false).is_empty());
    assert!(modes(&[5.0; 6], true).is_empty());
    assert!(modes(&[3.0; 4], true).is_empty());
}

#[test]
fn test_single_peak() {
    assert_eq!(modes(&[1.0, 1.0, 1.0, 20.0, 1.0, 1.0, 1.0], false), vec![(3, 3)]);
    assert_eq!(modes(&[0.0, 10.0, 0.0], false), vec![(1, 1)]);
}

#[test]
fn test_isolated_spike_with_empty_bins() {
    let histogram = TestHistograms::isolated_spike();
    let result = default_detector().detect(&histogram).unwrap();
    assert_eq!(result.intervals(), vec![(3, 3)]);
    assert_relative_eq!(result.modes()[0].mass, 1.0);

    let circular = ModeDetectorBuilder::new(NullObserver)
        .circular(true)
        .build()
        .detect(&histogram)
        .unwrap();
    assert_eq!(circular.intervals(), vec![(3, 3)]);
}

#[test]
fn test_two_peaks_separated_by_a_gap() {
    let counts = [1.0, 1.0, 30.0, 30.0, 1.0, 1.0, 1.0, 1.0, 30.0, 30.0, 1.0, 1.0];
    assert_eq!(modes(&counts, false), vec![(2, 3), (8, 9)]);
    assert_eq!(modes(&counts, true), vec![(2, 3), (8, 9)]);

    let histogram = Histogram::new(counts.to_vec()).unwrap();
    let analysis = IntervalAnalysis::compute(&histogram, false, 1.0).unwrap();
    assert_relative_eq!(analysis.threshold(), 0.034036787708512435, epsilon = 1e-12);
    assert!(analysis.is_candidate_mode((2, 9)));
    assert!(analysis.is_gap((4, 7)));
    assert!(!analysis.is_meaningful_mode((2, 9)));
}

#[test]
fn test_peak_on_the_edges_depends_on_topology() {
    let mut counts = vec![30.0];
    counts.extend([2.0; 8]);
    counts.extend([30.0, 30.0]);

    assert_eq!(modes(&counts, true), vec![(9, 0)]);
    assert_eq!(modes(&counts, false), vec![(0, 0), (9, 10)]);
}

#[test]
fn test_single_bin_histogram() {
    assert!(modes(&[7.0], false).is_empty());
    assert!(modes(&[7.0], true).is_empty());
}

#[test]
fn test_result_metadata() {
    let detector = ModeDetectorBuilder::new(NullObserver).epsilon(0.5).build();
    let result = detector.detect(&TestHistograms::single_peak()).unwrap();

    assert_eq!(result.size(), 7);
    assert_eq!(result.epsilon(), 0.5);
    assert!(!result.is_circular());
    assert_eq!(result.find_mode(3), Some(0));
    assert_eq!(result.find_mode(0), None);

    let summary = result.summary();
    assert_eq!(summary.mode_count, 1);
    assert_eq!(summary.total_bins, 7);
    assert!(summary.min_nfa.unwrap() < 0.5);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    assert!(matches!(detect_modes(&[], false, 1.0), Err(Error::InvalidInput(_))));
    assert!(matches!(detect_modes(&[0.0, 0.0], false, 1.0), Err(Error::InvalidInput(_))));
    assert!(matches!(detect_modes(&[1.0, -2.0], false, 1.0), Err(Error::InvalidInput(_))));
    assert!(matches!(detect_modes(&[1.0, f64::NAN], false, 1.0), Err(Error::InvalidInput(_))));
    assert!(matches!(detect_modes(&[1.0, 2.0], false, 0.0), Err(Error::InvalidParameter(_))));
    assert!(matches!(detect_modes(&[1.0, 2.0], true, -3.0), Err(Error::InvalidParameter(_))));
}

#[test]
fn test_strict_epsilon_keeps_fewer_candidates() {
    let histogram = TestHistograms::two_peaks_with_valley();
    let strict =
        IntervalAnalysis::compute(&histogram, false, TestParameters::STRICT_EPSILON).unwrap();
    let lenient =
        IntervalAnalysis::compute(&histogram, false, TestParameters::LENIENT_EPSILON).unwrap();

    assert!(strict.threshold() > lenient.threshold());
    assert!(strict.candidate_modes().len() <= lenient.candidate_modes().len());
    for interval in strict.candidate_modes() {
        assert!(lenient.is_candidate_mode(interval));
    }
}

#[test]
fn test_fractional_counts_match_integer_counts() {
    let fractional = [0.0, 36.4, 51.6, 26.3];
    assert_eq!(modes(&fractional, false), vec![(1, 3)]);
    assert_eq!(modes(&fractional, false), modes(&[0.0, 364.0, 516.0, 263.0], false));

    let analysis =
        IntervalAnalysis::compute(&Histogram::new(fractional.to_vec()).unwrap(), false, 1.0)
            .unwrap();
    assert_eq!(analysis.mass_proportion((1, 3)), 1.0);
    assert_relative_eq!(analysis.entropy((1, 3)), -(0.75_f64).ln());
    assert!(analysis.is_candidate_mode((1, 3)));
}

#[test]
fn test_whole_fractional_histogram_is_not_a_gap() {
    let counts = [241.416, 3.18, 0.77, 0.37, 729.7];
    for circular in [false, true] {
        let analysis =
            IntervalAnalysis::compute(&Histogram::new(counts.to_vec()).unwrap(), circular, 1.0)
                .unwrap();
        assert_eq!(analysis.mass_proportion((0, 4)), 1.0);
        assert_eq!(analysis.entropy((0, 4)), 0.0);
        assert!(!analysis.is_gap((0, 4)));
        for interval in analysis.intervals() {
            assert!(analysis.entropy(interval).is_finite(), "{interval}");
        }
    }
}

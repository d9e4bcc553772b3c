use crate::analysis::check_epsilon;
use crate::detector::NfaModeDetector;
use crate::observer::{DetectionObserver, NullObserver};
use acontrario_core::Result;
use serde::{Deserialize, Serialize};

/// Parameters of a mode detector, loadable from any serde format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Expected number of false detections allowed
    pub epsilon: f64,
    /// Whether the last bin is adjacent to the first one
    pub circular: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            circular: false,
        }
    }
}

impl DetectorConfig {
    /// Check that the parameters can be used for detection
    pub fn validate(&self) -> Result<()> {
        check_epsilon(self.epsilon)
    }
}

/// Builder for configuring and creating mode detectors.
pub struct ModeDetectorBuilder<V> {
    observer: V,
    config: DetectorConfig,
}

impl<V> ModeDetectorBuilder<V>
where
    V: DetectionObserver,
{
    /// Creates a new mode detector builder.
    ///
    /// # Arguments
    /// * `observer` - Receives the intermediate stages of each detection
    pub fn new(observer: V) -> Self {
        Self {
            observer,
            config: DetectorConfig::default(),
        }
    }

    /// Sets the epsilon parameter (> 0).
    ///
    /// Higher epsilon accepts more false alarms and detects more modes.
    /// Lower epsilon only keeps very prominent modes.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Sets whether histograms are circular (e.g. angles or hues).
    pub fn circular(mut self, circular: bool) -> Self {
        self.config.circular = circular;
        self
    }

    /// Replaces all parameters at once.
    pub fn config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the configured mode detector.
    pub fn build(self) -> NfaModeDetector<V> {
        NfaModeDetector::new(self.observer, self.config.epsilon, self.config.circular)
    }
}

/// Convenience function for creating a default mode detector.
/// Uses epsilon = 1 on a linear histogram.
pub fn default_detector() -> NfaModeDetector<NullObserver> {
    ModeDetectorBuilder::new(NullObserver).build()
}

/// Convenience function for creating a detector for circular histograms.
pub fn circular_detector() -> NfaModeDetector<NullObserver> {
    ModeDetectorBuilder::new(NullObserver).circular(true).build()
}

/// Convenience function for creating a linear detector with a custom epsilon.
pub fn detector_with_epsilon(epsilon: f64) -> NfaModeDetector<NullObserver> {
    ModeDetectorBuilder::new(NullObserver).epsilon(epsilon).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{TestHistograms, TestParameters};
    use crate::traits::ModeDetector;

    #[test]
    fn test_builder_pattern() {
        let detector = ModeDetectorBuilder::new(NullObserver)
            .epsilon(TestParameters::STRICT_EPSILON)
            .circular(true)
            .build();
        assert_eq!(detector.epsilon(), TestParameters::STRICT_EPSILON);
        assert!(detector.is_circular());

        let result = detector.detect(&TestHistograms::circular_wrap_peak());
        assert!(result.is_ok());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(default_detector().epsilon(), 1.0);
        assert!(!default_detector().is_circular());
        assert!(circular_detector().is_circular());
        assert_eq!(detector_with_epsilon(0.5).epsilon(), 0.5);
    }

    #[test]
    fn test_config_from_json() {
        let config: DetectorConfig = serde_json::from_str(r#"{"circular": true}"#).unwrap();
        assert_eq!(
            config,
            DetectorConfig {
                epsilon: 1.0,
                circular: true
            }
        );
        assert!(config.validate().is_ok());

        let detector = ModeDetectorBuilder::new(NullObserver).config(config).build();
        assert!(detector.is_circular());

        let bad = DetectorConfig {
            epsilon: -2.0,
            circular: false,
        };
        assert!(bad.validate().is_err());
    }
}

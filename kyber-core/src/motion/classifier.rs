//! Threshold classifier for blade motion
//!
//! The classifier looks at one sample at a time: no filtering, no history.
//! A violent motion must never be reported as a mere swing, so the clash
//! threshold is checked first and configuration guarantees it is strictly
//! above the swing threshold.

use crate::config::MotionConfig;
use crate::traits::{Acceleration, SensorError};

/// Discrete motion tier for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionEvent {
    /// Below the swing threshold
    #[default]
    Idle,
    /// Above the swing threshold, at or below the clash threshold
    Swing,
    /// Above the clash threshold
    Clash,
}

/// Magnitude threshold classifier
#[derive(Debug, Clone, Copy)]
pub struct MotionClassifier {
    swing_threshold: f32,
    clash_threshold: f32,
}

impl MotionClassifier {
    /// Create a classifier from validated thresholds
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            swing_threshold: config.swing_threshold,
            clash_threshold: config.clash_threshold,
        }
    }

    /// Classify an acceleration vector (m/s²)
    pub fn classify(&self, ax: f32, ay: f32, az: f32) -> MotionEvent {
        self.classify_magnitude(Acceleration::new(ax, ay, az).magnitude())
    }

    /// Classify a precomputed magnitude
    pub fn classify_magnitude(&self, magnitude: f32) -> MotionEvent {
        if magnitude > self.clash_threshold {
            MotionEvent::Clash
        } else if magnitude > self.swing_threshold {
            MotionEvent::Swing
        } else {
            MotionEvent::Idle
        }
    }

    /// Classify a sensor reading
    ///
    /// An unavailable sensor reads as no motion for this tick.
    pub fn classify_reading(&self, reading: Result<Acceleration, SensorError>) -> MotionEvent {
        match reading {
            Ok(a) => self.classify(a.x, a.y, a.z),
            Err(_) => MotionEvent::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier() -> MotionClassifier {
        MotionClassifier::new(&MotionConfig::default())
    }

    #[test]
    fn test_at_rest_is_idle() {
        // Gravity alone on one axis
        assert_eq!(classifier().classify(0.0, 0.0, 9.8), MotionEvent::Idle);
    }

    #[test]
    fn test_swing_band() {
        // Exactly 15.0 is not above the swing threshold
        assert_eq!(classifier().classify(12.0, 9.0, 0.0), MotionEvent::Idle);
        assert_eq!(classifier().classify(12.0, 9.0, 1.0), MotionEvent::Swing);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let c = classifier();
        assert_eq!(c.classify_magnitude(15.0), MotionEvent::Idle);
        assert_eq!(c.classify_magnitude(20.0), MotionEvent::Swing);
        assert_eq!(c.classify_magnitude(20.001), MotionEvent::Clash);
    }

    #[test]
    fn test_clash_uses_all_axes() {
        assert_eq!(classifier().classify(15.0, 15.0, 5.0), MotionEvent::Clash);
        assert_eq!(classifier().classify(-25.0, 0.0, 0.0), MotionEvent::Clash);
    }

    #[test]
    fn test_sensor_failure_is_idle() {
        assert_eq!(
            classifier().classify_reading(Err(SensorError::Bus)),
            MotionEvent::Idle
        );
        assert_eq!(
            classifier().classify_reading(Ok(Acceleration::new(0.0, 25.0, 0.0))),
            MotionEvent::Clash
        );
    }

    proptest! {
        #[test]
        fn prop_classification_matches_thresholds(m in 0.0f32..100.0) {
            let c = classifier();
            let expected = if m > 20.0 {
                MotionEvent::Clash
            } else if m > 15.0 {
                MotionEvent::Swing
            } else {
                MotionEvent::Idle
            };
            prop_assert_eq!(c.classify_magnitude(m), expected);
            // sqrt(m²) is exact for a single-axis vector
            prop_assert_eq!(c.classify(m, 0.0, 0.0), expected);
        }

        #[test]
        fn prop_clash_never_reported_as_swing(
            x in -80.0f32..80.0,
            y in -80.0f32..80.0,
            z in -80.0f32..80.0,
        ) {
            let c = classifier();
            let magnitude = Acceleration::new(x, y, z).magnitude();
            let event = c.classify(x, y, z);
            prop_assert_eq!(event == MotionEvent::Clash, magnitude > 20.0);
        }
    }
}

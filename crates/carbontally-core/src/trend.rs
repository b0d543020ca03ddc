//! Synthetic consumption trends.
//!
//! Trends simulate a year-over-year change; they are drawn, not derived
//! from historical data, and every draw is independent.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rng::SynthRng;

/// Direction of a consumption trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Synthetic trend attached to a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Magnitude of the change in percent, always non-negative.
    pub percentage: f64,
}

impl Trend {
    /// Build a trend from a signed variation in percent.
    ///
    /// A variation of exactly zero counts as downward with zero magnitude.
    pub fn from_variation(variation: f64) -> Self {
        let direction = if variation > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        Self {
            direction,
            percentage: variation.abs(),
        }
    }

    /// Draw a trend with a variation uniform in [-15, +15) percent.
    pub fn generate(rng: &mut SynthRng) -> Self {
        Self::from_variation(rng.gen_range(-15.0..15.0))
    }

    /// True iff the trend is upward and its magnitude strictly exceeds 20
    /// percent. Drawn variations stay below that threshold, so alerts only
    /// arise from variations supplied directly.
    pub fn peak_alert(&self) -> bool {
        self.direction == TrendDirection::Up && self.percentage > 20.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_variation_is_up() {
        let trend = Trend::from_variation(25.0);
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percentage, 25.0);
        assert!(trend.peak_alert());
    }

    #[test]
    fn test_negative_variation_is_down() {
        let trend = Trend::from_variation(-10.0);
        assert_eq!(trend.direction, TrendDirection::Down);
        assert_eq!(trend.percentage, 10.0);
        assert!(!trend.peak_alert());
    }

    #[test]
    fn test_zero_variation_is_down() {
        let trend = Trend::from_variation(0.0);
        assert_eq!(trend.direction, TrendDirection::Down);
        assert_eq!(trend.percentage, 0.0);
    }

    #[test]
    fn test_peak_alert_boundary_is_strict() {
        let trend = Trend::from_variation(20.0);
        assert_eq!(trend.direction, TrendDirection::Up);
        assert!(!trend.peak_alert());
    }

    #[test]
    fn test_large_downward_variation_never_alerts() {
        assert!(!Trend::from_variation(-50.0).peak_alert());
    }

    #[test]
    fn test_generated_trends_stay_in_range() {
        let mut rng = SynthRng::from_seed(99);
        for _ in 0..1000 {
            let trend = Trend::generate(&mut rng);
            // The low endpoint -15.0 is includable, so its magnitude can
            // reach exactly 15.
            assert!(trend.percentage <= 15.0);
            assert!(!trend.peak_alert());
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let mut a = SynthRng::from_seed(4);
        let mut b = SynthRng::from_seed(4);
        for _ in 0..50 {
            assert_eq!(Trend::generate(&mut a), Trend::generate(&mut b));
        }
    }
}

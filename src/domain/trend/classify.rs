//! Trend normalization and classification

use crate::domain::trend::slope::count_slope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Norm slope above which a category is rising (strict)
pub const RISING_THRESHOLD: f64 = 0.15;

/// Norm slope below which a category is falling (strict)
pub const FALLING_THRESHOLD: f64 = -0.15;

/// Direction of recent activity for an emotion category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Scale a slope by the mean count, flooring the mean at 1.0
///
/// A mean below 1.0 counts as 1.0.
pub fn normalize(slope: f64, mean: f64) -> f64 {
    slope / mean.max(1.0)
}

/// Classify a normalized slope
pub fn classify(norm_slope: f64) -> Trend {
    if norm_slope > RISING_THRESHOLD {
        Trend::Rising
    } else if norm_slope < FALLING_THRESHOLD {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Arithmetic mean of a count array (denominator floored at 1)
pub fn mean(counts: &[u32]) -> f64 {
    let total: f64 = counts.iter().map(|&c| f64::from(c)).sum();
    total / counts.len().max(1) as f64
}

/// Per-emotion statistics derived from a count array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionStats {
    pub slope: f64,
    pub mean: f64,
    pub norm_slope: f64,
    pub trend: Trend,
}

impl EmotionStats {
    pub fn from_counts(counts: &[u32]) -> Self {
        let slope = count_slope(counts);
        let mean = mean(counts);
        let norm_slope = normalize(slope, mean);
        EmotionStats {
            slope,
            mean,
            norm_slope,
            trend: classify(norm_slope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(classify(0.15), Trend::Stable);
        assert_eq!(classify(0.1501), Trend::Rising);
        assert_eq!(classify(-0.15), Trend::Stable);
        assert_eq!(classify(-0.1501), Trend::Falling);
        assert_eq!(classify(0.0), Trend::Stable);
    }

    #[test]
    fn test_normalize_floors_mean() {
        assert_eq!(normalize(0.5, 0.2), 0.5);
        assert_eq!(normalize(0.5, 0.0), 0.5);
        assert_eq!(normalize(3.0, 6.0), 0.5);
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1, 2, 3]), 2.0);
    }

    #[test]
    fn test_stats_for_silent_category() {
        let stats = EmotionStats::from_counts(&[0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(stats.slope, 0.0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.norm_slope, 0.0);
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn test_stats_single_day() {
        let stats = EmotionStats::from_counts(&[1]);
        assert_eq!(stats.slope, 0.0);
        assert_eq!(stats.mean, 1.0);
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn test_stats_rising_and_falling() {
        assert_eq!(EmotionStats::from_counts(&[1, 2, 4]).trend, Trend::Rising);
        assert_eq!(EmotionStats::from_counts(&[4, 2, 1]).trend, Trend::Falling);
        // slope 0.3 over a mean of 3.25 stays stable
        let busy = EmotionStats::from_counts(&[3, 3, 3, 4]);
        assert!((busy.slope - 0.3).abs() < 1e-12);
        assert_eq!(busy.trend, Trend::Stable);
    }

    #[test]
    fn test_trend_display_matches_serde() {
        assert_eq!(Trend::Falling.to_string(), "falling");
        assert_eq!(format!("[{:<8}]", Trend::Stable), "[stable  ]");
        assert_eq!(
            serde_json::to_value(Trend::Rising).unwrap(),
            serde_json::json!(Trend::Rising.as_str())
        );
    }
}

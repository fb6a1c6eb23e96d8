//! Occupancy classification for evacuation centers
//!
//! The displayed percentage is clamped to `0..=100`. The unclamped ratio is
//! kept alongside it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EvacError;

/// Percentage at or above which a center is critical
pub const CRITICAL_THRESHOLD: f64 = 90.0;
/// Percentage at or above which a center is filling up
pub const WARNING_THRESHOLD: f64 = 70.0;

/// Discrete capacity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityTier {
    Normal,
    Warning,
    Critical,
}

impl CapacityTier {
    /// Thresholds are inclusive: exactly 90.0 is critical, exactly 70.0 is a warning
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= CRITICAL_THRESHOLD {
            CapacityTier::Critical
        } else if percentage >= WARNING_THRESHOLD {
            CapacityTier::Warning
        } else {
            CapacityTier::Normal
        }
    }

    /// Progress bar colour for this tier
    #[must_use]
    pub fn color_hex(&self) -> &'static str {
        match self {
            CapacityTier::Critical => "#E74C3C",
            CapacityTier::Warning => "#F1C40F",
            CapacityTier::Normal => "#2ECC71",
        }
    }
}

impl fmt::Display for CapacityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CapacityTier::Normal => "Normal",
            CapacityTier::Warning => "Warning",
            CapacityTier::Critical => "Critical",
        };
        write!(f, "{label}")
    }
}

/// Result of classifying an occupancy pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityStatus {
    /// Occupancy as a percentage of capacity, clamped to `0..=100`
    pub percentage: f64,
    /// current / maximum, unclamped
    pub raw_ratio: f64,
    pub tier: CapacityTier,
}

impl CapacityStatus {
    #[must_use]
    pub fn is_over_capacity(&self) -> bool {
        self.raw_ratio > 1.0
    }
}

pub struct CapacityClassifier;

impl CapacityClassifier {
    /// Classify `current` occupants against a `maximum` occupancy.
    ///
    /// # Errors
    ///
    /// Returns [`EvacError::InvalidArgument`] when `maximum` is zero.
    pub fn classify(current: u32, maximum: u32) -> crate::Result<CapacityStatus> {
        if maximum == 0 {
            return Err(EvacError::invalid_argument(
                "maximum occupancy must be greater than zero",
            ));
        }

        let raw_ratio = f64::from(current) / f64::from(maximum);
        let percentage = (f64::from(current) * 100.0 / f64::from(maximum)).clamp(0.0, 100.0);

        Ok(CapacityStatus {
            percentage,
            raw_ratio,
            tier: CapacityTier::from_percentage(percentage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(89, 100, 89.0, CapacityTier::Warning)]
    #[case(90, 100, 90.0, CapacityTier::Critical)]
    #[case(70, 100, 70.0, CapacityTier::Warning)]
    #[case(69, 100, 69.0, CapacityTier::Normal)]
    #[case(0, 450, 0.0, CapacityTier::Normal)]
    #[case(273, 300, 91.0, CapacityTier::Critical)]
    #[case(150, 100, 100.0, CapacityTier::Critical)]
    fn test_classify(
        #[case] current: u32,
        #[case] maximum: u32,
        #[case] percentage: f64,
        #[case] tier: CapacityTier,
    ) {
        let status = CapacityClassifier::classify(current, maximum).unwrap();
        assert_eq!(status.percentage, percentage);
        assert_eq!(status.tier, tier);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(u32::MAX)]
    fn test_zero_maximum_is_rejected(#[case] current: u32) {
        let result = CapacityClassifier::classify(current, 0);
        assert!(matches!(result, Err(EvacError::InvalidArgument { .. })));
    }

    #[test]
    fn test_raw_ratio_survives_clamp() {
        let full = CapacityClassifier::classify(100, 100).unwrap();
        let tripled = CapacityClassifier::classify(300, 100).unwrap();

        assert_eq!(full.percentage, tripled.percentage);
        assert_eq!(tripled.raw_ratio, 3.0);
        assert!(tripled.is_over_capacity());
        assert!(!full.is_over_capacity());
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(CapacityTier::Critical.color_hex(), "#E74C3C");
        assert_eq!(CapacityTier::Warning.color_hex(), "#F1C40F");
        assert_eq!(CapacityTier::Normal.color_hex(), "#2ECC71");
        assert_eq!(CapacityTier::Warning.to_string(), "Warning");
    }
}

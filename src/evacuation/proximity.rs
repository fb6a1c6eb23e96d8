//! Per-center proximity and capacity assessment
//!
//! Combines the distance model and the capacity classifier over a directory,
//! relative to an optional device position.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use super::capacity::{CapacityStatus, CapacityTier};
use super::directory::CenterDirectory;
use super::distance::{DistanceResult, GeoDistanceModel, UNKNOWN_DISTANCE};
use crate::models::{EvacuationCenter, GeoPoint};

/// A center with its distance from the device and its capacity status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterAssessment {
    pub center: EvacuationCenter,
    /// `None` when the device position or the center coordinates are unknown
    pub distance: Option<DistanceResult>,
    pub capacity: CapacityStatus,
}

impl CenterAssessment {
    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        self.distance.as_ref().map(|d| d.kilometers)
    }

    /// e.g. `1.35 km away`, or `distance unknown`
    #[must_use]
    pub fn distance_display(&self) -> String {
        match &self.distance {
            Some(distance) => format!("{} away", distance.display),
            None => UNKNOWN_DISTANCE.to_string(),
        }
    }
}

impl fmt::Display for CenterAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.center.id, self.center.name)?;
        writeln!(f, "   📍 {}", self.center.address)?;
        writeln!(f, "   🧭 {}", self.distance_display())?;
        write!(
            f,
            "   👥 {} ({:.0}%, {})",
            self.center.occupancy_display(),
            self.capacity.percentage,
            self.capacity.tier
        )?;
        if self.capacity.is_over_capacity() {
            write!(f, " - over capacity ({:.0}%)", self.capacity.raw_ratio * 100.0)?;
        }
        if !self.center.facilities.is_empty() {
            let labels: Vec<&str> = self
                .center
                .facilities
                .iter()
                .map(|facility| facility.label.as_str())
                .collect();
            write!(f, "\n   🏥 {}", labels.join(", "))?;
        }
        Ok(())
    }
}

/// Nearest first; unknown distances sort after every known one
fn by_distance(a: &CenterAssessment, b: &CenterAssessment) -> Ordering {
    match (a.distance_km(), b.distance_km()) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub struct ProximitySearch;

impl ProximitySearch {
    pub fn assess(
        center: &EvacuationCenter,
        origin: Option<&GeoPoint>,
    ) -> crate::Result<CenterAssessment> {
        Ok(CenterAssessment {
            distance: GeoDistanceModel::describe(origin, center.location.as_ref()),
            capacity: center.capacity_status()?,
            center: center.clone(),
        })
    }

    /// Assess every center in the directory, nearest first
    pub fn assess_all(
        directory: &dyn CenterDirectory,
        origin: Option<&GeoPoint>,
    ) -> crate::Result<Vec<CenterAssessment>> {
        let mut assessments = directory
            .list()
            .iter()
            .map(|center| Self::assess(center, origin))
            .collect::<crate::Result<Vec<_>>>()?;

        // sort_by is stable, so unknown distances keep directory order
        assessments.sort_by(by_distance);

        debug!(
            "Assessed {} centers (origin known: {})",
            assessments.len(),
            origin.is_some()
        );
        Ok(assessments)
    }

    /// Keep assessments with a known distance of at most `radius_km`
    #[must_use]
    pub fn within_radius(
        assessments: Vec<CenterAssessment>,
        radius_km: f64,
    ) -> Vec<CenterAssessment> {
        assessments
            .into_iter()
            .filter(|a| a.distance_km().is_some_and(|km| km <= radius_km))
            .collect()
    }

    /// Closest center that is not critically full
    #[must_use]
    pub fn nearest_available(assessments: &[CenterAssessment]) -> Option<&CenterAssessment> {
        assessments
            .iter()
            .filter(|a| a.distance.is_some() && a.capacity.tier != CapacityTier::Critical)
            .min_by(|a, b| by_distance(a, b))
    }
}

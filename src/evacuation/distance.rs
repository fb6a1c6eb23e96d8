//! Great-circle distance between two points and its display form

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::GeoPoint;

/// Earth radius used by the haversine formula, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Shown when either end of a distance is unknown
pub const UNKNOWN_DISTANCE: &str = "distance unknown";

/// A computed distance together with its display string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub kilometers: f64,
    pub display: String,
}

impl DistanceResult {
    #[must_use]
    pub fn from_km(kilometers: f64) -> Self {
        Self {
            kilometers,
            display: GeoDistanceModel::format(kilometers),
        }
    }
}

/// Haversine distance model
pub struct GeoDistanceModel;

impl GeoDistanceModel {
    /// Distance between `a` and `b` in kilometers
    #[must_use]
    pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
        let km = haversine::distance(
            haversine::Location {
                latitude: a.latitude(),
                longitude: a.longitude(),
            },
            haversine::Location {
                latitude: b.latitude(),
                longitude: b.longitude(),
            },
            haversine::Units::Kilometers,
        );

        // Rounding can push the haversine term past 1 for antipodal pairs,
        // which makes the crate return NaN.
        if km.is_finite() {
            km
        } else {
            std::f64::consts::PI * EARTH_RADIUS_KM
        }
    }

    /// Meters below 1 km, otherwise kilometers rounded half-up to two decimals
    #[must_use]
    pub fn format(km: f64) -> String {
        if km < 1.0 {
            format!("{}m", (km * 1000.0).round() as i64)
        } else {
            format!("{:.2} km", (km * 100.0).round() / 100.0)
        }
    }

    #[must_use]
    pub fn measure(a: &GeoPoint, b: &GeoPoint) -> DistanceResult {
        let result = DistanceResult::from_km(Self::distance_km(a, b));
        debug!("Distance {} -> {}: {}", a, b, result.display);
        result
    }

    /// `None` when either point is unknown
    #[must_use]
    pub fn describe(
        origin: Option<&GeoPoint>,
        destination: Option<&GeoPoint>,
    ) -> Option<DistanceResult> {
        match (origin, destination) {
            (Some(origin), Some(destination)) => Some(Self::measure(origin, destination)),
            _ => None,
        }
    }
}

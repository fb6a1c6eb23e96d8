//! Geographic point model with validated coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EvacError;

/// A validated latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = EvacError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Create a point, rejecting coordinates outside -90..=90 / -180..=180
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EvacError::invalid_argument(format!(
                "latitude {latitude} is outside -90..=90"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(EvacError::invalid_argument(format!(
                "longitude {longitude} is outside -180..=180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// `lat,lon` as expected by maps query parameters
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Round coordinates to `precision` decimal places
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_coordinates())
    }
}

/// Parses `"lat,lon"`, whitespace around either part allowed
impl FromStr for GeoPoint {
    type Err = EvacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or_else(|| {
            EvacError::invalid_argument(format!("expected 'lat,lon', got '{s}'"))
        })?;

        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| EvacError::invalid_argument(format!("invalid latitude: {lat}")))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| EvacError::invalid_argument(format!("invalid longitude: {lon}")))?;

        GeoPoint::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.1).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_parse_from_str() {
        let point: GeoPoint = "16.4119, 120.5924".parse().unwrap();
        assert_eq!(point.latitude(), 16.4119);
        assert_eq!(point.longitude(), 120.5924);

        assert!("16.4119".parse::<GeoPoint>().is_err());
        assert!("north,120".parse::<GeoPoint>().is_err());
        assert!(matches!(
            "95,120".parse::<GeoPoint>(),
            Err(EvacError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_query_and_display() {
        let point = GeoPoint::new(16.4119, 120.5924).unwrap();
        assert_eq!(point.to_query(), "16.4119,120.5924");
        assert_eq!(point.to_string(), "16.4119, 120.5924");
    }

    #[test]
    fn test_location_rounded_coordinates() {
        let point = GeoPoint::new(46.818_234, 8.227_456).unwrap();
        let (lat, lon) = point.rounded_coordinates(2);
        assert_eq!(lat, 46.82);
        assert_eq!(lon, 8.23);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: GeoPoint =
            serde_json::from_str(r#"{"latitude": 16.4, "longitude": 120.59}"#).unwrap();
        assert_eq!(ok.latitude(), 16.4);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude": 120.59, "longitude": 16.4}"#);
        assert!(bad.is_err());
    }
}

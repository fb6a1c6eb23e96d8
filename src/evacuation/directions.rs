//! Maps deep links for turn-by-turn directions to a center
//!
//! The maps application itself is opaque; this module only formats the
//! origin and destination into the URI each platform expects.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::distance::{DistanceResult, GeoDistanceModel};
use crate::error::EvacError;
use crate::models::{EvacuationCenter, GeoPoint};

const WEB_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";
const OSM_URL: &str = "https://www.openstreetmap.org";
const MAP_ZOOM: u8 = 15;
const EMBED_SPAN_DEG: f64 = 0.01;

/// Target maps application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapsPlatform {
    Ios,
    Android,
    #[default]
    Web,
}

impl fmt::Display for MapsPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapsPlatform::Ios => "ios",
            MapsPlatform::Android => "android",
            MapsPlatform::Web => "web",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Option<GeoPoint>,
    pub destination: GeoPoint,
    pub label: String,
}

impl DirectionsRequest {
    /// Directions from `origin` (if known) to `center`.
    ///
    /// # Errors
    ///
    /// [`EvacError::MissingCoordinates`] when the center has no location.
    pub fn for_center(center: &EvacuationCenter, origin: Option<GeoPoint>) -> crate::Result<Self> {
        let destination = center
            .location
            .ok_or_else(|| EvacError::missing_coordinates(&center.name))?;

        Ok(Self {
            origin,
            destination,
            label: center.name.clone(),
        })
    }

    pub fn distance(&self) -> Option<DistanceResult> {
        self.origin
            .as_ref()
            .map(|origin| GeoDistanceModel::measure(origin, &self.destination))
    }

    /// Deep link for `platform`
    #[must_use]
    pub fn uri(&self, platform: MapsPlatform) -> String {
        let destination = self.destination.to_query();
        let label = urlencoding::encode(&self.label);

        match (platform, &self.origin) {
            (MapsPlatform::Ios, Some(origin)) => {
                format!("maps://?saddr={}&daddr={destination}", origin.to_query())
            }
            (MapsPlatform::Ios, None) => format!("maps:0,0?q={label}@{destination}"),
            // geo: has no origin parameter, Android hands the web URL to the maps app
            (MapsPlatform::Android, None) => format!("geo:0,0?q={destination}({label})"),
            (MapsPlatform::Android | MapsPlatform::Web, Some(origin)) => format!(
                "{WEB_DIRECTIONS_URL}&origin={}&destination={destination}",
                origin.to_query()
            ),
            (MapsPlatform::Web, None) => {
                format!("{WEB_DIRECTIONS_URL}&destination={destination}")
            }
        }
    }

    /// OpenStreetMap page centred on the destination
    #[must_use]
    pub fn map_link(&self) -> String {
        let lat = self.destination.latitude();
        let lon = self.destination.longitude();
        format!("{OSM_URL}/?mlat={lat}&mlon={lon}#map={MAP_ZOOM}/{lat}/{lon}")
    }

    /// Embeddable OpenStreetMap view with a marker on the destination
    #[must_use]
    pub fn embed_url(&self) -> String {
        let lat = self.destination.latitude();
        let lon = self.destination.longitude();
        format!(
            "{OSM_URL}/export/embed.html?bbox={:.4},{:.4},{:.4},{:.4}&layer=mapnik&marker={lat},{lon}",
            lon - EMBED_SPAN_DEG,
            lat - EMBED_SPAN_DEG,
            lon + EMBED_SPAN_DEG,
            lat + EMBED_SPAN_DEG,
        )
    }
}

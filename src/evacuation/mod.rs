//! Evacuation module
//!
//! - Distance: haversine distance and its display string
//! - Capacity: occupancy classification into normal/warning/critical
//! - Directory: the read-only list of evacuation centers
//! - Proximity: distance and capacity combined per center
//! - Directions: maps deep links from the device to a center

pub mod capacity;
pub mod directions;
pub mod directory;
pub mod distance;
pub mod proximity;

pub use capacity::{CapacityClassifier, CapacityStatus, CapacityTier};
pub use directions::{DirectionsRequest, MapsPlatform};
pub use directory::{CenterDirectory, StaticDirectory};
pub use distance::{DistanceResult, GeoDistanceModel, UNKNOWN_DISTANCE};
pub use proximity::{CenterAssessment, ProximitySearch};

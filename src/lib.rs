//! E-Baguio-ate evacuation engine
//!
//! This library provides the evacuation-center logic behind the E-Baguio-ate
//! community emergency app: distance from the device to each center,
//! occupancy classification, the center directory, and maps directions.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod evacuation;
pub mod models;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::EvacError;
pub use evacuation::{
    CapacityClassifier, CapacityStatus, CapacityTier, CenterAssessment, CenterDirectory,
    DirectionsRequest, DistanceResult, GeoDistanceModel, MapsPlatform, ProximitySearch,
    StaticDirectory,
};
pub use models::{EvacuationCenter, Facility, GeoPoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, EvacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

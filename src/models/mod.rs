//! Data models for the evacuation engine
//!
//! - Location: validated geographic coordinates
//! - Center: evacuation center records and their facilities

pub mod center;
pub mod location;

pub use center::{EvacuationCenter, Facility};
pub use location::GeoPoint;

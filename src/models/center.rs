//! Evacuation center records

use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::error::EvacError;
use crate::evacuation::capacity::{CapacityClassifier, CapacityStatus};

/// A facility offered at a center, keyed by the icon shown next to its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub icon: String,
    pub label: String,
}

impl Facility {
    pub fn new(icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
        }
    }
}

/// An evacuation center as listed in the directory.
///
/// Records are values: the `with_*` methods consume the record and return an
/// updated copy instead of mutating shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationCenter {
    pub id: u32,
    pub name: String,
    pub address: String,
    /// `None` when the coordinates of the center are unknown
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Maximum occupancy
    pub capacity: u32,
    /// May exceed `capacity` when the center is overcrowded
    #[serde(default)]
    pub current_occupancy: u32,
    #[serde(default)]
    pub facilities: Vec<Facility>,
}

impl EvacuationCenter {
    /// Create an empty, unlocated center
    pub fn new(
        id: u32,
        name: impl Into<String>,
        address: impl Into<String>,
        capacity: u32,
    ) -> crate::Result<Self> {
        let center = Self {
            id,
            name: name.into(),
            address: address.into(),
            location: None,
            capacity,
            current_occupancy: 0,
            facilities: Vec::new(),
        };
        center.validate()?;
        Ok(center)
    }

    #[must_use]
    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_occupancy(mut self, current_occupancy: u32) -> Self {
        self.current_occupancy = current_occupancy;
        self
    }

    #[must_use]
    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.facilities.push(facility);
        self
    }

    /// Check the invariants a directory relies on
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(EvacError::invalid_argument(format!(
                "center {} has an empty name",
                self.id
            )));
        }
        if self.capacity == 0 {
            return Err(EvacError::invalid_argument(format!(
                "center '{}' must have a positive capacity",
                self.name
            )));
        }
        Ok(())
    }

    pub fn capacity_status(&self) -> crate::Result<CapacityStatus> {
        CapacityClassifier::classify(self.current_occupancy, self.capacity)
    }

    /// Occupancy as shown on the center card, e.g. `273/300`
    #[must_use]
    pub fn occupancy_display(&self) -> String {
        format!("{}/{}", self.current_occupancy, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evacuation::capacity::CapacityTier;

    #[test]
    fn test_new_rejects_invalid_records() {
        assert!(EvacuationCenter::new(1, "", "Somewhere", 10).is_err());
        assert!(EvacuationCenter::new(1, "Gym", "Somewhere", 0).is_err());
    }

    #[test]
    fn test_updates_produce_new_record() {
        let original = EvacuationCenter::new(3, "Burnham Park Pavilion", "Burnham Park", 300)
            .unwrap()
            .with_facility(Facility::new("medical-outline", "Medical Station"));
        let updated = original.clone().with_occupancy(273);

        assert_eq!(original.current_occupancy, 0);
        assert_eq!(updated.current_occupancy, 273);
        assert_eq!(updated.occupancy_display(), "273/300");
        assert_eq!(updated.facilities, original.facilities);
    }

    #[test]
    fn test_capacity_status_over_capacity() {
        let center = EvacuationCenter::new(9, "Overflow Hall", "Session Rd", 100)
            .unwrap()
            .with_occupancy(150);
        let status = center.capacity_status().unwrap();
        assert_eq!(status.percentage, 100.0);
        assert_eq!(status.tier, CapacityTier::Critical);
        assert!(status.is_over_capacity());
    }

    #[test]
    fn test_deserialize_defaults() {
        let center: EvacuationCenter = serde_json::from_str(
            r#"{"id": 7, "name": "Barangay Hall", "address": "Irisan", "capacity": 80}"#,
        )
        .unwrap();
        assert!(center.location.is_none());
        assert_eq!(center.current_occupancy, 0);
        assert!(center.facilities.is_empty());
    }
}

//! Read-only directory of evacuation centers
//!
//! Consumers depend on the [`CenterDirectory`] trait only, so the built-in
//! table can be replaced by a file- or network-backed source without touching
//! distance or capacity code.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use tracing::{info, instrument};

use crate::error::EvacError;
use crate::models::EvacuationCenter;

const BUILTIN_CENTERS: &str = include_str!("baguio_centers.json");

static BUILTIN: LazyLock<StaticDirectory> = LazyLock::new(|| {
    StaticDirectory::parse_json(BUILTIN_CENTERS).expect("embedded center table is valid")
});

/// Source of evacuation center records
pub trait CenterDirectory: Send + Sync {
    /// All centers, in directory order. Every call returns the same records.
    fn list(&self) -> Vec<EvacuationCenter>;

    fn find(&self, id: u32) -> Option<EvacuationCenter> {
        self.list().into_iter().find(|center| center.id == id)
    }
}

/// Fixed in-memory table of centers
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    centers: Vec<EvacuationCenter>,
}

impl StaticDirectory {
    /// Build a directory, validating every record and rejecting duplicate ids
    pub fn new(centers: Vec<EvacuationCenter>) -> crate::Result<Self> {
        let mut seen = HashSet::new();
        for center in &centers {
            center
                .validate()
                .map_err(|e| EvacError::directory(e.to_string()))?;
            if !seen.insert(center.id) {
                return Err(EvacError::directory(format!(
                    "duplicate center id {}",
                    center.id
                )));
            }
        }
        Ok(Self { centers })
    }

    /// The Baguio City centers shipped with the app
    pub fn builtin() -> &'static StaticDirectory {
        &BUILTIN
    }

    /// Load centers from a JSON file containing an array of records
    #[instrument(level = "debug", skip_all)]
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        info!("Loading evacuation centers from: {:?}", path);

        if !path.exists() {
            return Err(EvacError::directory(format!(
                "directory file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::parse_json(&content)
    }

    pub fn parse_json(content: &str) -> crate::Result<Self> {
        let centers: Vec<EvacuationCenter> = serde_json::from_str(content)
            .map_err(|e| EvacError::directory(format!("failed to parse center list: {e}")))?;

        let directory = Self::new(centers)?;
        info!("Loaded {} evacuation centers", directory.centers.len());
        Ok(directory)
    }

    #[must_use]
    pub fn centers(&self) -> &[EvacuationCenter] {
        &self.centers
    }
}

impl CenterDirectory for StaticDirectory {
    fn list(&self) -> Vec<EvacuationCenter> {
        self.centers.clone()
    }

    fn find(&self, id: u32) -> Option<EvacuationCenter> {
        self.centers.iter().find(|center| center.id == id).cloned()
    }
}

//! Seed loader for the vehicle store
//!
//! Reads the initial dataset once at startup. A missing, unreadable or
//! malformed file fails the whole load; the store is never built from a
//! partial dataset.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{CatalogError, CatalogResult};
use super::vehicle::{Vehicle, VehicleId};

/// Source of the initial vehicle dataset
pub trait VehicleLoader {
    /// Load every record, keyed by identifier
    fn load(&self) -> CatalogResult<HashMap<VehicleId, Vehicle>>;
}

/// Loads vehicles from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonVehicleLoader {
    path: PathBuf,
}

impl JsonVehicleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a JSON array of vehicles; `source` names it in errors
    pub fn parse(source: &str, content: &str) -> CatalogResult<HashMap<VehicleId, Vehicle>> {
        let vehicles: Vec<Vehicle> = serde_json::from_str(content)
            .map_err(|e| CatalogError::internal(source, format!("Invalid JSON: {}", e)))?;

        let mut by_id = HashMap::with_capacity(vehicles.len());
        for vehicle in vehicles {
            let id = vehicle.id;
            if by_id.insert(id, vehicle).is_some() {
                return Err(CatalogError::internal(
                    source,
                    format!("Duplicate vehicle id {}", id),
                ));
            }
        }

        Ok(by_id)
    }
}

impl VehicleLoader for JsonVehicleLoader {
    fn load(&self) -> CatalogResult<HashMap<VehicleId, Vehicle>> {
        let source = self.path.display().to_string();
        let content = fs::read_to_string(&self.path)
            .map_err(|e| CatalogError::internal(&source, format!("Failed to read file: {}", e)))?;

        Self::parse(&source, &content)
    }
}

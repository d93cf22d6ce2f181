//! # Vehicle Repository
//!
//! The record store. Every query is a full linear scan; the catalog is
//! small and read-mostly, so no secondary indexes are kept.
//!
//! List queries never return an empty sequence: an empty store or a
//! query with no matches fails with a `NotFound` kind.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{CatalogError, CatalogResult};
use super::vehicle::{StrictRange, Vehicle, VehicleId};

/// Vehicle repository trait
///
/// Abstracts the record store behind the service layer.
pub trait VehicleRepository: Send + Sync {
    /// Every record in the store
    fn get_all(&self) -> CatalogResult<Vec<Vehicle>>;

    /// Records with height and width strictly inside both ranges
    fn get_by_dimensions(&self, height: StrictRange, width: StrictRange)
        -> CatalogResult<Vec<Vehicle>>;

    /// Records with weight strictly inside the range
    fn get_by_weight(&self, weight: StrictRange) -> CatalogResult<Vec<Vehicle>>;

    /// Exact year, case-insensitive color
    fn get_by_color_and_year(&self, color: &str, year: i32) -> CatalogResult<Vec<Vehicle>>;

    /// Case-insensitive brand
    fn get_by_brand(&self, brand: &str) -> CatalogResult<Vec<Vehicle>>;

    /// Case-insensitive transmission
    fn get_by_transmission(&self, transmission: &str) -> CatalogResult<Vec<Vehicle>>;

    /// Change only the fuel type of an existing record
    fn patch_fuel_type(&self, id: VehicleId, fuel_type: &str) -> CatalogResult<()>;

    /// Replace every attribute of an existing record. Never creates.
    fn replace(&self, vehicle: Vehicle) -> CatalogResult<()>;

    /// Remove a record
    fn delete(&self, id: VehicleId) -> CatalogResult<()>;

    /// Insert a new record
    fn create(&self, vehicle: Vehicle) -> CatalogResult<()>;

    /// Number of records
    fn len(&self) -> CatalogResult<usize>;

    /// Check if empty
    fn is_empty(&self) -> CatalogResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory record store guarded by a single lock
#[derive(Debug, Default)]
pub struct InMemoryVehicleRepository {
    vehicles: RwLock<BTreeMap<VehicleId, Vehicle>>,
}

impl InMemoryVehicleRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a seed dataset
    ///
    /// Seed entries are re-keyed by the identifier stored in each record.
    pub fn with_seed(seed: impl IntoIterator<Item = (VehicleId, Vehicle)>) -> Self {
        let vehicles = seed
            .into_iter()
            .map(|(id, mut vehicle)| {
                vehicle.id = id;
                (id, vehicle)
            })
            .collect();

        Self {
            vehicles: RwLock::new(vehicles),
        }
    }

    /// Poison the lock by panicking while holding the write guard
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let handle = s.spawn(|| {
                let _guard = self.vehicles.write();
                panic!("vehicle store writer panicked");
            });
            let _ = handle.join();
        });
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, BTreeMap<VehicleId, Vehicle>>> {
        self.vehicles.read().map_err(|_| CatalogError::lock_poisoned())
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, BTreeMap<VehicleId, Vehicle>>> {
        self.vehicles.write().map_err(|_| CatalogError::lock_poisoned())
    }

    /// Linear scan applying `predicate`; `query` describes it for error messages
    fn scan<F>(&self, query: &str, predicate: F) -> CatalogResult<Vec<Vehicle>>
    where
        F: Fn(&Vehicle) -> bool,
    {
        let vehicles = self.read()?;

        if vehicles.is_empty() {
            return Err(CatalogError::no_matches("store is empty"));
        }

        let matches: Vec<Vehicle> = vehicles
            .values()
            .filter(|v| predicate(v))
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(CatalogError::no_matches(query));
        }

        Ok(matches)
    }
}

impl VehicleRepository for InMemoryVehicleRepository {
    fn get_all(&self) -> CatalogResult<Vec<Vehicle>> {
        self.scan("all", |_| true)
    }

    fn get_by_dimensions(
        &self,
        height: StrictRange,
        width: StrictRange,
    ) -> CatalogResult<Vec<Vehicle>> {
        let query = format!(
            "height in ({}, {}) and width in ({}, {})",
            height.min, height.max, width.min, width.max
        );
        self.scan(&query, |v| {
            height.contains(v.attributes.height) && width.contains(v.attributes.width)
        })
    }

    fn get_by_weight(&self, weight: StrictRange) -> CatalogResult<Vec<Vehicle>> {
        let query = format!("weight in ({}, {})", weight.min, weight.max);
        self.scan(&query, |v| weight.contains(v.attributes.weight))
    }

    fn get_by_color_and_year(&self, color: &str, year: i32) -> CatalogResult<Vec<Vehicle>> {
        let query = format!("color '{}' and year {}", color, year);
        self.scan(&query, |v| v.attributes.year == year && v.has_color(color))
    }

    fn get_by_brand(&self, brand: &str) -> CatalogResult<Vec<Vehicle>> {
        self.scan(&format!("brand '{}'", brand), |v| v.has_brand(brand))
    }

    fn get_by_transmission(&self, transmission: &str) -> CatalogResult<Vec<Vehicle>> {
        self.scan(&format!("transmission '{}'", transmission), |v| {
            v.has_transmission(transmission)
        })
    }

    fn patch_fuel_type(&self, id: VehicleId, fuel_type: &str) -> CatalogResult<()> {
        let mut vehicles = self.write()?;
        let vehicle = vehicles
            .get_mut(&id)
            .ok_or(CatalogError::VehicleNotFound(id))?;
        vehicle.attributes.fuel_type = fuel_type.to_string();
        Ok(())
    }

    fn replace(&self, vehicle: Vehicle) -> CatalogResult<()> {
        let mut vehicles = self.write()?;
        match vehicles.get_mut(&vehicle.id) {
            Some(existing) => {
                *existing = vehicle;
                Ok(())
            }
            None => Err(CatalogError::VehicleNotFound(vehicle.id)),
        }
    }

    fn delete(&self, id: VehicleId) -> CatalogResult<()> {
        let mut vehicles = self.write()?;
        vehicles
            .remove(&id)
            .map(|_| ())
            .ok_or(CatalogError::VehicleNotFound(id))
    }

    fn create(&self, vehicle: Vehicle) -> CatalogResult<()> {
        let mut vehicles = self.write()?;
        if vehicles.contains_key(&vehicle.id) {
            return Err(CatalogError::IdInUse(vehicle.id));
        }
        vehicles.insert(vehicle.id, vehicle);
        Ok(())
    }

    fn len(&self) -> CatalogResult<usize> {
        Ok(self.read()?.len())
    }
}

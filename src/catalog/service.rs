//! # Vehicle Service
//!
//! Business operations over a [`VehicleRepository`]: query forwarding,
//! capacity aggregation and batch creation. Errors from the repository are
//! re-raised with their kind unchanged.

use std::sync::Arc;

use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};

use super::errors::{CatalogError, CatalogResult, ErrorKind};
use super::repository::VehicleRepository;
use super::vehicle::{StrictRange, Vehicle, VehicleId};

/// A batch that stopped at its first failure
///
/// Records inserted before the failure stay in the store; there is no
/// rollback.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("batch stopped at record {index} after {applied} insertions: {source}")]
pub struct BatchError {
    /// Records inserted before the failure
    pub applied: usize,
    /// Position of the failing record in the batch
    pub index: usize,
    /// The failure itself
    pub source: CatalogError,
}

impl BatchError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Vehicle service
#[derive(Clone)]
pub struct VehicleService {
    repository: Arc<dyn VehicleRepository>,
}

impl std::fmt::Debug for VehicleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VehicleService").finish_non_exhaustive()
    }
}

impl VehicleService {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    pub fn get_all(&self) -> CatalogResult<Vec<Vehicle>> {
        self.repository.get_all()
    }

    pub fn get_by_dimensions(
        &self,
        height: StrictRange,
        width: StrictRange,
    ) -> CatalogResult<Vec<Vehicle>> {
        self.repository.get_by_dimensions(height, width)
    }

    pub fn get_by_weight(&self, weight: StrictRange) -> CatalogResult<Vec<Vehicle>> {
        self.repository.get_by_weight(weight)
    }

    pub fn get_by_color_and_year(&self, color: &str, year: i32) -> CatalogResult<Vec<Vehicle>> {
        self.repository.get_by_color_and_year(color, year)
    }

    pub fn get_by_brand(&self, brand: &str) -> CatalogResult<Vec<Vehicle>> {
        self.repository.get_by_brand(brand)
    }

    pub fn get_by_transmission(&self, transmission: &str) -> CatalogResult<Vec<Vehicle>> {
        self.repository.get_by_transmission(transmission)
    }

    /// Arithmetic mean of passenger capacity across a brand
    ///
    /// Relies on `get_by_brand` failing with NotFound instead of returning
    /// an empty list.
    pub fn average_capacity_by_brand(&self, brand: &str) -> CatalogResult<f64> {
        let vehicles = self.repository.get_by_brand(brand)?;

        let total: i64 = vehicles
            .iter()
            .map(|v| i64::from(v.attributes.passengers))
            .sum();
        Ok(total as f64 / vehicles.len() as f64)
    }

    pub fn patch_fuel_type(&self, id: VehicleId, fuel_type: &str) -> CatalogResult<()> {
        self.repository.patch_fuel_type(id, fuel_type)?;
        log_event_with_fields(
            Event::VehicleUpdated,
            &[("id", &id.to_string()), ("fuel_type", fuel_type)],
        );
        Ok(())
    }

    pub fn replace(&self, vehicle: Vehicle) -> CatalogResult<()> {
        let id = vehicle.id;
        self.repository.replace(vehicle)?;
        log_event_with_fields(Event::VehicleUpdated, &[("id", &id.to_string())]);
        Ok(())
    }

    pub fn delete(&self, id: VehicleId) -> CatalogResult<()> {
        self.repository.delete(id)?;
        log_event_with_fields(Event::VehicleDeleted, &[("id", &id.to_string())]);
        Ok(())
    }

    pub fn create(&self, vehicle: Vehicle) -> CatalogResult<()> {
        let id = vehicle.id;
        self.repository.create(vehicle)?;
        log_event_with_fields(Event::VehicleCreated, &[("id", &id.to_string())]);
        Ok(())
    }

    /// Create records in order, stopping at the first failure
    ///
    /// Returns the number of records inserted.
    pub fn create_batch(&self, vehicles: Vec<Vehicle>) -> Result<usize, BatchError> {
        let mut applied = 0;

        for (index, vehicle) in vehicles.into_iter().enumerate() {
            if let Err(source) = self.create(vehicle) {
                log_event_with_fields(
                    Event::BatchAborted,
                    &[
                        ("applied", &applied.to_string()),
                        ("index", &index.to_string()),
                        ("kind", source.kind().as_str()),
                    ],
                );
                return Err(BatchError {
                    applied,
                    index,
                    source,
                });
            }
            applied += 1;
        }

        Ok(applied)
    }

    pub fn len(&self) -> CatalogResult<usize> {
        self.repository.len()
    }

    pub fn is_empty(&self) -> CatalogResult<bool> {
        self.repository.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::InMemoryVehicleRepository;
    use crate::catalog::vehicle::sample;

    fn service() -> VehicleService {
        VehicleService::new(Arc::new(InMemoryVehicleRepository::new()))
    }

    fn with_capacity(id: VehicleId, brand: &str, passengers: i32) -> Vehicle {
        let mut v = sample(id, brand);
        v.attributes.passengers = passengers;
        v
    }

    #[test]
    fn test_average_capacity() {
        let svc = service();
        svc.create(with_capacity(1, "Toyota", 4)).unwrap();
        svc.create(with_capacity(2, "toyota", 6)).unwrap();
        svc.create(with_capacity(3, "Ford", 9)).unwrap();

        assert_eq!(svc.average_capacity_by_brand("Toyota").unwrap(), 5.0);
    }

    #[test]
    fn test_average_capacity_fractional() {
        let svc = service();
        svc.create(with_capacity(1, "Fiat", 4)).unwrap();
        svc.create(with_capacity(2, "Fiat", 5)).unwrap();

        assert_eq!(svc.average_capacity_by_brand("FIAT").unwrap(), 4.5);
    }

    #[test]
    fn test_average_capacity_no_matches() {
        let svc = service();
        svc.create(with_capacity(1, "Ford", 4)).unwrap();
        let err = svc.average_capacity_by_brand("Toyota").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_batch_stops_at_first_failure() {
        let svc = service();
        let err = svc
            .create_batch(vec![sample(1, "A"), sample(1, "B"), sample(2, "C")])
            .unwrap_err();

        assert_eq!(err.applied, 1);
        assert_eq!(err.index, 1);
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let all = svc.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].attributes.brand, "A");
    }

    #[test]
    fn test_batch_error_reports_position_and_source() {
        let svc = service();
        let err = svc
            .create_batch(vec![sample(1, "A"), sample(2, "B"), sample(2, "C")])
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "batch stopped at record 2 after 2 insertions: Identifier already in use: 2"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), CatalogError::IdInUse(2).to_string());
    }

    #[test]
    fn test_batch_success() {
        let svc = service();
        assert_eq!(svc.create_batch(vec![sample(1, "A"), sample(2, "B")]).unwrap(), 2);
        assert_eq!(svc.len().unwrap(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let svc = service();
        assert_eq!(svc.create_batch(Vec::new()).unwrap(), 0);
        assert!(svc.is_empty().unwrap());
    }
}

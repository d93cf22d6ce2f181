//! Vehicle Store Invariant Tests
//!
//! Observable contract of the record store and service:
//! - GetAll reflects exactly the created-and-not-deleted records
//! - Range filters exclude both endpoints
//! - Text filters ignore case
//! - Identifiers are unique; conflicts leave the original untouched
//! - Batches stop at the first failure without rollback
//! - Empty results are NotFound

use std::sync::Arc;
use std::thread;

use fleetdb::catalog::{
    CatalogError, ErrorKind, InMemoryVehicleRepository, StrictRange, Vehicle, VehicleAttributes,
    VehicleId, VehicleService,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn vehicle(id: VehicleId) -> Vehicle {
    Vehicle::new(
        id,
        VehicleAttributes {
            brand: "Toyota".to_string(),
            model: "Hilux".to_string(),
            registration: format!("TY-{:04}", id),
            year: 2012,
            color: "Silver".to_string(),
            max_speed: 170,
            fuel_type: "diesel".to_string(),
            transmission: "manual".to_string(),
            passengers: 5,
            height: 1.8,
            width: 1.85,
            weight: 2000.0,
        },
    )
}

fn service() -> VehicleService {
    VehicleService::new(Arc::new(InMemoryVehicleRepository::new()))
}

fn ids(vehicles: &[Vehicle]) -> Vec<VehicleId> {
    vehicles.iter().map(|v| v.id).collect()
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

/// Net count equals creates minus deletes.
#[test]
fn test_get_all_tracks_creates_and_deletes() {
    let svc = service();
    for id in 1..=5 {
        svc.create(vehicle(id)).unwrap();
    }
    svc.delete(2).unwrap();
    svc.delete(4).unwrap();

    assert_eq!(ids(&svc.get_all().unwrap()), vec![1, 3, 5]);
}

/// Deleted identifiers are gone for every operation.
#[test]
fn test_delete_then_operations_fail_not_found() {
    let svc = service();
    svc.create(vehicle(1)).unwrap();
    svc.delete(1).unwrap();

    assert_eq!(svc.get_all().unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        svc.patch_fuel_type(1, "gas").unwrap_err(),
        CatalogError::VehicleNotFound(1)
    );
    assert_eq!(svc.delete(1).unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(svc.replace(vehicle(1)).unwrap_err().kind(), ErrorKind::NotFound);
}

/// Duplicate create fails with Conflict and leaves the first record intact.
#[test]
fn test_duplicate_create_conflicts() {
    let svc = service();
    svc.create(vehicle(1)).unwrap();

    let mut other = vehicle(1);
    other.attributes.brand = "Ford".to_string();
    assert_eq!(svc.create(other).unwrap_err().kind(), ErrorKind::Conflict);

    let all = svc.get_all().unwrap();
    assert_eq!(all, vec![vehicle(1)]);
}

/// Replace reflects every changed field and keeps the identifier.
#[test]
fn test_replace_round_trip() {
    let svc = service();
    svc.create(vehicle(7)).unwrap();

    let replacement = Vehicle::new(
        7,
        VehicleAttributes {
            brand: "Renault".to_string(),
            model: "Kangoo".to_string(),
            registration: "RN-7".to_string(),
            year: 2020,
            color: "Blue".to_string(),
            max_speed: 160,
            fuel_type: "gasoline".to_string(),
            transmission: "automatic".to_string(),
            passengers: 2,
            height: 1.9,
            width: 1.9,
            weight: 1500.0,
        },
    );
    svc.replace(replacement.clone()).unwrap();

    assert_eq!(svc.get_all().unwrap(), vec![replacement]);
}

/// Patch only touches the fuel type.
#[test]
fn test_patch_fuel_only_changes_fuel() {
    let svc = service();
    svc.create(vehicle(1)).unwrap();
    svc.patch_fuel_type(1, "gas").unwrap();

    let mut expected = vehicle(1);
    expected.attributes.fuel_type = "gas".to_string();
    assert_eq!(svc.get_all().unwrap(), vec![expected]);
}

// =============================================================================
// Filter Tests
// =============================================================================

/// A height exactly at the upper bound is excluded.
#[test]
fn test_dimension_bounds_are_exclusive() {
    let svc = service();
    let mut at_max = vehicle(1);
    at_max.attributes.height = 2.0;
    let mut at_min = vehicle(2);
    at_min.attributes.width = 1.0;
    let inside = vehicle(3);
    svc.create_batch(vec![at_max, at_min, inside]).unwrap();

    let found = svc
        .get_by_dimensions(StrictRange::new(1.0, 2.0), StrictRange::new(1.0, 2.0))
        .unwrap();
    assert_eq!(ids(&found), vec![3]);
}

#[test]
fn test_weight_bounds_are_exclusive() {
    let svc = service();
    svc.create(vehicle(1)).unwrap();

    assert!(svc.get_by_weight(StrictRange::new(2000.0, 3000.0)).is_err());
    assert!(svc.get_by_weight(StrictRange::new(1000.0, 2000.0)).is_err());
    assert_eq!(svc.get_by_weight(StrictRange::new(1999.9, 2000.1)).unwrap().len(), 1);
}

#[test]
fn test_inverted_range_matches_nothing() {
    let svc = service();
    svc.create(vehicle(1)).unwrap();

    let err = svc.get_by_weight(StrictRange::new(3000.0, 1000.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Color, brand and transmission ignore case.
#[test]
fn test_text_filters_ignore_case() {
    let svc = service();
    let mut red = vehicle(1);
    red.attributes.color = "Red".to_string();
    svc.create(red).unwrap();

    assert_eq!(svc.get_by_color_and_year("red", 2012).unwrap().len(), 1);
    assert_eq!(svc.get_by_color_and_year("RED", 2012).unwrap().len(), 1);
    assert_eq!(svc.get_by_brand("tOyOtA").unwrap().len(), 1);
    assert_eq!(svc.get_by_transmission("MANUAL").unwrap().len(), 1);
}

#[test]
fn test_year_must_match_exactly() {
    let svc = service();
    svc.create(vehicle(1)).unwrap();

    assert!(svc.get_by_color_and_year("silver", 2013).unwrap_err().is_not_found());
}

/// Every list query fails NotFound on an empty store.
#[test]
fn test_empty_store_every_query_not_found() {
    let svc = service();
    let range = StrictRange::new(0.0, 10_000.0);

    let results = [
        svc.get_all(),
        svc.get_by_dimensions(range, range),
        svc.get_by_weight(range),
        svc.get_by_color_and_year("red", 2000),
        svc.get_by_brand("Toyota"),
        svc.get_by_transmission("manual"),
    ];

    for result in results {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }
}

// =============================================================================
// Batch & Aggregation Tests
// =============================================================================

/// [valid, duplicate, valid] inserts only the first record.
#[test]
fn test_batch_partial_application_is_visible() {
    let svc = service();
    svc.create(vehicle(100)).unwrap();

    let err = svc
        .create_batch(vec![vehicle(1), vehicle(100), vehicle(2)])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.applied, 1);
    assert_eq!(ids(&svc.get_all().unwrap()), vec![1, 100]);
}

#[test]
fn test_average_capacity() {
    let svc = service();
    let mut four = vehicle(1);
    four.attributes.passengers = 4;
    let mut six = vehicle(2);
    six.attributes.passengers = 6;
    svc.create_batch(vec![four, six]).unwrap();

    assert_eq!(svc.average_capacity_by_brand("Toyota").unwrap(), 5.0);
    assert_eq!(
        svc.average_capacity_by_brand("Tesla").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

// =============================================================================
// Concurrency Tests
// =============================================================================

/// Concurrent creates of distinct ids all land; shared ids land once.
#[test]
fn test_concurrent_creates_keep_ids_unique() {
    let svc = Arc::new(service());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || {
                let mut conflicts = 0;
                for i in 0..50 {
                    if svc.create(vehicle(t * 1000 + i)).is_err() {
                        conflicts += 1;
                    }
                    if svc.create(vehicle(-1)).is_err() {
                        conflicts += 1;
                    }
                }
                conflicts
            })
        })
        .collect();

    let conflicts: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(svc.len().unwrap(), 8 * 50 + 1);
    assert_eq!(conflicts, 8 * 50 - 1);
}

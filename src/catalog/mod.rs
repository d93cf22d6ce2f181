//! # Vehicle Catalog
//!
//! In-memory vehicle store and the operations over it.
//!
//! - [`InMemoryVehicleRepository`]: record store, linear-scan queries
//! - [`VehicleService`]: aggregation and batch creation on top of a repository
//! - [`JsonVehicleLoader`]: seed dataset loaded once at startup
//!
//! Every failure carries an [`ErrorKind`] (`NotFound`, `Conflict`,
//! `Internal`) that survives each layer.

pub mod errors;
pub mod loader;
pub mod repository;
pub mod service;
pub mod vehicle;

pub use errors::{CatalogError, CatalogResult, ErrorKind};
pub use loader::{JsonVehicleLoader, VehicleLoader};
pub use repository::{InMemoryVehicleRepository, VehicleRepository};
pub use service::{BatchError, VehicleService};
pub use vehicle::{StrictRange, Vehicle, VehicleAttributes, VehicleId};

//! # fleetdb HTTP Server Module
//!
//! Axum server exposing the vehicle catalog as a REST API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/observability/metrics` - Request counters
//! - `/api/v1/vehicles/*` - Catalog queries and mutations

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod observe;
pub mod server;
pub mod vehicle_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;

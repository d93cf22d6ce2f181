//! fleetdb - An in-memory vehicle catalog served over a REST API
//!
//! The catalog is seeded once from a JSON file and lives only as long as
//! the process.

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;

//! # Catalog Errors
//!
//! Every catalog failure belongs to exactly one kind:
//! - `NotFound`: target absent, or a query matched nothing
//! - `Conflict`: identifier already in use
//! - `Internal`: anything else (malformed seed data, poisoned lock)

use std::fmt;

use thiserror::Error;

use super::vehicle::VehicleId;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error kind, inspectable by callers at any layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// Returns the string code for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// No vehicle with this identifier
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(VehicleId),

    /// Store empty or no record matched the query
    #[error("No vehicles found: {0}")]
    NoMatches(String),

    /// Identifier already taken
    #[error("Identifier already in use: {0}")]
    IdInUse(VehicleId),

    /// Internal failure with context
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::VehicleNotFound(_) => ErrorKind::NotFound,
            CatalogError::NoMatches(_) => ErrorKind::NotFound,
            CatalogError::IdInUse(_) => ErrorKind::Conflict,
            CatalogError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Query matched nothing
    pub fn no_matches(query: impl Into<String>) -> Self {
        CatalogError::NoMatches(query.into())
    }

    /// Internal error naming the resource and what went wrong
    pub fn internal(resource: impl fmt::Display, reason: impl fmt::Display) -> Self {
        CatalogError::Internal(format!("{}: {}", resource, reason))
    }

    pub(crate) fn lock_poisoned() -> Self {
        CatalogError::Internal("vehicle store lock poisoned".into())
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

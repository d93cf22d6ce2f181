//! # API Errors
//!
//! Translates catalog errors and request validation failures into HTTP
//! responses. The catalog error is kept intact so its kind stays
//! inspectable after translation.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{BatchError, CatalogError, ErrorKind};
use crate::observability::{log_event_with_fields, Event};

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed path parameter
    #[error("Invalid path parameter: {0}")]
    InvalidPathParam(String),

    /// Malformed or missing query parameter
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Unparseable request body
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Fuel type outside the allowed set
    #[error("Fuel type not allowed: {0}")]
    FuelNotAllowed(String),

    // ==================
    // Catalog Errors
    // ==================
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl ApiError {
    /// Catalog error kind, if this error came from the catalog
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Catalog(err) => Some(err.kind()),
            ApiError::Batch(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            Some(ErrorKind::NotFound) => StatusCode::NOT_FOUND,
            Some(ErrorKind::Conflict) => StatusCode::CONFLICT,
            Some(ErrorKind::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
            None => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to return to clients
    fn public_message(&self) -> String {
        match self {
            ApiError::Batch(err) if err.kind() == ErrorKind::Internal => format!(
                "Internal server error after {} vehicles were created",
                err.applied
            ),
            _ if self.kind() == Some(ErrorKind::Internal) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQueryParam(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log_event_with_fields(Event::RequestFailed, &[("detail", &self.to_string())]);
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

//! Observability HTTP Routes
//!
//! Health check and request counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::catalog::VehicleService;
use crate::observability::{MetricsRegistry, MetricsSnapshot};

/// State for health and metrics handlers
pub struct ObservabilityState {
    pub service: VehicleService,
    pub metrics: Arc<MetricsRegistry>,
    pub started_at: DateTime<Utc>,
}

impl ObservabilityState {
    pub fn new(service: VehicleService, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            service,
            metrics,
            started_at: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub vehicles: usize,
    pub started_at: String,
}

/// Metrics response
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    pub vehicles: usize,
    pub uptime_seconds: i64,
}

/// Health route at `/health` and metrics under `/observability`
pub fn observability_routes(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/observability/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check handler
///
/// A poisoned store lock reports `degraded` with 503.
async fn health_handler(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let (status_code, status, vehicles) = match state.service.len() {
        Ok(count) => (StatusCode::OK, "ok", count),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "degraded", 0),
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        vehicles,
        started_at: state.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    (status_code, Json(response))
}

/// Metrics handler - returns counters as JSON
async fn metrics_handler(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let response = MetricsResponse {
        counters: state.metrics.snapshot(),
        vehicles: state.service.len().unwrap_or(0),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    };

    (StatusCode::OK, Json(response))
}

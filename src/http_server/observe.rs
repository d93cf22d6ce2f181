//! Request observation middleware
//!
//! Tags every request with an id, counts its response status and logs one
//! `REQUEST_COMPLETE` line when it finishes.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn observe_request(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status().as_u16();
    metrics.record_response(status);

    log_event_with_fields(
        Event::RequestComplete,
        &[
            ("duration_us", &started.elapsed().as_micros().to_string()),
            ("method", &method),
            ("path", &path),
            ("request_id", &request_id),
            ("status", &status.to_string()),
        ],
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

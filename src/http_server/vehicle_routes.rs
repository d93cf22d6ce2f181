//! Vehicle HTTP Routes
//!
//! Endpoints under `/api/v1/vehicles` for catalog queries and mutations.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{StrictRange, Vehicle, VehicleAttributes, VehicleId, VehicleService};

use super::errors::{ApiError, ApiResult};

/// Base path of every vehicle route
pub const VEHICLES_PATH: &str = "/api/v1/vehicles";

/// Fuel types accepted by the fuel update endpoints
pub const ALLOWED_FUEL_TYPES: [&str; 5] = ["diesel", "biodisel", "biodiesel", "gas", "gasoline"];

// ==================
// Shared State
// ==================

/// Vehicle state shared across handlers
pub struct VehicleState {
    pub service: VehicleService,
}

impl VehicleState {
    pub fn new(service: VehicleService) -> Self {
        Self { service }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct FuelPatchRequest {
    pub fuel_type: String,
}

#[derive(Debug, Deserialize)]
pub struct DimensionsQuery {
    /// `min-max`; `length` is accepted for compatibility
    #[serde(default, alias = "length")]
    pub height: Option<String>,
    /// `min-max`
    #[serde(default)]
    pub width: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeightQuery {
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub message: String,
    pub vehicles: Vec<Vehicle>,
}

impl VehiclesResponse {
    fn success(vehicles: Vec<Vehicle>) -> Self {
        Self {
            message: "Success".to_string(),
            vehicles,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleCreatedResponse {
    pub message: String,
    pub vehicle: Vehicle,
}

#[derive(Debug, Serialize)]
pub struct BatchCreatedResponse {
    pub message: String,
    pub created: usize,
}

#[derive(Debug, Serialize)]
pub struct AverageCapacityResponse {
    pub brand: String,
    pub average_capacity: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Vehicle Routes
// ==================

/// Create vehicle routes
pub fn vehicle_routes(state: Arc<VehicleState>) -> Router {
    let path = |suffix: &str| format!("{}{}", VEHICLES_PATH, suffix);

    Router::new()
        .route(VEHICLES_PATH, get(list_vehicles_handler).post(create_vehicle_handler))
        .route(&path("/batch"), post(create_batch_handler))
        .route(&path("/dimensions"), get(dimensions_handler))
        .route(&path("/weight"), get(weight_handler))
        .route(&path("/color/:color/year/:year"), get(color_and_year_handler))
        .route(&path("/transmission/:type"), get(transmission_handler))
        .route(
            &path("/average_capacity/brand/:brand"),
            get(average_capacity_handler),
        )
        .route(&path("/:id"), delete(delete_vehicle_handler))
        .route(
            &path("/:id/update_fuel"),
            patch(patch_fuel_handler).put(replace_vehicle_handler),
        )
        .with_state(state)
}

// ==================
// Parameter Parsing
// ==================

fn parse_id(raw: &str) -> ApiResult<VehicleId> {
    raw.parse()
        .map_err(|_| ApiError::InvalidPathParam(format!("id must be an integer, got '{}'", raw)))
}

/// Years are exactly four digits (`yyyy`)
fn parse_year(raw: &str) -> ApiResult<i32> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidPathParam(format!(
            "year must be in yyyy format, got '{}'",
            raw
        )));
    }
    raw.parse()
        .map_err(|_| ApiError::InvalidPathParam(format!("year must be in yyyy format, got '{}'", raw)))
}

fn parse_bound(name: &str, raw: Option<&str>) -> ApiResult<f64> {
    let raw = raw.ok_or_else(|| ApiError::InvalidQueryParam(format!("{} is required", name)))?;
    raw.trim()
        .parse()
        .map_err(|_| ApiError::InvalidQueryParam(format!("{} must be a number, got '{}'", name, raw)))
}

/// Parse a `min-max` pair
fn parse_range(name: &str, raw: Option<&str>) -> ApiResult<StrictRange> {
    let raw = raw.ok_or_else(|| ApiError::InvalidQueryParam(format!("{} is required", name)))?;
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 2 {
        return Err(ApiError::InvalidQueryParam(format!(
            "{} must be formatted as min-max, got '{}'",
            name, raw
        )));
    }

    let min = parse_bound(name, Some(parts[0]))?;
    let max = parse_bound(name, Some(parts[1]))?;
    Ok(StrictRange::new(min, max))
}

fn validate_fuel_type(fuel_type: &str) -> ApiResult<()> {
    let lowered = fuel_type.to_lowercase();
    if ALLOWED_FUEL_TYPES.contains(&lowered.as_str()) {
        Ok(())
    } else {
        Err(ApiError::FuelNotAllowed(fuel_type.to_string()))
    }
}

// ==================
// Query Handlers
// ==================

async fn list_vehicles_handler(
    State(state): State<Arc<VehicleState>>,
) -> ApiResult<Json<VehiclesResponse>> {
    let vehicles = state.service.get_all()?;
    Ok(Json(VehiclesResponse::success(vehicles)))
}

async fn dimensions_handler(
    State(state): State<Arc<VehicleState>>,
    query: Result<Query<DimensionsQuery>, QueryRejection>,
) -> ApiResult<Json<VehiclesResponse>> {
    let Query(query) = query?;
    let height = parse_range("height", query.height.as_deref())?;
    let width = parse_range("width", query.width.as_deref())?;

    let vehicles = state.service.get_by_dimensions(height, width)?;
    Ok(Json(VehiclesResponse::success(vehicles)))
}

async fn weight_handler(
    State(state): State<Arc<VehicleState>>,
    query: Result<Query<WeightQuery>, QueryRejection>,
) -> ApiResult<Json<VehiclesResponse>> {
    let Query(query) = query?;
    let min = parse_bound("min", query.min.as_deref())?;
    let max = parse_bound("max", query.max.as_deref())?;

    let vehicles = state.service.get_by_weight(StrictRange::new(min, max))?;
    Ok(Json(VehiclesResponse::success(vehicles)))
}

async fn color_and_year_handler(
    State(state): State<Arc<VehicleState>>,
    Path((color, year)): Path<(String, String)>,
) -> ApiResult<Json<VehiclesResponse>> {
    let year = parse_year(&year)?;
    let vehicles = state.service.get_by_color_and_year(&color, year)?;
    Ok(Json(VehiclesResponse::success(vehicles)))
}

async fn transmission_handler(
    State(state): State<Arc<VehicleState>>,
    Path(transmission): Path<String>,
) -> ApiResult<Json<VehiclesResponse>> {
    let vehicles = state.service.get_by_transmission(&transmission)?;
    Ok(Json(VehiclesResponse::success(vehicles)))
}

async fn average_capacity_handler(
    State(state): State<Arc<VehicleState>>,
    Path(brand): Path<String>,
) -> ApiResult<Json<AverageCapacityResponse>> {
    let average_capacity = state.service.average_capacity_by_brand(&brand)?;
    Ok(Json(AverageCapacityResponse {
        brand,
        average_capacity,
    }))
}

// ==================
// Mutation Handlers
// ==================

async fn create_vehicle_handler(
    State(state): State<Arc<VehicleState>>,
    payload: Result<Json<Vehicle>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VehicleCreatedResponse>)> {
    let Json(vehicle) = payload?;
    state.service.create(vehicle.clone())?;

    Ok((
        StatusCode::CREATED,
        Json(VehicleCreatedResponse {
            message: "Vehicle created successfully".to_string(),
            vehicle,
        }),
    ))
}

async fn create_batch_handler(
    State(state): State<Arc<VehicleState>>,
    payload: Result<Json<Vec<Vehicle>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BatchCreatedResponse>)> {
    let Json(vehicles) = payload?;
    let created = state.service.create_batch(vehicles)?;

    Ok((
        StatusCode::CREATED,
        Json(BatchCreatedResponse {
            message: "Vehicles created successfully".to_string(),
            created,
        }),
    ))
}

async fn patch_fuel_handler(
    State(state): State<Arc<VehicleState>>,
    Path(id): Path<String>,
    payload: Result<Json<FuelPatchRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    validate_fuel_type(&request.fuel_type)?;

    state.service.patch_fuel_type(id, &request.fuel_type)?;
    Ok(Json(MessageResponse {
        message: "Fuel updated successfully".to_string(),
    }))
}

async fn replace_vehicle_handler(
    State(state): State<Arc<VehicleState>>,
    Path(id): Path<String>,
    payload: Result<Json<VehicleAttributes>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let Json(attributes) = payload?;
    validate_fuel_type(&attributes.fuel_type)?;

    state.service.replace(Vehicle::new(id, attributes))?;
    Ok(Json(MessageResponse {
        message: "Vehicle updated successfully".to_string(),
    }))
}

async fn delete_vehicle_handler(
    State(state): State<Arc<VehicleState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

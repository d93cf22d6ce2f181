//! # Vehicle Records
//!
//! A vehicle is an identifier plus an attribute bundle. The identifier is
//! assigned by the caller and lives inside the record; the repository keeps
//! it in lock-step with its map key.

use serde::{Deserialize, Serialize};

/// Caller-assigned vehicle identifier
pub type VehicleId = i64;

/// Descriptive attributes of a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleAttributes {
    pub brand: String,
    pub model: String,
    pub registration: String,
    /// Fabrication year
    pub year: i32,
    pub color: String,
    pub max_speed: i32,
    pub fuel_type: String,
    pub transmission: String,
    /// Passenger capacity
    pub passengers: i32,
    pub height: f64,
    pub width: f64,
    pub weight: f64,
}

/// A catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(flatten)]
    pub attributes: VehicleAttributes,
}

impl Vehicle {
    /// Create a record from an identifier and its attributes
    pub fn new(id: VehicleId, attributes: VehicleAttributes) -> Self {
        Self { id, attributes }
    }

    /// Case-insensitive brand match
    pub fn has_brand(&self, brand: &str) -> bool {
        eq_ignore_case(&self.attributes.brand, brand)
    }

    /// Case-insensitive color match
    pub fn has_color(&self, color: &str) -> bool {
        eq_ignore_case(&self.attributes.color, color)
    }

    /// Case-insensitive transmission match
    pub fn has_transmission(&self, transmission: &str) -> bool {
        eq_ignore_case(&self.attributes.transmission, transmission)
    }
}

/// Open interval `(min, max)`; both endpoints are excluded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrictRange {
    pub min: f64,
    pub max: f64,
}

impl StrictRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `min < value < max`
    pub fn contains(&self, value: f64) -> bool {
        self.min < value && value < self.max
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
pub(crate) fn sample(id: VehicleId, brand: &str) -> Vehicle {
    Vehicle::new(
        id,
        VehicleAttributes {
            brand: brand.to_string(),
            model: "Corolla".to_string(),
            registration: format!("REG-{}", id),
            year: 2015,
            color: "Red".to_string(),
            max_speed: 180,
            fuel_type: "gasoline".to_string(),
            transmission: "manual".to_string(),
            passengers: 5,
            height: 1.5,
            width: 1.8,
            weight: 1200.0,
        },
    )
}

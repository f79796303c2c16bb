//! The vehicle record exchanged with the API.
//!
//! # Design
//! Every field is optional: the server is the only source of truth and any
//! subset of fields may be absent. Decoding goes through serde with
//! `deny_unknown_fields`, so a response carrying keys the client doesn't
//! know is reported as malformed instead of being silently dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::geo::Coordinates;

/// JSON field names of a vehicle, in wire order.
pub const FIELDS: [&str; 8] = [
    "id",
    "name",
    "model",
    "year",
    "color",
    "price",
    "latitude",
    "longitude",
];

/// A single vehicle as stored by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Vehicle {
    /// Decode a vehicle from a JSON object, rejecting unknown keys and
    /// mistyped values.
    pub fn from_map(map: Map<String, Value>) -> Result<Self, ApiError> {
        serde_json::from_value(Value::Object(map))
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// The present fields as a JSON object. Absent fields are omitted.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Look up a field by its JSON name. Absent fields yield `Value::Null`.
    pub fn field(&self, name: &str) -> Result<Value, ApiError> {
        let value = match name {
            "id" => json!(self.id),
            "name" => json!(self.name),
            "model" => json!(self.model),
            "year" => json!(self.year),
            "color" => json!(self.color),
            "price" => json!(self.price),
            "latitude" => json!(self.latitude),
            "longitude" => json!(self.longitude),
            other => return Err(ApiError::UnknownField(other.to_string())),
        };
        Ok(value)
    }

    /// The vehicle's position, if both latitude and longitude are present.
    pub fn coordinates(&self) -> Result<Coordinates, ApiError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(ApiError::MissingCoordinates { id: self.id }),
        }
    }
}

fn or_none<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Vehicle: {} {} {} {} {}>",
            or_none(&self.name),
            or_none(&self.model),
            or_none(&self.year),
            or_none(&self.color),
            or_none(&self.price),
        )
    }
}

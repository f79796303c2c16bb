//! Error types for the vehicle API client.
//!
//! # Design
//! `NotFound` and `IdRequired` get dedicated variants because callers act on
//! them differently from "the server returned an unexpected status." All other
//! non-success responses land in `HttpError` with the raw status code and body
//! for diagnostics. Local failures (bad config, unknown filter field, missing
//! coordinates) never reach the network and carry their own variants.

use std::fmt;

/// Errors returned by `VehicleClient` and `VehicleManager`.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be sent or no response was received.
    Transport(String),

    /// The server returned 404: the requested vehicle does not exist.
    NotFound,

    /// The vehicle id was missing. The backing server never assigns ids, so
    /// the caller must supply one on add and update.
    IdRequired,

    /// The server returned any other non-success status.
    HttpError { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    Deserialization(String),

    /// The request payload could not be encoded to JSON.
    Serialization(String),

    /// A filter constraint or field lookup named a field vehicles don't have.
    UnknownField(String),

    /// A distance computation hit a vehicle without latitude/longitude.
    MissingCoordinates { id: Option<u64> },

    /// The manager configuration is invalid.
    Config(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::NotFound => write!(f, "vehicle not found"),
            ApiError::IdRequired => {
                write!(f, "vehicle id is required: the server does not generate ids")
            }
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::UnknownField(name) => write!(f, "unknown vehicle field: {name}"),
            ApiError::MissingCoordinates { id: Some(id) } => {
                write!(f, "vehicle {id} has no coordinates")
            }
            ApiError::MissingCoordinates { id: None } => {
                write!(f, "vehicle without id has no coordinates")
            }
            ApiError::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

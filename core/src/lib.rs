//! Synchronous API client for the vehicle service.
//!
//! # Overview
//! `VehicleManager` exposes CRUD, filtering and geo-distance operations over a
//! vehicle REST API. Each operation maps to one blocking HTTP request (two for
//! the distance-based ones).
//!
//! # Design
//! - `VehicleClient` is stateless and sans-IO: `build_*` produces a request,
//!   `parse_*` consumes a response.
//! - `Transport` is the only I/O seam; `UreqTransport` is the default.
//! - Failures surface as typed `ApiError` values; nothing is printed.
//! - Filtering and nearest-vehicle selection run locally on fetched data.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod http;
pub mod manager;
pub mod transport;
pub mod types;

pub use client::VehicleClient;
pub use config::ManagerConfig;
pub use error::ApiError;
pub use filter::Filter;
pub use geo::{haversine_distance, Coordinates, EARTH_RADIUS_M};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use manager::VehicleManager;
pub use transport::{Transport, UreqTransport};
pub use types::Vehicle;

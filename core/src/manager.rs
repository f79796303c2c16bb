//! Synchronous vehicle API client.
//!
//! # Design
//! `VehicleManager` composes `VehicleClient` (request building, response
//! parsing) with a `Transport` (the round-trip). It holds no state beyond the
//! immutable base URL and transport, so every method is an independent
//! request/response exchange.

use tracing::{debug, warn};

use crate::client::VehicleClient;
use crate::config::ManagerConfig;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::geo::{self, Coordinates};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::Vehicle;

#[derive(Debug, Clone)]
pub struct VehicleManager<T = UreqTransport> {
    client: VehicleClient,
    transport: T,
}

impl VehicleManager<UreqTransport> {
    pub fn new(config: ManagerConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new(config.timeout))
    }

    /// Build a manager from `VEHICLE_API_URL` / `VEHICLE_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ManagerConfig::from_env()?))
    }
}

impl<T: Transport> VehicleManager<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: VehicleClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    /// All vehicles, in server order.
    pub fn get_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        let response = self.send(self.client.build_list_vehicles())?;
        self.client.parse_list_vehicles(response)
    }

    pub fn get_vehicle(&self, id: u64) -> Result<Vehicle, ApiError> {
        let response = self.send(self.client.build_get_vehicle(id))?;
        self.client.parse_get_vehicle(response)
    }

    /// Create a vehicle. The caller must supply the id; the server never
    /// generates one and a missing id yields `ApiError::IdRequired`.
    pub fn add_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, ApiError> {
        let response = self.send(self.client.build_add_vehicle(vehicle)?)?;
        let result = self.client.parse_add_vehicle(response);
        if let Err(ApiError::IdRequired) = result {
            warn!("server rejected vehicle without id; ids are not generated server-side");
        }
        result
    }

    pub fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, ApiError> {
        let response = self.send(self.client.build_update_vehicle(vehicle)?)?;
        self.client.parse_update_vehicle(response)
    }

    /// Returns the raw HTTP status. Only transport failures are errors.
    pub fn delete_vehicle(&self, id: u64) -> Result<u16, ApiError> {
        let response = self.send(self.client.build_delete_vehicle(id))?;
        Ok(self.client.parse_delete_vehicle(response))
    }

    /// Vehicles matching every constraint of `filter`.
    ///
    /// Unknown field names are rejected before any request is sent.
    pub fn filter_vehicles(&self, filter: &Filter) -> Result<Vec<Vehicle>, ApiError> {
        filter.apply(|| self.get_vehicles())
    }

    /// Great-circle distance in meters between two stored vehicles.
    pub fn get_distance(&self, id1: u64, id2: u64) -> Result<f64, ApiError> {
        let first = self.get_vehicle(id1)?.coordinates()?;
        let second = self.get_vehicle(id2)?.coordinates()?;
        Ok(geo::haversine_distance(first, second))
    }

    /// The vehicle closest to vehicle `id`, or `None` if there is no other
    /// vehicle with coordinates.
    ///
    /// Issues exactly two requests. Candidates sharing the target's id or
    /// lacking coordinates are skipped; ties go to the first in list order.
    pub fn get_nearest_vehicle(&self, id: u64) -> Result<Option<Vehicle>, ApiError> {
        let target = self.get_vehicle(id)?.coordinates()?;
        let mut candidates: Vec<(Vehicle, Coordinates)> = Vec::new();
        for vehicle in self.get_vehicles()? {
            if vehicle.id == Some(id) {
                continue;
            }
            match vehicle.coordinates() {
                Ok(position) => candidates.push((vehicle, position)),
                Err(_) => debug!(candidate = ?vehicle.id, "skipping vehicle without coordinates"),
            }
        }

        let positions = candidates.iter().map(|(_, position)| *position);
        let Some((index, distance)) = geo::nearest(target, positions) else {
            return Ok(None);
        };
        let (nearest, _) = candidates.swap_remove(index);
        debug!(vehicle = id, nearest = ?nearest.id, distance, "nearest vehicle");
        Ok(Some(nearest))
    }
}

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub name: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Create/replace payload. The id is optional here so that a missing id can
/// be answered with the same validation error the real test server sends.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleInput {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VehicleInput {
    fn into_vehicle(self, id: u64) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            model: self.model,
            year: self.year,
            color: self.color,
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub type Db = Arc<RwLock<BTreeMap<u64, Vehicle>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(BTreeMap::new()));
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn field_error(field: &str, message: &str) -> (StatusCode, Json<Value>) {
    let mut errors = serde_json::Map::new();
    errors.insert(field.to_string(), json!([message]));
    (StatusCode::BAD_REQUEST, Json(Value::Object(errors)))
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."})))
}

async fn list_vehicles(State(db): State<Db>) -> Json<Vec<Vehicle>> {
    let vehicles = db.read().await;
    Json(vehicles.values().cloned().collect())
}

/// Responds 200 rather than 201, and never assigns ids.
async fn create_vehicle(
    State(db): State<Db>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, (StatusCode, Json<Value>)> {
    let Some(id) = input.id else {
        return Err(field_error("id", "This field may not be null."));
    };
    let mut vehicles = db.write().await;
    if vehicles.contains_key(&id) {
        return Err(field_error("id", "vehicle with this id already exists."));
    }
    let vehicle = input.into_vehicle(id);
    vehicles.insert(id, vehicle.clone());
    tracing::info!(id, "created vehicle");
    Ok(Json(vehicle))
}

async fn get_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Vehicle>, (StatusCode, Json<Value>)> {
    let vehicles = db.read().await;
    vehicles.get(&id).cloned().map(Json).ok_or_else(not_found)
}

/// Full replacement; the path id wins over any id in the body.
async fn update_vehicle(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, (StatusCode, Json<Value>)> {
    let mut vehicles = db.write().await;
    let slot = vehicles.get_mut(&id).ok_or_else(not_found)?;
    *slot = input.into_vehicle(id);
    tracing::info!(id, "updated vehicle");
    Ok(Json(slot.clone()))
}

async fn delete_vehicle(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut vehicles = db.write().await;
    match vehicles.remove(&id) {
        Some(_) => {
            tracing::info!(id, "deleted vehicle");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

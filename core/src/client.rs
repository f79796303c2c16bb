//! Stateless HTTP request builder and response parser for the vehicle API.
//!
//! # Design
//! `VehicleClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Executing the round-trip is left to a `Transport`.
//!
//! Status mapping:
//! - get/update: 200 is success, 404 is `NotFound`, anything else `HttpError`.
//! - add: 200 is success, an `id` validation message is `IdRequired`,
//!   anything else `HttpError`.
//! - delete: the raw status code is returned as-is.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Vehicle;

/// Messages the backing server uses to reject a create without an id.
const ID_REQUIRED_MESSAGES: [&str; 2] = ["This field may not be null.", "This field is required."];

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct VehicleClient {
    base_url: String,
}

impl VehicleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/vehicles", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_vehicle(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The id is sent as-is, including when absent; the server decides.
    pub fn build_add_vehicle(&self, vehicle: &Vehicle) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/vehicles", self.base_url),
            headers: json_headers(),
            body: Some(to_body(vehicle)?),
        })
    }

    pub fn build_update_vehicle(&self, vehicle: &Vehicle) -> Result<HttpRequest, ApiError> {
        let id = vehicle.id.ok_or(ApiError::IdRequired)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: json_headers(),
            body: Some(to_body(vehicle)?),
        })
    }

    pub fn build_delete_vehicle(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_vehicles(&self, response: HttpResponse) -> Result<Vec<Vehicle>, ApiError> {
        check_status(&response, 200)?;
        from_body(&response.body)
    }

    pub fn parse_get_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, 200)?;
        from_body(&response.body)
    }

    pub fn parse_add_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        if response.status == 200 {
            return from_body(&response.body);
        }
        if is_id_required(&response.body) {
            return Err(ApiError::IdRequired);
        }
        Err(ApiError::HttpError {
            status: response.status,
            body: response.body,
        })
    }

    pub fn parse_update_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response, 200)?;
        from_body(&response.body)
    }

    /// Success or failure is left to the caller.
    pub fn parse_delete_vehicle(&self, response: HttpResponse) -> u16 {
        response.status
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_body(vehicle: &Vehicle) -> Result<String, ApiError> {
    serde_json::to_string(vehicle).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Whether an error body is the server's field-validation complaint about `id`.
///
/// The message may be a bare string or a list of strings.
fn is_id_required(body: &str) -> bool {
    let Ok(Value::Object(errors)) = serde_json::from_str::<Value>(body) else {
        return false;
    };
    let mentions = |message: &Value| {
        message
            .as_str()
            .is_some_and(|m| ID_REQUIRED_MESSAGES.iter().any(|known| m.contains(known)))
    };
    match errors.get("id") {
        Some(Value::Array(messages)) => messages.iter().any(mentions),
        Some(message) => mentions(message),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> VehicleClient {
        VehicleClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: Some(42),
            name: Some("Volvo".to_string()),
            model: Some("XC90".to_string()),
            year: Some(2021),
            ..Vehicle::default()
        }
    }

    #[test]
    fn build_list_vehicles_produces_correct_request() {
        let req = client().build_list_vehicles();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/vehicles");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_vehicle_produces_correct_request() {
        let req = client().build_get_vehicle(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/vehicles/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_add_vehicle_sends_full_field_set() {
        let req = client().build_add_vehicle(&vehicle()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/vehicles");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 42);
        assert_eq!(body["name"], "Volvo");
        assert_eq!(body["year"], 2021);
        assert!(body.get("price").is_none());
    }

    #[test]
    fn build_add_vehicle_without_id_still_builds() {
        let input = Vehicle {
            id: None,
            ..vehicle()
        };
        let req = client().build_add_vehicle(&input).unwrap();
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_vehicle_targets_vehicle_id() {
        let req = client().build_update_vehicle(&vehicle()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/vehicles/42");
        assert!(req.body.is_some());
    }

    #[test]
    fn build_update_vehicle_requires_id() {
        let input = Vehicle {
            id: None,
            ..vehicle()
        };
        let err = client().build_update_vehicle(&input).unwrap_err();
        assert!(matches!(err, ApiError::IdRequired));
    }

    #[test]
    fn build_delete_vehicle_produces_correct_request() {
        let req = client().build_delete_vehicle(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/vehicles/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_vehicles_success() {
        let resp = response(200, r#"[{"id":1,"name":"Lada"},{"id":2}]"#);
        let vehicles = client().parse_list_vehicles(resp).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].name.as_deref(), Some("Lada"));
        assert!(vehicles[1].name.is_none());
    }

    #[test]
    fn parse_list_vehicles_rejects_object() {
        let err = client()
            .parse_list_vehicles(response(200, r#"{"id":1}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_list_vehicles_bad_json() {
        let err = client()
            .parse_list_vehicles(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_get_vehicle_not_found() {
        let err = client()
            .parse_get_vehicle(response(404, r#"{"detail":"Not found."}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_get_vehicle_rejects_unknown_keys() {
        let err = client()
            .parse_get_vehicle(response(200, r#"{"id":1,"owner":"bob"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_add_vehicle_success() {
        let resp = response(200, r#"{"id":42,"name":"Volvo","model":"XC90","year":2021}"#);
        assert_eq!(client().parse_add_vehicle(resp).unwrap(), vehicle());
    }

    #[test]
    fn parse_add_vehicle_id_required() {
        let resp = response(400, r#"{"id":["This field may not be null."]}"#);
        let err = client().parse_add_vehicle(resp).unwrap_err();
        assert!(matches!(err, ApiError::IdRequired));
    }

    #[test]
    fn parse_add_vehicle_id_required_as_string() {
        let resp = response(400, r#"{"id":"This field is required."}"#);
        let err = client().parse_add_vehicle(resp).unwrap_err();
        assert!(matches!(err, ApiError::IdRequired));
    }

    #[test]
    fn parse_add_vehicle_other_id_error_is_generic() {
        let body = r#"{"id":["vehicle with this id already exists."]}"#;
        let err = client().parse_add_vehicle(response(400, body)).unwrap_err();
        match err {
            ApiError::HttpError { status, body: raw } => {
                assert_eq!(status, 400);
                assert_eq!(raw, body);
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn parse_add_vehicle_non_json_failure() {
        let err = client()
            .parse_add_vehicle(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_vehicle_not_found() {
        let err = client()
            .parse_update_vehicle(response(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_update_vehicle_validation_failure() {
        let resp = response(400, r#"{"year":["A valid integer is required."]}"#);
        let err = client().parse_update_vehicle(resp).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_delete_vehicle_returns_raw_status() {
        assert_eq!(client().parse_delete_vehicle(response(204, "")), 204);
        assert_eq!(client().parse_delete_vehicle(response(404, "")), 404);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = VehicleClient::new("http://localhost:3000/");
        let req = client.build_list_vehicles();
        assert_eq!(req.path, "http://localhost:3000/vehicles");
    }
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::db::School;
use crate::error::ApiError;
use crate::geo;
use crate::router::AppState;
use crate::validate::{coerce_f64, is_valid_coordinate, trimmed_text};

const NAME_MAX: usize = 50;
const ADDRESS_MAX: usize = 255;

/// Incoming create/update body. Fields stay raw JSON values so numeric
/// strings go through the explicit coercion step instead of bouncing at
/// deserialization.
#[derive(Debug, Deserialize)]
pub struct SchoolPayload {
    name: Option<Value>,
    address: Option<Value>,
    latitude: Option<Value>,
    longitude: Option<Value>,
}

#[derive(Debug)]
struct ValidSchool {
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
}

fn validate_payload(payload: &SchoolPayload) -> Result<ValidSchool, ApiError> {
    let (Some(name), Some(address), Some(latitude), Some(longitude)) = (
        payload.name.as_ref(),
        payload.address.as_ref(),
        payload.latitude.as_ref(),
        payload.longitude.as_ref(),
    ) else {
        return Err(ApiError::validation("all fields are required"));
    };

    let name = trimmed_text(name)
        .filter(|t| t.chars().count() <= NAME_MAX)
        .ok_or_else(|| ApiError::validation("invalid or missing name"))?;
    let address = trimmed_text(address)
        .filter(|t| t.chars().count() <= ADDRESS_MAX)
        .ok_or_else(|| ApiError::validation("invalid or missing address"))?;

    let (Some(lat), Some(lon)) = (coerce_f64(latitude), coerce_f64(longitude)) else {
        return Err(ApiError::validation("invalid latitude or longitude"));
    };
    if !is_valid_coordinate(lat, lon) {
        return Err(ApiError::validation("invalid latitude or longitude"));
    }

    Ok(ValidSchool {
        name: name.to_string(),
        address: address.to_string(),
        latitude: lat,
        longitude: lon,
    })
}

/// GET / -> service banner with the main endpoints.
pub async fn service_banner() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "school api is running",
        "endpoints": {
            "addschools": "/api/school/addschools",
            "listschools": "/api/school/listschools"
        }
    }))
}

/// POST /api/school/addschools
pub async fn add_school(
    State(state): State<AppState>,
    Json(payload): Json<SchoolPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let school = validate_payload(&payload)?;
    let id = state
        .store
        .create(&school.name, &school.address, school.latitude, school.longitude)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "id": id }))))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Debug, Serialize)]
struct SchoolWithDistance {
    #[serde(flatten)]
    school: School,
    distance_km: f64,
}

/// GET /api/school/listschools?lat=..&lon=..
///
/// Full table scan: distance from the query point to every row, rounded to
/// four decimals and sorted ascending. The sort is stable, so equidistant
/// rows keep their fetch order.
pub async fn list_schools(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let point = query
        .lat
        .as_deref()
        .zip(query.lon.as_deref())
        .and_then(|(lat, lon)| {
            Some((lat.trim().parse::<f64>().ok()?, lon.trim().parse::<f64>().ok()?))
        })
        .filter(|&(lat, lon)| is_valid_coordinate(lat, lon));
    let Some((lat, lon)) = point else {
        return Err(ApiError::validation(
            "lat and lon are required and must be valid numbers",
        ));
    };

    let rows = state.store.list_all().await?;
    let mut schools: Vec<SchoolWithDistance> = rows
        .into_iter()
        .map(|school| {
            let distance = geo::distance_km(lat, lon, school.latitude, school.longitude);
            SchoolWithDistance {
                school,
                distance_km: round4(distance),
            }
        })
        .collect();
    schools.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    Ok(Json(json!({
        "success": true,
        "count": schools.len(),
        "schools": schools
    })))
}

fn round4(km: f64) -> f64 {
    (km * 10_000.0).round() / 10_000.0
}

/// GET /api/school/{id}
pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let school = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("school not found"))?;
    Ok(Json(json!({
        "success": true,
        "message": "school fetched",
        "data": school
    })))
}

/// PUT /api/school/{id}
pub async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SchoolPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let school = validate_payload(&payload)?;
    let affected = state
        .store
        .update(id, &school.name, &school.address, school.latitude, school.longitude)
        .await?;
    if affected == 0 {
        return Err(ApiError::not_found("school not found"));
    }
    Ok(Json(json!({ "success": true, "message": "school updated successfully" })))
}

/// DELETE /api/school/{id}
pub async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let affected = state.store.delete_by_id(id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("school not found with this id"));
    }
    Ok(Json(json!({ "success": true, "message": "school deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(body: Value) -> SchoolPayload {
        serde_json::from_value(body).expect("payload should deserialize")
    }

    #[test]
    fn payload_with_all_fields_passes() {
        let valid = validate_payload(&payload(json!({
            "name": "  Hillside High  ",
            "address": "1 Hill Road",
            "latitude": 12.97,
            "longitude": 77.59
        })))
        .expect("should validate");
        assert_eq!(valid.name, "Hillside High");
        assert_eq!(valid.latitude, 12.97);
    }

    #[test]
    fn numeric_strings_coerce() {
        let valid = validate_payload(&payload(json!({
            "name": "A",
            "address": "B",
            "latitude": "-12.5",
            "longitude": "100"
        })))
        .expect("should validate");
        assert_eq!(valid.latitude, -12.5);
        assert_eq!(valid.longitude, 100.0);
    }

    #[test]
    fn missing_field_is_rejected_first() {
        let err = validate_payload(&payload(json!({ "name": "A" }))).unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "all fields are required"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = validate_payload(&payload(json!({
            "name": "   ",
            "address": "B",
            "latitude": 0,
            "longitude": 0
        })))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "invalid or missing name"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let err = validate_payload(&payload(json!({
            "name": "x".repeat(51),
            "address": "B",
            "latitude": 0,
            "longitude": 0
        })))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = validate_payload(&payload(json!({
            "name": "A",
            "address": "B",
            "latitude": 200,
            "longitude": 0
        })))
        .unwrap_err();
        assert!(
            matches!(err, ApiError::Validation(ref m) if m == "invalid latitude or longitude")
        );
    }

    #[test]
    fn zero_coordinates_are_in_range() {
        let valid = validate_payload(&payload(json!({
            "name": "Equator School",
            "address": "Null Island",
            "latitude": 0,
            "longitude": 0
        })));
        assert!(valid.is_ok());
    }

    #[test]
    fn rounding_matches_wire_precision() {
        assert_eq!(round4(111.19492664455873), 111.1949);
        assert_eq!(round4(55.59746332227937), 55.5975);
        assert_eq!(round4(0.0), 0.0);
    }
}

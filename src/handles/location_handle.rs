use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, LocationError};
use crate::repositories::{NewSensorLocation, SensorLocationRepository};
use crate::services::SingleSlotStore;

#[derive(Clone, Serialize, Deserialize)]
pub struct LocationBody {
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(alias = "regionName")]
    pub region_name: Option<String>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
}

#[derive(Clone)]
pub struct LocationState {
    pub repository: Arc<SensorLocationRepository>,
}

pub async fn save_sensor_location(
    State(state): State<LocationState>,
    Json(body): Json<LocationBody>,
) -> Result<impl IntoResponse, ApiError> {
    let location = NewSensorLocation {
        country: body.country.ok_or(LocationError::MissingField("country"))?,
        city: body.city.ok_or(LocationError::MissingField("city"))?,
        region_name: body
            .region_name
            .ok_or(LocationError::MissingField("regionName"))?,
        lon: body.lon.ok_or(LocationError::MissingField("lon"))?,
        lat: body.lat.ok_or(LocationError::MissingField("lat"))?,
    };

    let stored = state.repository.replace(location).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Polled by the sensor nodes for their registered location.
pub async fn get_sensor_location(
    State(state): State<LocationState>,
) -> Result<impl IntoResponse, ApiError> {
    let location = state
        .repository
        .current()
        .await?
        .ok_or(LocationError::NotFound)?;

    Ok(Json(location))
}

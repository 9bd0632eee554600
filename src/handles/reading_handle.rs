use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::errors::{ApiError, ReadingError};
use crate::models::Metric;
use crate::repositories::ReadingRepository;
use crate::services::{BucketService, MonthlyService, StatsService};

/// Upper bound on raw rows returned for a 24h window; dashboards have no
/// use for more and the nodes report at most once a minute.
pub const RAW_WINDOW_LIMIT: i64 = 1000;

#[derive(Clone, Serialize, Deserialize)]
pub struct ReadingBody {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(alias = "airQuality", alias = "air_quality")]
    pub airquality: Option<f64>,
}

#[derive(Clone, Deserialize)]
pub struct MonthlyQuery {
    pub year: Option<i32>,
    pub metric: Option<String>,
}

#[derive(Clone)]
pub struct ReadingState {
    pub repository: Arc<ReadingRepository>,
    pub buckets: Arc<BucketService>,
    pub monthly: Arc<MonthlyService>,
    pub stats: Arc<StatsService>,
}

pub async fn add_reading(
    State(state): State<ReadingState>,
    Json(body): Json<ReadingBody>,
) -> Result<impl IntoResponse, ApiError> {
    let temperature = body
        .temperature
        .ok_or(ReadingError::MissingField("temperature"))?;
    let humidity = body.humidity.ok_or(ReadingError::MissingField("humidity"))?;
    let air_quality = body
        .airquality
        .ok_or(ReadingError::MissingField("airquality"))?;

    let reading = state
        .repository
        .create(temperature, humidity, air_quality, OffsetDateTime::now_utc())
        .await?;

    Ok((StatusCode::CREATED, Json(reading)))
}

pub async fn get_readings(
    State(state): State<ReadingState>,
) -> Result<impl IntoResponse, ApiError> {
    let start = OffsetDateTime::now_utc() - Duration::hours(24);
    let readings = state.repository.find_since(start, RAW_WINDOW_LIMIT).await?;

    if readings.is_empty() {
        return Err(ReadingError::NoData.into());
    }

    Ok(Json(readings))
}

pub async fn get_half_hourly_averages(
    State(state): State<ReadingState>,
) -> Result<impl IntoResponse, ApiError> {
    let now = state.buckets.now();
    let readings = state
        .repository
        .find_in_window(now - Duration::hours(24), now)
        .await?;

    let buckets = state.buckets.half_hourly(now, &readings)?;

    Ok(Json(buckets))
}

pub async fn get_monthly_averages(
    Query(query): Query<MonthlyQuery>,
    State(state): State<ReadingState>,
) -> Result<impl IntoResponse, ApiError> {
    let year = query.year.ok_or(ReadingError::MissingField("year"))?;
    let metric: Metric = query
        .metric
        .ok_or(ReadingError::MissingField("metric"))?
        .parse()?;

    let averages = state.monthly.monthly_averages(year, metric).await?;

    Ok(Json(averages))
}

pub async fn get_stat_data(
    State(state): State<ReadingState>,
) -> Result<impl IntoResponse, ApiError> {
    let start = OffsetDateTime::now_utc() - Duration::hours(24);
    let readings = state.repository.find_since(start, RAW_WINDOW_LIMIT).await?;

    let stats = state.stats.build(&readings)?;

    Ok(Json(stats))
}

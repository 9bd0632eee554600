use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use time::UtcOffset;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::repositories::{ReadingRepository, SensorLocationRepository};
use crate::services::{
    BucketService, FirmwareService, MonthlyService, StatsService, MAX_FIRMWARE_BYTES,
};

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .unwrap(),
    );

    build_router(storage, settings)
}

pub fn build_router(storage: Arc<Storage>, settings: &Settings) -> Router {
    let offset = UtcOffset::from_hms(settings.stats.utc_offset_hours, 0, 0).unwrap();

    let reading_repository = Arc::new(ReadingRepository::new(storage.clone()));
    let reading_state = ReadingState {
        repository: reading_repository.clone(),
        buckets: Arc::new(BucketService::new(offset)),
        monthly: Arc::new(MonthlyService::new(reading_repository)),
        stats: Arc::new(StatsService::new()),
    };

    let readings = Router::new()
        .route("/readings", get(get_readings).post(add_reading))
        .route("/half-hourly", get(get_half_hourly_averages))
        .route("/monthly-averages", get(get_monthly_averages))
        .route("/stats", get(get_stat_data))
        .with_state(reading_state);

    let location = Router::new()
        .route(
            "/location",
            get(get_sensor_location).post(save_sensor_location),
        )
        .with_state(LocationState {
            repository: Arc::new(SensorLocationRepository::new(storage.clone())),
        });

    let firmware = Router::new()
        .route("/firmware", get(download_firmware).post(upload_firmware))
        .route("/firmware/info", get(get_firmware_info))
        // Headroom above the slot limit so oversized uploads reach the typed
        // PayloadTooLarge path instead of a bare transport rejection
        .layer(DefaultBodyLimit::max(MAX_FIRMWARE_BYTES + 64 * 1024))
        .with_state(FirmwareState {
            service: Arc::new(FirmwareService::new(&settings.firmware.slot_dirs)),
        });

    Router::new()
        .nest(
            "/api/air-monitoring",
            readings.merge(location).merge(firmware),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use time::{Duration, OffsetDateTime};

use airmon_server::app::build_router;
use airmon_server::configs::{
    Database, Firmware, Logger, SchemaManager, Server, Settings, Stats, Storage,
};
use airmon_server::models::Reading;
use airmon_server::repositories::ReadingRepository;

pub struct MockApp {
    pub router: Router,
    pub storage: Arc<Storage>,
    pub repository: Arc<ReadingRepository>,
    // Kept alive for the duration of the test; dropping it removes the slot
    pub slot_dir: TempDir,
}

impl MockApp {
    pub async fn new() -> Self {
        let slot_dir = TempDir::new().unwrap();

        let database = Database {
            migration_path: None,
            clean_start: true,
            url: String::from("sqlite::memory:"),
        };

        let storage = Arc::new(
            Storage::new(database.clone(), SchemaManager::default())
                .await
                .unwrap(),
        );

        let settings = Settings {
            server: Server {
                host: String::from("127.0.0.1"),
                port: 0,
            },
            logger: Logger {
                level: String::from("debug"),
            },
            database,
            firmware: Firmware {
                slot_dirs: vec![slot_dir.path().to_string_lossy().to_string()],
            },
            stats: Stats { utc_offset_hours: 5 },
        };

        let router = build_router(storage.clone(), &settings);
        let repository = Arc::new(ReadingRepository::new(storage.clone()));

        Self {
            router,
            storage,
            repository,
            slot_dir,
        }
    }

    pub async fn seed_reading(
        &self,
        minutes_ago: i64,
        temperature: f64,
        humidity: f64,
        air_quality: f64,
    ) -> Reading {
        self.repository
            .create(
                temperature,
                humidity,
                air_quality,
                OffsetDateTime::now_utc() - Duration::minutes(minutes_ago),
            )
            .await
            .unwrap()
    }

    pub async fn seed_reading_at(
        &self,
        timestamp: OffsetDateTime,
        temperature: f64,
        humidity: f64,
        air_quality: f64,
    ) -> Reading {
        self.repository
            .create(temperature, humidity, air_quality, timestamp)
            .await
            .unwrap()
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

/// Registered physical location of the sensor fleet. Only the newest row is
/// ever current; saving a new one supersedes the previous record.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct SensorLocation {
    pub id: i32,
    pub country: String,
    pub city: String,
    pub region_name: String,
    pub lon: f64,
    pub lat: f64,
    pub created_at: OffsetDateTime,
}

#[derive(Clone)]
pub struct SensorLocationTable;

impl Table for SensorLocationTable {
    fn name(&self) -> &'static str {
        "sensor_locations"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_locations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                country TEXT NOT NULL,
                city TEXT NOT NULL,
                region_name TEXT NOT NULL,
                lon REAL NOT NULL,
                lat REAL NOT NULL,
                created_at TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensor_locations;")
    }
}

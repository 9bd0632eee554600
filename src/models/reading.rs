use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::ReadingError;

use super::Table;

/// One periodic sample reported by a sensor node. Immutable once stored.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub id: i32,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
    /// Air quality index (dust)
    pub air_quality: f64,
    /// The time of the sample, UTC
    pub timestamp: OffsetDateTime,
}

/// The numeric fields a consumer can aggregate over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    AirQuality,
}

impl Metric {
    /// Column name in the readings table. Used to pick the aggregated
    /// column; never interpolated from user input directly.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::AirQuality => "air_quality",
        }
    }

    pub fn value_of(&self, reading: &Reading) -> f64 {
        match self {
            Metric::Temperature => reading.temperature,
            Metric::Humidity => reading.humidity,
            Metric::AirQuality => reading.air_quality,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::AirQuality => "airquality",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Metric {
    type Err = ReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            "airquality" | "airQuality" | "air_quality" => Ok(Metric::AirQuality),
            other => Err(ReadingError::UnknownMetric(other.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct ReadingTable;

impl Table for ReadingTable {
    fn name(&self) -> &'static str {
        "readings"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                air_quality REAL NOT NULL,
                timestamp TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS readings;")
    }
}

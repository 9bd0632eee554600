use std::sync::Arc;

use sqlx::Error;
use time::{OffsetDateTime, UtcOffset};

use crate::configs::Storage;
use crate::models::{Metric, Reading};

/// One calendar month of grouped readings. `total` keeps full precision;
/// rounding happens at the presentation edge only.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct MonthlyGroup {
    pub month: i64,
    pub total: f64,
    pub count: i64,
}

pub struct ReadingRepository {
    storage: Arc<Storage>,
}

impl ReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    // Timestamps are stored as UTC text; bound values must be UTC too or
    // sqlite's lexicographic comparison would misorder mixed offsets
    fn to_utc(instant: OffsetDateTime) -> OffsetDateTime {
        instant.to_offset(UtcOffset::UTC)
    }

    // Store one ingested sample
    pub async fn create(
        &self,
        temperature: f64,
        humidity: f64,
        air_quality: f64,
        timestamp: OffsetDateTime,
    ) -> Result<Reading, Error> {
        let reading: Reading = sqlx::query_as(
            r#"
            INSERT INTO readings (temperature, humidity, air_quality, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(temperature)
        .bind(humidity)
        .bind(air_quality)
        .bind(Self::to_utc(timestamp))
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(reading)
    }

    // Readings since a point in time, newest first, bounded
    pub async fn find_since(
        &self,
        start: OffsetDateTime,
        limit: i64,
    ) -> Result<Vec<Reading>, Error> {
        let readings: Vec<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            WHERE timestamp >= $1
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(Self::to_utc(start))
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }

    // Readings within a window, oldest first
    pub async fn find_in_window(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<Reading>, Error> {
        let readings: Vec<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            WHERE timestamp >= $1 AND timestamp <= $2
            ORDER BY timestamp ASC
            "#,
        )
        .bind(Self::to_utc(start))
        .bind(Self::to_utc(end))
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }

    // Sum and count of one metric grouped by calendar month. Months without
    // readings produce no row.
    pub async fn group_by_month(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
        metric: Metric,
    ) -> Result<Vec<MonthlyGroup>, Error> {
        // The column name comes from the Metric enum, not from the caller
        let query = format!(
            r#"
            SELECT CAST(strftime('%m', timestamp) AS INTEGER) AS month,
                   SUM({column}) AS total,
                   COUNT({column}) AS count
            FROM readings
            WHERE timestamp >= $1 AND timestamp < $2 AND {column} IS NOT NULL
            GROUP BY month
            ORDER BY month ASC
            "#,
            column = metric.column()
        );

        let groups: Vec<MonthlyGroup> = sqlx::query_as(&query)
            .bind(Self::to_utc(start))
            .bind(Self::to_utc(end))
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(groups)
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Error;
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::SensorLocation;
use crate::services::SingleSlotStore;

#[derive(Clone, Debug)]
pub struct NewSensorLocation {
    pub country: String,
    pub city: String,
    pub region_name: String,
    pub lon: f64,
    pub lat: f64,
}

pub struct SensorLocationRepository {
    storage: Arc<Storage>,
}

impl SensorLocationRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SingleSlotStore for SensorLocationRepository {
    type Item = NewSensorLocation;
    type Stored = SensorLocation;
    type Error = Error;

    // Insert the new record and drop every other row in one transaction, so
    // a reader never observes zero or two current locations.
    async fn replace(&self, item: NewSensorLocation) -> Result<SensorLocation, Error> {
        let mut tx = self.storage.get_pool().begin().await?;

        let location: SensorLocation = sqlx::query_as(
            r#"
            INSERT INTO sensor_locations (country, city, region_name, lon, lat, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&item.country)
        .bind(&item.city)
        .bind(&item.region_name)
        .bind(item.lon)
        .bind(item.lat)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM sensor_locations WHERE id <> $1")
            .bind(location.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(location)
    }

    async fn current(&self) -> Result<Option<SensorLocation>, Error> {
        let location: Option<SensorLocation> =
            sqlx::query_as("SELECT * FROM sensor_locations ORDER BY id DESC LIMIT 1")
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(location)
    }

    async fn clear(&self) -> Result<(), Error> {
        sqlx::query("DELETE FROM sensor_locations")
            .execute(self.storage.get_pool())
            .await?;

        Ok(())
    }
}

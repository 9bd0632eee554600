use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Error, SqlitePool};

use crate::configs::schema::SchemaManager;
use crate::configs::settings::Database;

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database: Database, schema_manager: SchemaManager) -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            // an in-memory database vanishes once its last connection closes
            .min_connections(1)
            .max_connections(10)
            .connect(&database.url)
            .await?;

        let storage = Self { pool };
        storage.prepare(&schema_manager, &database).await?;

        Ok(storage)
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn prepare(&self, schema: &SchemaManager, database: &Database) -> Result<(), Error> {
        if database.clean_start {
            sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
                .execute(&self.pool)
                .await?;

            for statement in schema
                .dispose_schema()
                .iter()
                .chain(schema.create_schema().iter())
            {
                sqlx::query(statement).execute(&self.pool).await?;
            }

            tracing::warn!("clean start: dropped and recreated all tables");
        }

        if let Some(migration_path) = &database.migration_path {
            Migrator::new(Path::new(migration_path))
                .await?
                .run(&self.pool)
                .await?;

            tracing::info!("database migrations applied");
        }

        Ok(())
    }
}

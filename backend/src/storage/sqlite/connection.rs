use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::appointment_repository::AppointmentRepository;
use crate::storage::traits::Connection;

/// DbConnection manages the SQLite pool holding the appointment book
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and make sure the schema exists
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database {}", url))?;
            info!("Created database {}", url);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        info!("Database connected successfully");

        Self::setup_schema(&pool).await?;
        info!("Table created/verified successfully");

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url, 1).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT so ids of the highest rows are never handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS appointments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_name VARCHAR(100) NOT NULL,
                phone_number VARCHAR(20) NOT NULL,
                service VARCHAR(100) NOT NULL,
                appointment_datetime DATETIME NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_appointments_datetime
            ON appointments(appointment_datetime);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type AppointmentRepository = AppointmentRepository;

    fn create_appointment_repository(&self) -> Self::AppointmentRepository {
        AppointmentRepository::new(self.clone())
    }
}

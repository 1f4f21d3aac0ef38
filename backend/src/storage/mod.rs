//! # Storage Module
//!
//! Persistence for the appointment book. The domain layer only sees the
//! [`AppointmentStorage`] trait; which backend sits behind it is decided
//! once at startup from configuration.
//!
//! ## Backends
//!
//! - **sqlite** - the `appointments` table through sqlx (default)
//! - **csv** - a single `appointments.csv` in a data directory

pub mod csv;
pub mod sqlite;
pub mod traits;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, StorageBackend};

pub use self::csv::CsvConnection;
pub use self::sqlite::DbConnection;
pub use traits::{AppointmentStorage, Connection};

/// Open the configured backend and hand back its appointment repository
pub async fn open_appointment_storage(config: &AppConfig) -> Result<Arc<dyn AppointmentStorage>> {
    match config.storage {
        StorageBackend::Sqlite => {
            info!("Using SQLite storage at {}", config.database_url);
            let connection = DbConnection::new(&config.database_url, config.max_connections).await?;
            Ok(repository_for(&connection))
        }
        StorageBackend::Csv => {
            info!("Using CSV storage in {}", config.data_directory.display());
            let connection = CsvConnection::new(&config.data_directory)?;
            Ok(repository_for(&connection))
        }
    }
}

fn repository_for<C: Connection>(connection: &C) -> Arc<dyn AppointmentStorage> {
    Arc::new(connection.create_appointment_repository())
}

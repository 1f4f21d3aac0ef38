use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::appointment_repository::AppointmentRepository;
use crate::storage::traits::Connection;

pub(crate) const APPOINTMENTS_FILE_NAME: &str = "appointments.csv";
pub(crate) const APPOINTMENTS_HEADER: [&str; 5] =
    ["id", "customer_name", "phone_number", "service", "appointment_datetime"];

/// CsvConnection owns the data directory and serializes writers to it
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory {}", base_path.display());
        }

        let connection = Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        };
        connection.ensure_appointments_file_exists()?;
        info!("Appointment file ready at {}", connection.appointments_file_path().display());

        Ok(connection)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn appointments_file_path(&self) -> PathBuf {
        self.base_directory.join(APPOINTMENTS_FILE_NAME)
    }

    /// Create the appointments file with its header if it is missing
    pub fn ensure_appointments_file_exists(&self) -> Result<()> {
        let file_path = self.appointments_file_path();

        if !file_path.exists() {
            let header = format!("{}\n", APPOINTMENTS_HEADER.join(","));
            fs::write(&file_path, header)
                .with_context(|| format!("Failed to create {}", file_path.display()))?;
        }

        Ok(())
    }

    /// Lock held for the whole read-modify-write of an insert
    pub(crate) fn write_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.write_lock)
    }
}

impl Connection for CsvConnection {
    type AppointmentRepository = AppointmentRepository;

    fn create_appointment_repository(&self) -> Self::AppointmentRepository {
        AppointmentRepository::new(self.clone())
    }
}

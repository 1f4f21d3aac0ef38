//! RAII test environment for the CSV backend
//!
//! Test data lives in a `TempDir` that is removed when the environment is
//! dropped, even if the test panics.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;

pub struct TestEnvironment {
    /// Kept alive so the directory is not removed before drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("SALON_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}

//! # Configuration
//!
//! Settings are read from a YAML file and then overridden from the
//! environment.
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"
//! allowed_origin: "http://localhost:8080"
//! storage: sqlite            # or csv
//! database_url: "sqlite:salon.db"
//! data_directory: "salon_data"
//! max_connections: 5
//! min_separation_minutes: 30
//! log_filter: "info"
//! ```
//!
//! The file comes from `SALON_CONFIG`, or `salon.yaml` in the working
//! directory when present. Environment overrides: `SALON_BIND_ADDRESS`,
//! `SALON_STORAGE`, `SALON_DATABASE_URL`, `SALON_DATA_DIRECTORY`, `SALON_LOG`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::conflict_checker::DEFAULT_MIN_SEPARATION_MINUTES;

pub const CONFIG_PATH_VAR: &str = "SALON_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "salon.yaml";

/// Conflicts are only checked within one calendar day, so a wider window means nothing
pub const MAX_SEPARATION_MINUTES: i64 = 24 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Csv,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "csv" => Ok(StorageBackend::Csv),
            _ => Err(ConfigError::InvalidValue {
                key: "storage".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub allowed_origin: String,
    pub storage: StorageBackend,
    pub database_url: String,
    pub data_directory: PathBuf,
    pub max_connections: u32,
    pub min_separation_minutes: i64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            allowed_origin: "http://localhost:8080".to_string(),
            storage: StorageBackend::Sqlite,
            database_url: "sqlite:salon.db".to_string(),
            data_directory: PathBuf::from("salon_data"),
            max_connections: 5,
            min_separation_minutes: DEFAULT_MIN_SEPARATION_MINUTES,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Config file to read: `SALON_CONFIG`, else `salon.yaml` if it exists
    pub fn resolve_path<F>(lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()))
    }

    /// Defaults, then the file at `path` if any, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }

    /// Apply `SALON_*` overrides using `lookup` to read variables
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SALON_BIND_ADDRESS") {
            self.bind_address = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SALON_BIND_ADDRESS".to_string(),
                value,
            })?;
        }
        if let Some(value) = lookup("SALON_STORAGE") {
            self.storage = value.parse()?;
        }
        if let Some(value) = lookup("SALON_DATABASE_URL") {
            self.database_url = value;
        }
        if let Some(value) = lookup("SALON_DATA_DIRECTORY") {
            self.data_directory = PathBuf::from(value);
        }
        if let Some(value) = lookup("SALON_LOG") {
            self.log_filter = value;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEPARATION_MINUTES).contains(&self.min_separation_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "min_separation_minutes".to_string(),
                value: self.min_separation_minutes.to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_connections".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.min_separation_minutes, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "storage: csv\ndata_directory: /var/lib/salon\nmin_separation_minutes: 45").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.storage, StorageBackend::Csv);
        assert_eq!(config.data_directory, PathBuf::from("/var/lib/salon"));
        assert_eq!(config.min_separation_minutes, 45);
        assert_eq!(config.database_url, "sqlite:salon.db");
    }

    #[test]
    fn test_malformed_yaml_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "storage: [not, a, backend]").unwrap();

        assert!(matches!(AppConfig::from_file(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = AppConfig::from_file(Path::new("/definitely/not/here/salon.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SALON_BIND_ADDRESS", "0.0.0.0:8081"),
            ("SALON_STORAGE", "CSV"),
            ("SALON_LOG", "debug"),
        ]);
        let mut config = AppConfig::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.bind_address.port(), 8081);
        assert_eq!(config.storage, StorageBackend::Csv);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| (key == "SALON_STORAGE").then(|| "postgres".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = config.apply_overrides(|key| (key == "SALON_BIND_ADDRESS").then(|| "nowhere".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_non_positive_window_is_invalid() {
        let config = AppConfig {
            min_separation_minutes: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_window_is_invalid() {
        for minutes in [MAX_SEPARATION_MINUTES + 1, i64::MAX] {
            let config = AppConfig {
                min_separation_minutes: minutes,
                ..AppConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
        }

        let full_day = AppConfig {
            min_separation_minutes: MAX_SEPARATION_MINUTES,
            ..AppConfig::default()
        };
        assert!(full_day.validate().is_ok());
    }

    #[test]
    fn test_oversized_window_in_file_fails_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "min_separation_minutes: 9223372036854775807").unwrap();

        let result = AppConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_resolve_path_prefers_environment() {
        let path = AppConfig::resolve_path(|key| (key == CONFIG_PATH_VAR).then(|| "/etc/salon/salon.yaml".to_string()));
        assert_eq!(path, Some(PathBuf::from("/etc/salon/salon.yaml")));
    }
}

//! Storage configuration

use super::{default_connection_timeout, default_max_connections};
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Report artifact storage
    #[serde(default)]
    pub reports: ReportStorageConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/batch.db?mode=rwc".to_string(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the URL points at SQLite
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite")
    }
}

/// Report artifact storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStorageConfig {
    /// Directory holding one JSON document per finished request
    pub local_path: String,
}

impl Default for ReportStorageConfig {
    fn default() -> Self {
        Self {
            local_path: "./data/reports".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert!(config.is_sqlite());
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connection_timeout, 5);
    }

    #[test]
    fn test_database_config_deserialization() {
        let json = r#"{"url": "postgresql://prod/batch", "max_connections": 50}"#;
        let config: DatabaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.url, "postgresql://prod/batch");
        assert_eq!(config.max_connections, 50);
        assert_eq!(config.connection_timeout, 5);
        assert!(!config.is_sqlite());
    }

    #[test]
    fn test_storage_config_defaults_when_missing() {
        let config: StorageConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.reports.local_path, "./data/reports");
    }
}

//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating service configuration");

        self.server.validate()?;
        self.storage.validate()?;
        self.auth.validate()?;
        self.batch.validate()?;
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        if !self.api_prefix.starts_with('/') {
            return Err("API prefix must start with '/'".to_string());
        }
        if self.workers == Some(0) {
            return Err("Worker count must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        self.database.validate()?;

        if self.reports.local_path.is_empty() {
            return Err("Report storage path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        let supported = ["sqlite:", "postgres://", "postgresql://"];
        if !supported.iter().any(|scheme| self.url.starts_with(scheme)) {
            return Err("Only SQLite and PostgreSQL databases are supported".to_string());
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        let mut keys = HashSet::new();

        for user in &self.users {
            if user.name.is_empty() {
                return Err("User name cannot be empty".to_string());
            }
            if user.api_key.is_empty() {
                return Err(format!("API key is required for user: {}", user.name));
            }
            if !names.insert(user.name.as_str()) {
                return Err(format!("Duplicate user name: {}", user.name));
            }
            if !keys.insert(user.api_key.as_str()) {
                return Err(format!("Duplicate API key for user: {}", user.name));
            }
        }
        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.report_workers == 0 {
            return Err("At least one report worker is required".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("Report queue capacity must be greater than 0".to_string());
        }
        if self.max_domains_per_request == 0 {
            return Err("max_domains_per_request must be greater than 0".to_string());
        }
        Ok(())
    }
}

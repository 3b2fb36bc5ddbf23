//! Tests for configuration validators

#[cfg(test)]
mod tests {
    use crate::config::models::*;
    use crate::config::validation::Validate;

    fn user(name: &str, key: &str) -> ApiUserConfig {
        ApiUserConfig {
            name: name.to_string(),
            api_key: key.to_string(),
            admin: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = ServiceConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_database_rejected() {
        let config = DatabaseConfig {
            url: "mysql://localhost/batch".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_postgres_and_memory_sqlite_accepted() {
        for url in ["postgresql://localhost/batch", "sqlite::memory:"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..DatabaseConfig::default()
            };
            assert!(config.validate().is_ok(), "{} should be accepted", url);
        }
    }

    #[test]
    fn test_duplicate_users_rejected() {
        let config = AuthConfig {
            users: vec![user("alice", "k1"), user("alice", "k2")],
        };
        assert!(config.validate().unwrap_err().contains("Duplicate user name"));

        let config = AuthConfig {
            users: vec![user("alice", "k1"), user("bob", "k1")],
        };
        assert!(config.validate().unwrap_err().contains("Duplicate API key"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = BatchConfig {
            report_workers: 0,
            ..BatchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use crate::common::config_with_users;
    use hygiene_batch::config::{Config, LogFormat, Validate};

    #[tokio::test]
    async fn test_shipped_example_config_loads() {
        let config = Config::from_file("config/batch.yaml.example").await.unwrap();

        assert_eq!(config.server().api_prefix, "/api/batch/v2");
        assert_eq!(config.auth().users.len(), 2);
        assert!(config.auth().find_by_key("change-me-too").unwrap().admin);
        assert_eq!(config.batch().report_workers, 2);
        assert_eq!(config.logging().format, LogFormat::Text);
    }

    #[test]
    fn test_duplicate_api_keys_rejected() {
        let config = config_with_users(&[("alice", "same", false), ("bob", "same", false)]);
        assert!(config.service.validate().is_err());
    }

    #[test]
    fn test_distinct_users_accepted() {
        let config = config_with_users(&[("alice", "a-key", false), ("ops", "o-key", true)]);
        assert!(config.validate().is_ok());
    }
}

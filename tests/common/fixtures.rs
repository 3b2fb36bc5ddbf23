//! Test fixtures and data factories

use hygiene_batch::config::{ApiUserConfig, Config};

/// Factory for domain lists
pub struct DomainFactory;

impl DomainFactory {
    /// `n` distinct, valid domain names
    pub fn many(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("site{:04}.example", i)).collect()
    }

    /// Domain names from literals
    pub fn of(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }
}

/// Default configuration with the given `(name, api_key, admin)` accounts
pub fn config_with_users(users: &[(&str, &str, bool)]) -> Config {
    let mut config = Config::default();
    config.service.auth.users = users
        .iter()
        .map(|(name, api_key, admin)| ApiUserConfig {
            name: name.to_string(),
            api_key: api_key.to_string(),
            admin: *admin,
        })
        .collect();
    config
}

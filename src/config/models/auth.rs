//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Accounts allowed to use the batch API
    #[serde(default)]
    pub users: Vec<ApiUserConfig>,
}

/// A single batch API account
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiUserConfig {
    /// Account name, used as the owner of submitted requests
    pub name: String,
    /// Secret presented by the client
    pub api_key: String,
    /// May use the administrative listing
    #[serde(default)]
    pub admin: bool,
}

impl std::fmt::Debug for ApiUserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiUserConfig")
            .field("name", &self.name)
            .field("api_key", &"[REDACTED]")
            .field("admin", &self.admin)
            .finish()
    }
}

impl AuthConfig {
    /// Find the account owning an API key
    pub fn find_by_key(&self, api_key: &str) -> Option<&ApiUserConfig> {
        self.users.iter().find(|user| user.api_key == api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            users: vec![
                ApiUserConfig {
                    name: "alice".to_string(),
                    api_key: "key-alice".to_string(),
                    admin: false,
                },
                ApiUserConfig {
                    name: "ops".to_string(),
                    api_key: "key-ops".to_string(),
                    admin: true,
                },
            ],
        }
    }

    #[test]
    fn test_find_by_key() {
        let config = config();
        assert_eq!(config.find_by_key("key-ops").unwrap().name, "ops");
        assert!(config.find_by_key("nope").is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", config().users[0]);
        assert!(!rendered.contains("key-alice"));
        assert!(rendered.contains("REDACTED"));
    }
}

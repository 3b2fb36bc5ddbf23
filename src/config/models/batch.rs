//! Batch lifecycle configuration

use serde::{Deserialize, Serialize};

/// Batch lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Count cancelled domain jobs as finished when reporting progress
    #[serde(default)]
    pub count_cancelled_as_finished: bool,
    /// Live requests an owner may have at once (0 = unlimited)
    #[serde(default)]
    pub max_live_requests_per_owner: u32,
    /// Upper bound on domains in a single request
    #[serde(default = "default_max_domains_per_request")]
    pub max_domains_per_request: usize,
    /// Background workers consuming the report queue
    #[serde(default = "default_report_workers")]
    pub report_workers: usize,
    /// Pending report tasks the queue holds before dropping new ones
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Page size of the request listing when the client does not pass one
    #[serde(default = "default_list_limit")]
    pub default_list_limit: u64,
    /// Target of the documentation redirect
    #[serde(default = "default_documentation_url")]
    pub documentation_url: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count_cancelled_as_finished: false,
            max_live_requests_per_owner: 0,
            max_domains_per_request: default_max_domains_per_request(),
            report_workers: default_report_workers(),
            queue_capacity: default_queue_capacity(),
            default_list_limit: default_list_limit(),
            documentation_url: default_documentation_url(),
        }
    }
}

fn default_max_domains_per_request() -> usize {
    5000
}

fn default_report_workers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_list_limit() -> u64 {
    10
}

fn default_documentation_url() -> String {
    "https://github.com/internetstandards/Internet.nl/blob/main/documentation/batch_http_api.md"
        .to_string()
}

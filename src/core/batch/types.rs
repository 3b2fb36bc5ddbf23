//! Batch domain types

use super::status::{BatchDomainStatus, BatchRequestStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of test run for every domain of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Website tests (IPv6, DNSSEC, TLS, security headers)
    #[default]
    Web,
    /// Mail server tests (IPv6, DNSSEC, STARTTLS, SPF/DKIM/DMARC)
    Mail,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mail => "mail",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Self::Web),
            "mail" => Ok(Self::Mail),
            _ => Err(format!("Invalid request type: {s}")),
        }
    }
}

/// One submitted batch job
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    /// Externally visible identifier
    pub request_id: String,
    /// Submitting account
    pub owner: String,
    /// Client supplied label
    pub name: String,
    pub request_type: RequestType,
    pub status: BatchRequestStatus,
    pub submitted_at: DateTime<Utc>,
    /// Set once on the terminal transition
    pub finished_at: Option<DateTime<Utc>>,
    /// Key of the persisted report, absent until generated
    pub report_file: Option<String>,
}

impl BatchRequest {
    /// Whether a report artifact has been published
    pub fn has_report_file(&self) -> bool {
        self.report_file.is_some()
    }

    /// API-facing view of this request
    pub fn to_api(&self) -> ApiBatchRequest {
        ApiBatchRequest {
            request_id: self.request_id.clone(),
            request_type: self.request_type,
            name: self.name.clone(),
            status: self.status,
            submit_date: self.submitted_at,
            finished_date: self.finished_at,
        }
    }
}

/// Request fields exposed to API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiBatchRequest {
    pub request_id: String,
    pub request_type: RequestType,
    pub name: String,
    pub status: BatchRequestStatus,
    pub submit_date: DateTime<Utc>,
    pub finished_date: Option<DateTime<Utc>>,
}

/// Output of the test engine for one domain
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainResult {
    pub web: Option<serde_json::Value>,
    pub mail: Option<serde_json::Value>,
}

/// One domain under a batch request
#[derive(Debug, Clone, PartialEq)]
pub struct DomainJob {
    pub id: String,
    /// Owning request's `request_id`
    pub request_id: String,
    pub domain: String,
    pub status: BatchDomainStatus,
    pub web_result: Option<serde_json::Value>,
    pub mail_result: Option<serde_json::Value>,
}

/// Finished and total domain counts of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub finished: u64,
    pub total: u64,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.finished == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.finished, self.total)
    }
}

/// Per-domain entry of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReport {
    pub status: BatchDomainStatus,
    pub web_result: Option<serde_json::Value>,
    pub mail_result: Option<serde_json::Value>,
}

/// Aggregated report of a finished request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub request: ApiBatchRequest,
    /// Keyed by domain name, ordered so serialization is reproducible
    pub domains: BTreeMap<String, DomainReport>,
}

/// Result of asking for a request's report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// Report is available
    Ready(Report),
    /// Not done yet, or generation still in flight; poll again
    Pending,
}

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(rename = "type", default)]
    pub request_type: RequestType,
    pub domains: Vec<String>,
}

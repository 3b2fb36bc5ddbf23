//! Report store types

use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A published report artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportArtifact {
    /// Key under which the artifact can be read back
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// SHA-256 of the content, hex encoded
    pub checksum: String,
}

/// Object-store-like persistence for report documents
///
/// Readers never observe a partially written artifact: `publish` replaces the
/// artifact in one step.
#[async_trait]
pub trait ReportStore: Send + Sync + std::fmt::Debug {
    /// Store `content` as the report of `request_id`, replacing any previous one
    async fn publish(&self, request_id: &str, content: &[u8]) -> Result<ReportArtifact>;

    /// Read an artifact by key
    async fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Whether an artifact exists under `key`
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Remove an artifact, a missing one is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check that the store is usable
    async fn health_check(&self) -> Result<()>;
}

/// Storage key of a request's report
pub fn report_key(request_id: &str) -> String {
    format!("{}.json", request_id)
}

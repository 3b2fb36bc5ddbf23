//! Local file system report store

use crate::utils::error::{BatchError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::{ReportArtifact, ReportStore, report_key};

/// Reports as `<request_id>.json` files under one directory
#[derive(Debug, Clone)]
pub struct LocalReportStore {
    base_path: PathBuf,
}

impl LocalReportStore {
    /// Create a new local store, creating the directory if needed
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                BatchError::storage(format!("Failed to create report directory: {}", e))
            })?;
        }

        info!("Report store initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    /// Resolve a key to a path, rejecting anything that could leave the directory
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if !valid {
            return Err(BatchError::storage(format!("Invalid report key: {}", key)));
        }
        Ok(self.base_path.join(key))
    }

    fn checksum(content: &[u8]) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl ReportStore for LocalReportStore {
    async fn publish(&self, request_id: &str, content: &[u8]) -> Result<ReportArtifact> {
        let key = report_key(request_id);
        let final_path = self.path_for(&key)?;
        // Scratch file in the same directory so the rename stays on one filesystem
        let scratch_path = self
            .base_path
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));

        let write = async {
            let mut file = fs::File::create(&scratch_path).await?;
            file.write_all(content).await?;
            file.flush().await?;
            file.sync_all().await?;
            fs::rename(&scratch_path, &final_path).await
        };

        if let Err(e) = write.await {
            if let Err(cleanup) = fs::remove_file(&scratch_path).await {
                warn!("Failed to remove scratch file {}: {}", scratch_path.display(), cleanup);
            }
            return Err(BatchError::storage(format!(
                "Failed to publish report {}: {}",
                key, e
            )));
        }

        debug!(request_id, key = %key, size = content.len(), "Report published");
        Ok(ReportArtifact {
            key,
            size: content.len() as u64,
            checksum: Self::checksum(content),
        })
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        fs::read(&path)
            .await
            .map_err(|e| BatchError::storage(format!("Failed to read report {}: {}", key, e)))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Report deleted: {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BatchError::storage(format!(
                "Failed to delete report {}: {}",
                key, e
            ))),
        }
    }

    async fn health_check(&self) -> Result<()> {
        let metadata = fs::metadata(&self.base_path).await.map_err(|e| {
            BatchError::storage(format!("Report directory unavailable: {}", e))
        })?;

        if !metadata.is_dir() {
            return Err(BatchError::storage(format!(
                "Report path is not a directory: {}",
                self.base_path.display()
            )));
        }
        Ok(())
    }
}

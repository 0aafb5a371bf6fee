//! Implements ReportStorePort on the local filesystem.
//!
//! UTF-8 text, trailing newline, written via temp file + rename.

use crate::domain::DomainError;
use crate::ports::ReportStorePort;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// JSON report file store.
#[derive(Debug, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ReportStorePort for JsonFileStore {
    /// Atomic save using write-replace:
    /// 1. Write to temp file next to the target
    /// 2. sync_all() to flush to disk
    /// 3. Rename over the target path
    async fn save(&self, path: &Path, payload: &str) -> Result<(), DomainError> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = std::path::PathBuf::from(temp_name);

        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Persistence(format!("create temp file: {}", e)))?;
        f.write_all(payload.as_bytes())
            .await
            .map_err(|e| DomainError::Persistence(format!("write temp file: {}", e)))?;
        f.write_all(b"\n")
            .await
            .map_err(|e| DomainError::Persistence(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Persistence(format!("sync temp file: {}", e)))?;
        drop(f);

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(DomainError::Persistence(format!("rename failed: {}", e)));
        }

        info!(path = %path.display(), bytes = payload.len() + 1, "saved JSON report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        JsonFileStore::new()
            .save(&path, "{\n  \"ключ\": 1\n}")
            .await
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"ключ\": 1\n}\n");
        assert!(!dir.path().join("report.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let err = JsonFileStore::new().save(&path, "{}").await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}

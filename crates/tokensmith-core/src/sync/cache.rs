use std::io;
use std::path::{Path, PathBuf};

use tokensmith_types::SyncError;

use crate::utils::fs::write_atomic;

pub const CACHE_DIR: &str = ".tokensmith";
pub const CACHE_FILE: &str = "synced-version";

/// Last successfully synced version tag of one consumer project.
#[derive(Debug, Clone)]
pub struct SyncCache {
    path: PathBuf,
}

impl SyncCache {
    /// Cache for the project rooted at `project_root`.
    pub fn for_project(project_root: &Path) -> Self {
        Self { path: project_root.join(CACHE_DIR).join(CACHE_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached tag, trimmed. A missing or blank file is `None`.
    pub async fn read(&self) -> Result<Option<String>, SyncError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let version = content.trim();
                Ok((!version.is_empty()).then(|| version.to_string()))
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SyncError::cache_io(&self.path, &e)),
        }
    }

    pub async fn write(&self, version: &str) -> Result<(), SyncError> {
        write_atomic(&self.path, format!("{version}\n"))
            .await
            .map_err(|e| SyncError::cache_io(&self.path, &e))?;
        tracing::debug!(path = %self.path.display(), %version, "Sync cache updated");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_cache_reads_none() {
        let tmp = TempDir::new().unwrap();
        let cache = SyncCache::for_project(tmp.path());
        assert_eq!(cache.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read_trims() {
        let tmp = TempDir::new().unwrap();
        let cache = SyncCache::for_project(tmp.path());
        cache.write("v2.1.0").await.unwrap();

        assert_eq!(cache.read().await.unwrap().as_deref(), Some("v2.1.0"));
        let raw = tokio::fs::read_to_string(tmp.path().join(".tokensmith/synced-version")).await.unwrap();
        assert_eq!(raw, "v2.1.0\n");
    }

    #[tokio::test]
    async fn test_hand_edited_whitespace_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let cache = SyncCache::for_project(tmp.path());
        tokio::fs::create_dir_all(tmp.path().join(CACHE_DIR)).await.unwrap();
        tokio::fs::write(cache.path(), "  v1.0.0 \r\n").await.unwrap();
        assert_eq!(cache.read().await.unwrap().as_deref(), Some("v1.0.0"));

        tokio::fs::write(cache.path(), "\n").await.unwrap();
        assert_eq!(cache.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cache_path_that_is_a_directory_is_cache_io() {
        let tmp = TempDir::new().unwrap();
        let cache = SyncCache::for_project(tmp.path());
        tokio::fs::create_dir_all(cache.path()).await.unwrap();

        let err = cache.read().await.unwrap_err();
        assert!(matches!(err, SyncError::CacheIo { .. }));
    }
}

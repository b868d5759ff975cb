//! Release fetching and consumer sync errors.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum SyncError {
    /// The pinned tag does not exist in the release store
    #[error("Release {version} not found in {repo}")]
    ReleaseNotFound { repo: String, version: String },

    /// Release store answered 401/403
    #[error("Authorization required for {resource}")]
    AuthRequired { resource: String },

    /// A single asset is missing. Recovered by the sync engine (skip + warn).
    #[error("Asset not found: {asset}")]
    AssetNotFound { asset: String },

    /// Any other non-success status from the release store
    #[error("Release store returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure (DNS, TLS, connection reset)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Cache file exists but could not be read or written
    #[error("Sync cache error at {path}: {message}")]
    CacheIo { path: String, message: String },

    /// Writing a synced asset to disk failed
    #[error("Failed to write {path}: {message}")]
    Io { path: String, message: String },
}

impl SyncError {
    pub fn cache_io(path: &Path, e: &std::io::Error) -> Self {
        Self::CacheIo { path: path.display().to_string(), message: e.to_string() }
    }

    pub fn io(path: &Path, e: &std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), message: e.to_string() }
    }
}

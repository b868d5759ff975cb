//! Release store access.
//!
//! The sync engine only talks to [`ReleaseStore`]; [`GitHubReleaseClient`]
//! implements it against the GitHub Releases REST API.

mod github;

pub use github::{GitHubReleaseClient, DEFAULT_API_URL};

use async_trait::async_trait;

use tokensmith_types::{AssetLocator, ReleaseMetadata, SyncError};

#[async_trait]
pub trait ReleaseStore: Send + Sync {
    /// Metadata for the release tagged `version` in `repo` (`owner/name`).
    async fn fetch_release(&self, repo: &str, version: &str) -> Result<ReleaseMetadata, SyncError>;

    /// Download a single asset as text. A missing asset is [`SyncError::AssetNotFound`].
    async fn fetch_asset(&self, asset: &AssetLocator) -> Result<String, SyncError>;
}

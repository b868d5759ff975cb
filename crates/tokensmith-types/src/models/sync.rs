//! Sync run options and outcomes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SyncOptions {
    /// Bypass the cache short-circuit
    pub force: bool,
    /// Log the plan only: no network, no writes, no cache update
    pub dry_run: bool,
}

/// One planned asset write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedFile {
    pub asset: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    pub repo: String,
    pub version: String,
    pub files: Vec<PlannedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostSyncStatus {
    Succeeded,
    Failed { code: Option<i32> },
    SpawnFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Cache matched and outputs were present; nothing was fetched or written
    UpToDate { version: String },
    DryRun { plan: SyncPlan },
    Synced {
        version: String,
        /// Local paths written, in config order
        written: Vec<String>,
        /// Asset names absent from the release
        skipped: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        post_sync: Option<PostSyncStatus>,
    },
}

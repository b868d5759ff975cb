//! Typed error definitions for Tokensmith.
//!
//! This module provides a structured error hierarchy with specific error types
//! for each stage of the pipeline. All errors are designed to be:
//!
//! - **Serializable** for HTTP responses via serde
//! - **Displayable** for logging via Display trait
//! - **Reportable** as a user-facing title / detail / remedy triple

mod config;
mod generation;
mod sync;

pub use config::ConfigError;
pub use generation::GenerationError;
pub use sync::SyncError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Wraps a generator resolution or execution error
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Wraps a release fetch or sync error
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;

/// User-facing rendering of a classified error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorReport {
    pub title: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedy: Option<String>,
}

impl ErrorReport {
    fn new(title: &str, detail: String, remedy: Option<&str>) -> Self {
        Self { title: title.to_string(), detail, remedy: remedy.map(str::to_string) }
    }
}

impl TypedError {
    pub fn report(&self) -> ErrorReport {
        match self {
            Self::Config(e) => config_report(e),
            Self::Generation(e) => generation_report(e),
            Self::Sync(e) => sync_report(e),
        }
    }
}

fn config_report(e: &ConfigError) -> ErrorReport {
    match e {
        ConfigError::NotFound { path } => ErrorReport::new(
            "Configuration not found",
            format!("No configuration file at {path}"),
            Some("Create the file or pass --config with the correct path."),
        ),
        ConfigError::Invalid { path, message } => ErrorReport::new(
            "Configuration invalid",
            format!("{path}: {message}"),
            Some("Fix the reported field and re-run."),
        ),
    }
}

fn generation_report(e: &GenerationError) -> ErrorReport {
    match e {
        GenerationError::UnknownBuiltinGenerator { name } => ErrorReport::new(
            "Unknown generator",
            format!("'{name}' is enabled but has no built-in implementation"),
            Some("Use one of: css, scss, tailwind, figma, or point the entry at a plugin path."),
        ),
        GenerationError::PluginLoad { name, path, message } => ErrorReport::new(
            "Plugin failed to load",
            format!("Generator '{name}' ({path}): {message}"),
            Some("Check the plugin path is relative to the config file and is executable."),
        ),
        GenerationError::GenerationFailed { generator, message } => ErrorReport::new(
            "Generation failed",
            format!("Generator '{generator}' failed: {message}"),
            None,
        ),
        GenerationError::InvalidTokenTree { message } => {
            ErrorReport::new("Invalid tokens", message.clone(), None)
        },
        GenerationError::Io { message } => {
            ErrorReport::new("Filesystem error", message.clone(), None)
        },
    }
}

fn sync_report(e: &SyncError) -> ErrorReport {
    match e {
        SyncError::ReleaseNotFound { repo, version } => ErrorReport::new(
            "Release not found",
            format!("{repo} has no release tagged {version}"),
            Some("Check the pinned version in tokensmith.sync.json."),
        ),
        SyncError::AuthRequired { resource } => ErrorReport::new(
            "Authorization required",
            format!("The release store refused access to {resource}"),
            Some("Set GITHUB_TOKEN or pass --token."),
        ),
        SyncError::AssetNotFound { asset } => {
            ErrorReport::new("Asset not found", format!("Release has no asset named {asset}"), None)
        },
        SyncError::Upstream { status, message } => ErrorReport::new(
            "Release store error",
            format!("HTTP {status}: {message}"),
            Some("Retry later."),
        ),
        SyncError::Network { message } => ErrorReport::new(
            "Network error",
            message.clone(),
            Some("Check connectivity to the release store."),
        ),
        SyncError::CacheIo { path, message } => ErrorReport::new(
            "Sync cache unreadable",
            format!("{path}: {message}"),
            Some("Delete the cache file and run with --force."),
        ),
        SyncError::Io { path, message } => {
            ErrorReport::new("Write failed", format!("{path}: {message}"), None)
        },
    }
}

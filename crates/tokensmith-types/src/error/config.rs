//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading producer or consumer configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Config file not found at expected path
    #[error("Config not found: {path}")]
    NotFound {
        /// Filesystem path where config was expected
        path: String,
    },

    /// Config file failed to parse or violates a structural rule
    #[error("Invalid config {path}: {message}")]
    Invalid {
        /// Filesystem path of the offending config
        path: String,
        /// Description of the failure
        message: String,
    },
}

impl ConfigError {
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound { path: path.display().to_string() }
    }

    pub fn invalid(path: &Path, message: impl Into<String>) -> Self {
        Self::Invalid { path: path.display().to_string(), message: message.into() }
    }

    /// Create an invalid-config error from a serde_json error.
    pub fn from_json_error(path: &Path, e: &serde_json::Error) -> Self {
        Self::invalid(path, e.to_string())
    }
}

//! Generator resolution and execution errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum GenerationError {
    /// Config enables a generator by name that has no built-in implementation
    #[error("Unknown built-in generator: {name}")]
    UnknownBuiltinGenerator { name: String },

    /// A plugin reference could not be turned into a runnable generator
    #[error("Failed to load plugin generator '{name}' from {path}: {message}")]
    PluginLoad { name: String, path: String, message: String },

    /// A generator failed mid-run; remaining generators were not started
    #[error("Generator '{generator}' failed: {message}")]
    GenerationFailed { generator: String, message: String },

    /// Token payload or token directory is malformed
    #[error("Invalid token tree: {message}")]
    InvalidTokenTree { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl GenerationError {
    pub fn failed(generator: impl Into<String>, message: impl ToString) -> Self {
        Self::GenerationFailed { generator: generator.into(), message: message.to_string() }
    }

    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTokenTree { message: message.into() }
    }

    pub fn from_io_error(e: &std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

//! Generation results exchanged with the on-demand preview path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Artifact name (path relative to the output dir, forward slashes) -> content.
pub type Artifacts = BTreeMap<String, String>;

/// Outcome of one generation request.
///
/// A failed result may still carry artifacts: those are the last known-good
/// output, so callers always have something to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GenerationResult {
    pub success: bool,
    pub artifacts: Artifacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(artifacts: Artifacts) -> Self {
        Self { success: true, artifacts, error: None }
    }

    /// Failure carrying `fallback` artifacts, if any.
    pub fn failed(message: impl Into<String>, fallback: Option<&Artifacts>) -> Self {
        Self { success: false, artifacts: fallback.cloned().unwrap_or_default(), error: Some(message.into()) }
    }

    pub fn artifact(&self, name: &str) -> Option<&str> {
        self.artifacts.get(name).map(String::as_str)
    }
}

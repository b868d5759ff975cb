//! Consumer configuration (`tokensmith.sync.json`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A consumer project's pin on a published release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ConsumerConfig {
    /// Release store repository, `owner/name`
    #[validate(custom(function = "validate_repo"))]
    pub repo: String,
    /// Pinned release tag
    #[validate(custom(function = "validate_version"))]
    pub version: String,
    /// Asset name -> local output path (relative to the project root), in file order
    #[validate(custom(function = "validate_files"))]
    pub files: IndexMap<String, String>,
    /// Shell command to run after a successful sync
    #[serde(default, rename = "postSync", skip_serializing_if = "Option::is_none")]
    pub post_sync: Option<String>,
}

fn validate_repo(repo: &str) -> Result<(), ValidationError> {
    let mut parts = repo.split('/');
    let well_formed = match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) => is_repo_segment(owner) && is_repo_segment(name),
        _ => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("repo").with_message("repo must have the shape owner/name".into()))
    }
}

fn is_repo_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn validate_version(version: &str) -> Result<(), ValidationError> {
    if version.trim().is_empty() {
        return Err(ValidationError::new("version").with_message("version must not be empty".into()));
    }
    // Used verbatim as a release tag and as the cache marker
    if version.trim() != version {
        return Err(ValidationError::new("version")
            .with_message("version must not have surrounding whitespace".into()));
    }
    Ok(())
}

fn validate_files(files: &IndexMap<String, String>) -> Result<(), ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::new("files").with_message("files must not be empty".into()));
    }
    if files.iter().any(|(asset, path)| asset.trim().is_empty() || path.trim().is_empty()) {
        return Err(ValidationError::new("files")
            .with_message("asset names and output paths must not be empty".into()));
    }
    Ok(())
}

//! Token trees: relative `.json` path -> parsed token document.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use tokensmith_types::GenerationError;

use crate::utils::fs::{relative_key, walk_files, write_creating_parents};

/// Parsed token sources keyed by forward-slash relative path.
///
/// Keys are unique, end in `.json` and never escape the token root.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenTree {
    files: BTreeMap<String, Value>,
}

impl TokenTree {
    /// Build a tree from a caller-supplied payload, validating every path.
    pub fn from_files(files: BTreeMap<String, Value>) -> Result<Self, GenerationError> {
        for path in files.keys() {
            check_relative_path(path).map_err(GenerationError::invalid_tree)?;
        }
        Ok(Self { files })
    }

    /// Load every `*.json` file below `root`.
    pub async fn read_dir(root: &Path) -> Result<Self, GenerationError> {
        if !tokio::fs::try_exists(root).await.unwrap_or(false) {
            return Err(GenerationError::invalid_tree(format!(
                "token directory {} does not exist",
                root.display()
            )));
        }

        let paths = walk_files(root).await.map_err(|e| GenerationError::from_io_error(&e))?;
        let mut files = BTreeMap::new();
        for path in paths {
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(key) = relative_key(root, &path) else {
                continue;
            };
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| GenerationError::from_io_error(&e))?;
            let value: Value = serde_json::from_str(&raw)
                .map_err(|e| GenerationError::invalid_tree(format!("{key}: {e}")))?;
            files.insert(key, value);
        }

        tracing::debug!(root = %root.display(), files = files.len(), "Loaded token tree");
        Ok(Self { files })
    }

    /// Write the tree back out below `dir`.
    pub async fn materialize(&self, dir: &Path) -> Result<(), GenerationError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| GenerationError::from_io_error(&e))?;
        for (key, value) in &self.files {
            let content = serde_json::to_vec_pretty(value)
                .map_err(|e| GenerationError::invalid_tree(format!("{key}: {e}")))?;
            write_creating_parents(&dir.join(key), content)
                .await
                .map_err(|e| GenerationError::from_io_error(&e))?;
        }
        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn check_relative_path(path: &str) -> Result<(), String> {
    if !path.ends_with(".json") {
        return Err(format!("'{path}' is not a .json file"));
    }
    if path.starts_with('/') || path.contains('\\') || path.contains(':') {
        return Err(format!("'{path}' must be a relative forward-slash path"));
    }
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(format!("'{path}' escapes the token root or has empty segments"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn payload(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_from_files_accepts_nested_paths() {
        let tree = TokenTree::from_files(payload(&[
            ("colors.json", json!({})),
            ("themes/dark.json", json!({})),
        ]))
        .unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_from_files_rejects_escaping_paths() {
        for bad in ["../colors.json", "a/../../b.json", "/abs.json", "a//b.json", "notes.txt", "C:x.json"] {
            let err = TokenTree::from_files(payload(&[(bad, json!({}))])).unwrap_err();
            assert!(
                matches!(err, GenerationError::InvalidTokenTree { .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_materialize_then_read_dir_preserves_tree() {
        let tmp = TempDir::new().unwrap();
        let tree = TokenTree::from_files(payload(&[
            ("colors.json", json!({"color": {"primary": {"$value": "#fff"}}})),
            ("themes/dark.json", json!({"color": {"primary": {"$value": "#000"}}})),
        ]))
        .unwrap();

        tree.materialize(tmp.path()).await.unwrap();
        tokio::fs::write(tmp.path().join("README.md"), "ignored").await.unwrap();

        let loaded = TokenTree::read_dir(tmp.path()).await.unwrap();
        assert_eq!(loaded, tree);
    }

    #[tokio::test]
    async fn test_read_dir_reports_bad_json_with_path() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("broken.json"), "{ nope").await.unwrap();

        let err = TokenTree::read_dir(tmp.path()).await.unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn test_read_dir_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = TokenTree::read_dir(&tmp.path().join("tokens")).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}

use std::io;
use std::path::{Component, Path, PathBuf};

/// Collect every regular file under `root`, sorted by path.
///
/// Entries whose name starts with `.` are skipped. A missing root yields an
/// empty list.
pub async fn walk_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound && dir == root => return Ok(files),
            Err(e) => return Err(e),
        };
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(entry.path());
            } else if file_type.is_file() {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Forward-slash path of `path` relative to `root`.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            _ => return None,
        }
    }
    Some(segments.join("/"))
}

/// Write `content` to `path`, creating parent directories first.
pub async fn write_creating_parents(path: &Path, content: impl AsRef<[u8]>) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}

/// Atomic write: temp file in the same directory, then rename.
pub async fn write_atomic(path: &Path, content: impl AsRef<[u8]>) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let temp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    write_creating_parents(&temp_path, content).await?;
    tokio::fs::rename(&temp_path, path).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_walk_files_sorted_and_skips_hidden() {
        let tmp = TempDir::new().unwrap();
        write_creating_parents(&tmp.path().join("b/z.json"), "{}").await.unwrap();
        write_creating_parents(&tmp.path().join("a.json"), "{}").await.unwrap();
        write_creating_parents(&tmp.path().join(".git/HEAD"), "x").await.unwrap();

        let files = walk_files(tmp.path()).await.unwrap();
        let keys: Vec<String> =
            files.iter().map(|p| relative_key(tmp.path(), p).unwrap()).collect();
        assert_eq!(keys, vec!["a.json", "b/z.json"]);
    }

    #[tokio::test]
    async fn test_walk_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let files = walk_files(&tmp.path().join("nope")).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache/version");
        write_atomic(&path, "v1").await.unwrap();
        write_atomic(&path, "v2").await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "v2");
        assert!(!tmp.path().join("cache/version.tmp").exists());
    }
}

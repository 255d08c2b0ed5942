//! Filesystem helpers for task bodies
//!
//! Small conveniences tasks reach for constantly: copy a file into place,
//! make a directory tree, remove build output. All async, all returning the
//! engine's error type with the offending path attached.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::error::{ChoreResult, TaskError};

/// Copy `src` to `dst`, creating `dst`'s parent directories as needed.
pub async fn copy(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> ChoreResult<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| TaskError::io(parent, source))?;
    }
    fs::copy(src, dst)
        .await
        .map_err(|source| TaskError::io(src, source))?;
    debug!(src = %src.display(), dst = %dst.display(), "copied file");
    Ok(())
}

/// Create `path` and any missing parent directories. An already existing
/// directory is a success.
pub async fn mkdir(path: impl AsRef<Path>) -> ChoreResult<()> {
    let path = path.as_ref();
    fs::create_dir_all(path)
        .await
        .map_err(|source| TaskError::io(path, source))
}

/// Remove `path` recursively, whether it is a file or a directory tree.
/// A path that does not exist is a success.
pub async fn rm(path: impl AsRef<Path>) -> ChoreResult<()> {
    let path = path.as_ref();
    let meta = match fs::metadata(path).await {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(source) => return Err(TaskError::io(path, source)),
    };
    let result = if meta.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };
    result.map_err(|source| TaskError::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("input.txt");
        let dst = dir.path().join("deeply/nested/output.txt");
        fs::write(&src, b"payload").await.unwrap();

        copy(&src, &dst).await.unwrap();
        assert_eq!(fs::read(&dst).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_copy_missing_source_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("absent.txt");
        let err = copy(&src, dir.path().join("out.txt")).await.unwrap_err();
        match err {
            TaskError::Io { path, .. } => assert_eq!(path, src),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mkdir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c");
        mkdir(&path).await.unwrap();
        mkdir(&path).await.unwrap();
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn test_rm_handles_files_directories_and_absence() {
        let dir = tempfile::tempdir().unwrap();

        let file = dir.path().join("file.txt");
        fs::write(&file, b"x").await.unwrap();
        rm(&file).await.unwrap();
        assert!(!file.exists());

        let tree = dir.path().join("tree/sub");
        mkdir(&tree).await.unwrap();
        rm(dir.path().join("tree")).await.unwrap();
        assert!(!dir.path().join("tree").exists());

        // Removing something that is not there is fine.
        rm(dir.path().join("never-existed")).await.unwrap();
    }
}

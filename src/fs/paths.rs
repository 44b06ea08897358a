//! Path and directory management.
//!
//! Layout: `<root>/<album_id>/<item_id>.jpg`.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension given to every downloaded item.
pub const ITEM_EXTENSION: &str = "jpg";

/// Validate an id before it is used as a path component.
///
/// Returns an error if the id is empty or could escape its parent directory.
pub fn sanitize_path_component(id: &str) -> Result<&str> {
    if id.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    if id.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            id
        )));
    }

    if id.contains('/') || id.contains('\\') || id.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in id: '{}'",
            id
        )));
    }

    Ok(id)
}

/// Directory holding the items of an album.
pub fn album_dir(root: &Path, album_id: &str) -> Result<PathBuf> {
    Ok(root.join(sanitize_path_component(album_id)?))
}

/// Destination file of an item.
pub fn item_path(root: &Path, album_id: &str, item_id: &str) -> Result<PathBuf> {
    let file_name = format!("{}.{}", sanitize_path_component(item_id)?, ITEM_EXTENSION);
    Ok(album_dir(root, album_id)?.join(file_name))
}

/// Create the backup root and the album directory if they do not exist yet.
///
/// Safe to call concurrently from many item tasks of the same album.
pub async fn ensure_album_directory(root: &Path, album_id: &str) -> Result<PathBuf> {
    let dir = album_dir(root, album_id)?;

    match tokio::fs::create_dir_all(&dir).await {
        Ok(()) => Ok(dir),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(dir),
        Err(e) => {
            tracing::warn!("Error creating album directory {}: {}", dir.display(), e);
            Err(Error::filesystem(dir, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_item_path_layout() {
        let path = item_path(Path::new("/backup"), "72157", "5301").unwrap();
        assert_eq!(path, PathBuf::from("/backup/72157/5301.jpg"));
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(album_dir(Path::new("/backup"), "../etc").is_err());
        assert!(item_path(Path::new("/backup"), "a", "x/y").is_err());
        assert!(item_path(Path::new("/backup"), "a", "").is_err());
    }

    #[tokio::test]
    async fn test_ensure_album_directory_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("backup");

        let first = ensure_album_directory(&root, "A1").await.unwrap();
        let second = ensure_album_directory(&root, "A1").await.unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_album_directory_concurrently() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let root = root.clone();
                tokio::spawn(async move { ensure_album_directory(&root, "A1").await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
    }

    #[tokio::test]
    async fn test_ensure_album_directory_fails_under_a_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("not-a-dir");
        std::fs::write(&root, b"x").unwrap();

        let err = ensure_album_directory(&root, "A1").await.unwrap_err();
        assert!(err.is_filesystem());
    }
}

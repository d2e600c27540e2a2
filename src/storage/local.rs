//! Local filesystem storage implementation.
//!
//! Each key is a file path relative to the root directory. Writes go to a
//! temporary file first and are renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::DocumentStore;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for LocalStorage {
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        self.path(key).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::models::{Category, CategoryIndex};
    use crate::storage::{read_json, write_json};

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        assert!(storage.read_bytes("nope.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_json_roundtrip_keeps_bucket_order() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let mut index = CategoryIndex::default();
        index.push(Category::Time, "60", "B");
        index.push(Category::Time, "15", "A");
        write_json(&storage, "nested/recipes.json", &index).await.unwrap();

        assert!(dir.path().join("nested/recipes.json").exists());
        assert!(!dir.path().join("nested/recipes.tmp").exists());

        let loaded: CategoryIndex = read_json(&storage, "nested/recipes.json")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, index);
        let keys: Vec<_> = loaded.time.keys().cloned().collect();
        assert_eq!(keys, vec!["60", "15"]);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), b"{ not json").unwrap();
        let storage = LocalStorage::new(dir.path());

        let result: Result<Option<CategoryIndex>> = read_json(&storage, "bad.json").await;
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}

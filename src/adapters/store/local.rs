use crate::domain::ports::{KeyValueStore, Provider};
use crate::utils::error::{CapError, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem store keeping one file per key under a base directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base_path: String,
}

impl LocalStore {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Keys become file names directly, so path separators and traversal
    /// segments are rejected rather than escaped.
    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key == "." || key == ".." {
            return Err(CapError::InvalidConfigValue {
                field: "key".to_string(),
                value: key.to_string(),
                reason: "Store keys must be plain file names".to_string(),
            });
        }
        Ok(Path::new(&self.base_path).join(key))
    }
}

#[async_trait]
impl Provider for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn connect(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for LocalStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.entry_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, value)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        match fs::read_dir(&self.base_path) {
            Ok(entries) => {
                for entry in entries {
                    let entry = entry?;
                    if entry.file_type()?.is_file() {
                        if let Some(name) = entry.file_name().to_str() {
                            keys.push(name.to_string());
                        }
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> LocalStore {
        LocalStore::new(dir.path().to_str().unwrap())
    }

    #[tokio::test]
    async fn test_roundtrip_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.connect().await.unwrap();

        store.put("order-1", b"{\"id\":1}").await.unwrap();
        assert_eq!(
            store.get("order-1").await.unwrap(),
            Some(b"{\"id\":1}".to_vec())
        );
        assert!(dir.path().join("order-1").exists());
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_path_traversal_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.put("../escape", b"x").await.is_err());
        assert!(store.put("a/b", b"x").await.is_err());
        assert!(store.get("..").await.is_err());
    }

    #[tokio::test]
    async fn test_keys_lists_files() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.connect().await.unwrap();

        store.put("b", b"2").await.unwrap();
        store.put("a", b"1").await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_keys_on_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("never-created").to_str().unwrap());

        assert!(store.keys().await.unwrap().is_empty());
    }
}

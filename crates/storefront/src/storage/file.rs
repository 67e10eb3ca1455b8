//! Directory-backed storage.
//!
//! Each key lives in `<root>/<key>.json`. Writes go to a temporary sibling
//! file first and are renamed into place, so a crash mid-write leaves the
//! previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, validate_key};

/// Store rooted at a profile directory. The directory is created on first
/// write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The profile directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| io_error(&self.root, e))?;

        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("profile"));
        assert_eq!(store.get("cartItems").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("profile");
        let mut store = FileStore::new(&root);

        store.set("cartItems", "[1]").unwrap();
        assert_eq!(
            fs::read_to_string(root.join("cartItems.json")).unwrap(),
            "[1]"
        );
        assert!(!root.join(".cartItems.json.tmp").exists());
    }

    #[test]
    fn test_overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("user", "a").unwrap();
        store.set("user", "b").unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("b"));

        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
        assert!(!dir.path().join("user.json").exists());
        store.remove("user").unwrap();
    }

    #[test]
    fn test_two_handles_share_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = FileStore::new(dir.path());
        let reader = writer.clone();
        writer.set("orders", "[]").unwrap();
        assert_eq!(reader.get("orders").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}

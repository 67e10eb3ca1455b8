//! In-memory storage backend.

use std::collections::HashMap;

use super::{KeyValueStore, StorageError, validate_key};

/// `HashMap` backed store. Contents are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("cartItems").unwrap(), None);

        store.set("cartItems", "[]").unwrap();
        assert_eq!(store.get("cartItems").unwrap().as_deref(), Some("[]"));

        store.remove("cartItems").unwrap();
        assert!(!store.contains("cartItems"));
        store.remove("cartItems").unwrap();
    }

    #[test]
    fn test_invalid_key() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.set("no/slash", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}

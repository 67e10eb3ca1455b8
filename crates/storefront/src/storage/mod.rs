//! Persisted key-value storage.
//!
//! A synchronous get/set/remove-by-key facility scoped to one shopper
//! profile. Values are serialized JSON documents stored under fixed keys
//! (see [`keys`]).
//!
//! # Backends
//!
//! - [`MemoryStore`] - `HashMap` backed, for tests and embedding
//! - [`FileStore`] - one file per key under a profile directory

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Keys are restricted to ASCII letters, digits, `_` and `-`.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Filesystem operation failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Synchronous key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Fixed storage keys.
pub mod keys {
    /// Serialized cart lines.
    pub const CART_ITEMS: &str = "cartItems";

    /// The signed-in shopper.
    pub const CURRENT_USER: &str = "user";

    /// Placed orders.
    pub const ORDERS: &str = "orders";

    /// Accounts created or edited locally, layered over the store data.
    pub const USERS: &str = "users";

    /// Saved-for-later products of every shopper.
    pub const WISHLIST: &str = "wishlist";
}

/// Check that `key` is usable by every backend.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key(keys::CART_ITEMS).is_ok());
        assert!(validate_key("order-history_2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a b").is_err());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn put(mut store: impl KeyValueStore) {
            assert!(store.set("k", "v").is_ok());
        }

        let mut store = MemoryStore::new();
        put(&mut store);
        assert_eq!(store.get("k").ok().flatten().as_deref(), Some("v"));
    }
}

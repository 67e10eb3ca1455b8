//! Read-only store data: products, accounts and saved addresses.
//!
//! Loaded from one JSON document shaped like the mock REST backend's
//! database:
//!
//! ```json
//! {
//!   "products":  [{"id": 1, "name": "...", "price": 1299, ...}],
//!   "users":     [{"id": 1, "name": "...", "email": "..."}],
//!   "addresses": [{"id": 1, "userId": 1, "fullName": "...", ...}]
//! }
//! ```
//!
//! Missing collections are treated as empty.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use storecart_core::{Email, Product, ProductId, UserId};

use crate::models::{Address, User};

/// Errors loading store data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid store data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog, accounts and addresses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl StoreData {
    /// Load store data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the file cannot be read or any record fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            products = data.products.len(),
            users = data.users.len(),
            "Loaded store data"
        );
        Ok(data)
    }

    /// Parse store data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Parse` if the document is malformed.
    pub fn from_json_str(raw: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn user_by_email(&self, email: &Email) -> Option<&User> {
        self.users.iter().find(|u| &u.email == email)
    }

    /// Saved addresses of one shopper, in stored order.
    #[must_use]
    pub fn addresses_for(&self, user_id: UserId) -> Vec<&Address> {
        self.addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{
        "products": [
            {"id": 1, "name": "Rockerz 450", "price": 1499, "brand": "boAt"},
            {"id": "z40", "name": "Z40", "price": "999", "brand": "Boult"}
        ],
        "users": [{"id": 1, "name": "Asha", "email": "asha@shop.in"}],
        "addresses": [
            {"id": 1, "userId": 1, "fullName": "Asha Rao", "phone": "98", "address": "12 MG Road",
             "city": "Bengaluru", "state": "KA", "pincode": "560038"},
            {"id": 2, "userId": 2, "fullName": "Ravi", "phone": "97", "address": "4 Park St",
             "city": "Kolkata", "state": "WB", "pincode": "700016"}
        ]
    }"#;

    #[test]
    fn test_lookups() {
        let data = StoreData::from_json_str(SAMPLE).unwrap();
        assert_eq!(
            data.product(&ProductId::parse("z40").unwrap()).unwrap().name,
            "Z40"
        );
        assert!(data.product(&ProductId::parse("2").unwrap()).is_none());
        assert_eq!(
            data.user_by_email(&Email::parse("asha@shop.in").unwrap())
                .unwrap()
                .id,
            UserId::new(1)
        );
        assert_eq!(data.addresses_for(UserId::new(1)).len(), 1);
    }

    #[test]
    fn test_missing_collections_default() {
        let data = StoreData::from_json_str("{}").unwrap();
        assert!(data.products.is_empty());
        assert!(data.users.is_empty());
    }

    #[test]
    fn test_invalid_product_rejected() {
        assert!(matches!(
            StoreData::from_json_str(r#"{"products": [{"id": 1, "name": "x", "price": -1}]}"#),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let data = StoreData::load(file.path()).unwrap();
        assert_eq!(data.products.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            StoreData::load(&dir.path().join("db.json")),
            Err(DataError::Io { .. })
        ));
    }
}

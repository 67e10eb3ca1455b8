//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STORECART_DATA_DIR` - Profile directory for persisted state (default: `.storecart`)
//! - `STORECART_CATALOG` - Store data JSON file (default: `db.json`)
//! - `STORECART_CURRENCY` - Display currency code (default: `INR`)

use std::path::PathBuf;

use storecart_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".storecart";
const DEFAULT_CATALOG: &str = "db.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart, session user and orders
    pub data_dir: PathBuf,
    /// Store data file (products, users, addresses)
    pub catalog_path: PathBuf,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            currency: CurrencyCode::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get("STORECART_DATA_DIR").map_or_else(
            || PathBuf::from(DEFAULT_DATA_DIR),
            PathBuf::from,
        );
        let catalog_path = get("STORECART_CATALOG")
            .map_or_else(|| PathBuf::from(DEFAULT_CATALOG), PathBuf::from);
        let currency = match get("STORECART_CURRENCY") {
            Some(value) => value.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("STORECART_CURRENCY".to_string(), e)
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            data_dir,
            catalog_path,
            currency,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STORECART_DATA_DIR", "/tmp/profile"),
            ("STORECART_CATALOG", "fixtures/db.json"),
            ("STORECART_CURRENCY", "usd"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/profile"));
        assert_eq!(config.catalog_path, PathBuf::from("fixtures/db.json"));
        assert_eq!(config.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("STORECART_DATA_DIR", "  ")])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_invalid_currency() {
        let result = StorefrontConfig::from_lookup(lookup(&[("STORECART_CURRENCY", "DOGE")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "STORECART_CURRENCY"));
    }
}

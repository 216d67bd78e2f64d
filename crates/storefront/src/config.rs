//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DERMASHOP_DATA_DIR` - Directory holding the storage slots (default: .dermashop)
//! - `DERMASHOP_CART_KEY` - Storage slot name for the cart (default: cart)
//! - `DERMASHOP_CATALOG` - Catalog file (.json/.yaml); the bundled catalog is used if unset
//! - `DERMASHOP_CURRENCY` - ISO 4217 display currency (default: INR)
//! - `DERMASHOP_STORAGE_QUOTA` - Maximum bytes per stored value

use std::path::PathBuf;

use thiserror::Error;

use dermashop_core::CurrencyCode;

use crate::storage::{DEFAULT_CART_KEY, validate_key};

const DEFAULT_DATA_DIR: &str = ".dermashop";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for file-backed storage slots
    pub data_dir: PathBuf,
    /// Storage slot holding the serialized cart
    pub cart_key: String,
    /// Catalog file, `None` for the bundled catalog
    pub catalog_path: Option<PathBuf>,
    /// Display currency
    pub currency: CurrencyCode,
    /// Maximum bytes per stored value, `None` for unlimited
    pub storage_quota: Option<usize>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            catalog_path: None,
            currency: CurrencyCode::default(),
            storage_quota: None,
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

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("DERMASHOP_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let cart_key =
            lookup("DERMASHOP_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("DERMASHOP_CART_KEY".to_string(), e.to_string())
        })?;

        let catalog_path = lookup("DERMASHOP_CATALOG").map(PathBuf::from);

        let currency = match lookup("DERMASHOP_CURRENCY") {
            Some(code) => CurrencyCode::parse(&code).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "DERMASHOP_CURRENCY".to_string(),
                    format!("unsupported currency '{code}'"),
                )
            })?,
            None => CurrencyCode::default(),
        };

        let storage_quota = lookup("DERMASHOP_STORAGE_QUOTA")
            .map(|value| {
                value.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("DERMASHOP_STORAGE_QUOTA".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            data_dir,
            cart_key,
            catalog_path,
            currency,
            storage_quota,
        })
    }
}

//! Durable key-value slots for client-side state.
//!
//! The cart is serialized wholesale into a single named slot. Two backends are
//! provided:
//!
//! - [`MemoryStorage`] - shared in-memory map with an optional per-value quota,
//!   the stand-in for browser local storage
//! - [`FileStorage`] - one JSON file per key under a data directory
//!
//! All operations are synchronous and block the caller.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Default slot name for the serialized cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem operation failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The value does not fit within the configured quota.
    #[error("storage quota exceeded for key '{key}': {size} bytes exceeds limit of {limit}")]
    QuotaExceeded {
        key: String,
        limit: usize,
        size: usize,
    },

    /// The key is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A durable string slot store addressed by key.
///
/// Implementations must make `write` replace the whole value for the key, and
/// `remove` must succeed even if the key does not exist.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backend fails.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid, the value exceeds a
    /// quota, or the backend fails.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Check that a key is usable as a slot name on every backend.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for empty keys or keys with characters
/// other than ASCII alphanumerics, `-` and `_`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Reject values larger than `quota` bytes.
fn check_quota(key: &str, value: &str, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(limit) if value.len() > limit => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            limit,
            size: value.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("cart_v2-guest").is_ok());
        assert!(matches!(validate_key(""), Err(StorageError::InvalidKey(_))));
        assert!(validate_key("../cart").is_err());
        assert!(validate_key("cart.json").is_err());
        assert!(validate_key("my cart").is_err());
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::QuotaExceeded {
            key: "cart".to_string(),
            limit: 10,
            size: 42,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded for key 'cart': 42 bytes exceeds limit of 10"
        );
    }
}

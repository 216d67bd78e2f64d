//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{CartStorage, StorageError, check_quota, validate_key};

/// Shared in-memory slot store.
///
/// Cloning yields another handle onto the same map, so a store reopened over a
/// clone observes everything written through the original (a page reload over
/// the same browser profile).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects values larger than `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            inner: Arc::default(),
            quota: Some(limit),
        }
    }

    /// Another handle onto the same map with a different quota.
    #[must_use]
    pub fn quota_handle(&self, quota: Option<usize>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            quota,
        }
    }

    /// Store a raw value, bypassing the quota. Useful to seed corrupt state.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.slots().insert(key.into(), value.into());
    }

    /// Peek at a stored value without going through the trait.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.slots().get(key).cloned()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    /// Whether no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // The map holds plain strings, so a panicked writer cannot leave it half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.get_raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        check_quota(key, value, self.quota)?;
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots().remove(key);
        Ok(())
    }
}

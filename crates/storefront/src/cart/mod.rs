//! Shopping cart state.
//!
//! The cart is a sequence of [`CartLine`]s owned by a [`CartStore`]. Views hold
//! the store by reference and go through its operations for every change;
//! each operation persists the full cart to its storage slot before returning.
//!
//! # Identity
//!
//! A line is identified by `(product id, variant)`. Adding an existing
//! identity accumulates its quantity instead of creating a second line.

mod line;
mod store;

pub use line::{CartLine, LineKey};
pub use store::CartStore;

use dermashop_core::QuantityError;
use thiserror::Error;

use crate::storage::StorageError;

/// Reasons a requested change is rejected before anything is modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartValidationError {
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// The line or cart total would not fit in a decimal amount.
    #[error("cart total would exceed the largest representable amount")]
    TotalOverflow,
}

/// Errors returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested change was rejected. Nothing changed.
    #[error("Validation error: {0}")]
    Validation(#[from] CartValidationError),

    /// The cart changed in memory but could not be written to storage.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart changed in memory but could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<QuantityError> for CartError {
    fn from(e: QuantityError) -> Self {
        Self::Validation(e.into())
    }
}

impl CartError {
    /// Whether the in-memory cart reflects the requested change despite the
    /// error. True for persistence failures, false for rejected input.
    #[must_use]
    pub const fn mutation_applied(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Serialize(_))
    }
}

//! Cart line quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The requested quantity is zero or negative.
    #[error("quantity must be a positive integer (got {0})")]
    NotPositive(i64),
    /// The requested quantity is larger than a cart line can hold.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
    },
}

/// A positive item count on a cart line.
///
/// ## Constraints
///
/// - Always at least 1
/// - At most `u32::MAX`
///
/// ## Examples
///
/// ```
/// use dermashop_core::Quantity;
///
/// assert_eq!(Quantity::parse(3).map(Quantity::get), Ok(3));
/// assert!(Quantity::parse(0).is_err());
/// assert!(Quantity::parse(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single item.
    pub const ONE: Self = Self(1);

    /// Parse a `Quantity` from a signed integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or exceeds `u32::MAX`.
    pub fn parse(value: i64) -> Result<Self, QuantityError> {
        if value <= 0 {
            return Err(QuantityError::NotPositive(value));
        }

        u32::try_from(value)
            .map(Self)
            .map_err(|_| QuantityError::TooLarge { max: u32::MAX })
    }

    /// Returns the count as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add two quantities.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::TooLarge`] if the sum overflows.
    pub fn checked_add(self, other: Self) -> Result<Self, QuantityError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(QuantityError::TooLarge { max: u32::MAX })
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl From<Quantity> for i64 {
    fn from(quantity: Quantity) -> Self {
        Self::from(quantity.0)
    }
}

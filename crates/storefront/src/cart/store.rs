//! The cart store: owned cart state with write-through persistence.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use dermashop_core::{Product, Quantity};

use super::line::{CartLine, checked_total};
use super::{CartError, CartValidationError};
use crate::storage::{CartStorage, DEFAULT_CART_KEY};

/// Serialized form of an empty cart.
const EMPTY_CART: &str = "[]";

/// Reasons a stored cart payload is discarded on open.
#[derive(Debug, Error)]
enum CorruptCart {
    #[error("payload is not a cart line sequence: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("duplicate line for product {product_id} (variant {variant:?})")]
    DuplicateLine {
        product_id: String,
        variant: Option<String>,
    },
    #[error("cart total overflows")]
    TotalOverflow,
}

/// Owner of the in-progress order.
///
/// Every mutating operation changes the in-memory line sequence first and then
/// writes the whole sequence to the storage slot before returning. If the
/// write fails the mutation stands and the error is returned, so callers can
/// tell the user their cart may not survive a reload.
///
/// Lines keep insertion order. No two lines share a `(product id, variant)`
/// identity, every quantity is at least one, and the cart total fits in a
/// [`Decimal`].
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    lines: Vec<CartLine>,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart stored under [`DEFAULT_CART_KEY`].
    #[must_use]
    pub fn open_default(storage: S) -> Self {
        Self::open(storage, DEFAULT_CART_KEY)
    }

    /// Open the cart stored under `key`.
    ///
    /// Never fails. A missing slot yields an empty cart. A slot that cannot be
    /// decoded is logged, reset to an empty cart value and ignored. A read
    /// error is logged and treated like a missing slot.
    #[instrument(skip(storage, key), fields(key = tracing::field::Empty))]
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        tracing::Span::current().record("key", key.as_str());

        let lines = match storage.read(&key) {
            Ok(Some(raw)) => match decode_lines(&raw) {
                Ok(lines) => {
                    tracing::debug!(lines = lines.len(), "Restored cart from storage");
                    lines
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding corrupt cart in storage");
                    if let Err(e) = storage.write(&key, EMPTY_CART) {
                        tracing::error!(error = %e, "Failed to reset corrupt cart slot");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from storage, starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            key,
            lines,
        }
    }

    /// Add `quantity` of `product` with the given variant.
    ///
    /// If a line with the same identity exists its quantity is increased by
    /// `quantity`; otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`] if `quantity` is not positive, or the summed
    ///   quantity or the cart total overflows. The cart is left untouched.
    /// - [`CartError::Storage`] / [`CartError::Serialize`] if persisting fails.
    ///   The line has been added in memory.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        variant: Option<&str>,
    ) -> Result<(), CartError> {
        let quantity = Quantity::parse(quantity)?;
        let (price, new_quantity) = match self.line(product.id.as_str(), variant) {
            Some(line) => (line.product.price, line.quantity.checked_add(quantity)?),
            None => (product.price, quantity),
        };
        self.check_total_with(product.id.as_str(), variant, price, new_quantity)?;

        if let Some(line) = self.line_mut(product.id.as_str(), variant) {
            line.quantity = new_quantity;
            tracing::debug!(quantity = %line.quantity, "Increased line quantity");
        } else {
            self.lines.push(CartLine::new(
                product.clone(),
                quantity,
                variant.map(str::to_owned),
            ));
            tracing::debug!(%quantity, "Appended cart line");
        }

        self.persist()
    }

    /// Add a single unit of `product` without a variant.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`].
    pub fn add_product(&mut self, product: &Product) -> Result<(), CartError> {
        self.add_item(product, 1, None)
    }

    /// Remove the line with identity `(product_id, variant)`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting fails.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &str, variant: Option<&str>) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(product_id, variant));
        if self.lines.len() < before {
            tracing::debug!("Removed cart line");
        }

        self.persist()
    }

    /// Overwrite the quantity of the line with identity `(product_id, variant)`.
    ///
    /// A quantity of zero or less removes the line. Unknown identities are
    /// ignored whatever the quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`] if `quantity` exceeds the quantity range or
    ///   the cart total would overflow. The cart is left untouched.
    /// - [`CartError::Storage`] / [`CartError::Serialize`] if persisting fails.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        variant: Option<&str>,
    ) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_item(product_id, variant);
        }

        let Some(price) = self.line(product_id, variant).map(|line| line.product.price) else {
            return self.persist();
        };
        let quantity = Quantity::parse(quantity)?;
        self.check_total_with(product_id, variant, price, quantity)?;

        if let Some(line) = self.line_mut(product_id, variant) {
            line.quantity = quantity;
            tracing::debug!(%quantity, "Set line quantity");
        }

        self.persist()
    }

    /// Remove every line. The slot is overwritten with an empty cart, not
    /// deleted.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting fails.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.lines.clear();
        self.persist()
    }

    /// Sum of `price * quantity` over all lines, at full decimal precision.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line with identity `(product_id, variant)`, if any.
    #[must_use]
    pub fn line(&self, product_id: &str, variant: Option<&str>) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.matches(product_id, variant))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The storage slot name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn line_mut(&mut self, product_id: &str, variant: Option<&str>) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.matches(product_id, variant))
    }

    /// Check that the cart total fits once the line `(product_id, variant)`
    /// holds `quantity` units at `price`.
    fn check_total_with(
        &self,
        product_id: &str,
        variant: Option<&str>,
        price: Decimal,
        quantity: Quantity,
    ) -> Result<(), CartValidationError> {
        let others = checked_total(
            self.lines
                .iter()
                .filter(|line| !line.matches(product_id, variant)),
        );
        others
            .zip(price.checked_mul(Decimal::from(quantity.get())))
            .and_then(|(others, line)| others.checked_add(line))
            .map(|_| ())
            .ok_or(CartValidationError::TotalOverflow)
    }

    fn persist(&self) -> Result<(), CartError> {
        let payload = serde_json::to_string(&self.lines)?;
        self.storage.write(&self.key, &payload).map_err(|e| {
            tracing::warn!(key = %self.key, error = %e, "Cart change was not persisted");
            CartError::from(e)
        })
    }
}

/// Decode a stored payload, enforcing the line invariants.
fn decode_lines(raw: &str) -> Result<Vec<CartLine>, CorruptCart> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;

    for (i, line) in lines.iter().enumerate() {
        let duplicate = lines
            .iter()
            .skip(i + 1)
            .any(|other| other.key() == line.key());
        if duplicate {
            return Err(CorruptCart::DuplicateLine {
                product_id: line.product.id.to_string(),
                variant: line.variant.clone(),
            });
        }
    }

    if checked_total(&lines).is_none() {
        return Err(CorruptCart::TotalOverflow);
    }

    Ok(lines)
}

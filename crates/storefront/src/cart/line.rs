//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dermashop_core::{Product, ProductId, Quantity};

/// One entry in the cart: a product snapshot, a count and an optional variant.
///
/// A line is identified by `(product.id, variant)`. `None` is a variant value
/// of its own and never matches `Some(_)`, not even `Some("")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl CartLine {
    /// Create a new line.
    #[must_use]
    pub const fn new(product: Product, quantity: Quantity, variant: Option<String>) -> Self {
        Self {
            product,
            quantity,
            variant,
        }
    }

    /// Whether this line has the identity `(product_id, variant)`.
    #[must_use]
    pub fn matches(&self, product_id: &str, variant: Option<&str>) -> bool {
        self.product.id == product_id && self.variant.as_deref() == variant
    }

    /// The identity pair of this line.
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            product_id: &self.product.id,
            variant: self.variant.as_deref(),
        }
    }

    /// `price * quantity` for this line, saturating at [`Decimal::MAX`].
    ///
    /// Lines held by a [`CartStore`](super::CartStore) never saturate.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }

    /// `price * quantity`, or `None` on overflow.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.product
            .price
            .checked_mul(Decimal::from(self.quantity.get()))
    }
}

/// Sum of line totals, or `None` if any product or the sum overflows.
pub fn checked_total<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Option<Decimal> {
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.checked_line_total()?))
}

/// Borrowed identity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub product_id: &'a ProductId,
    pub variant: Option<&'a str>,
}

impl std::fmt::Display for LineKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.product_id,
            self.variant.unwrap_or("default")
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::test_support::product;

    #[test]
    fn test_matches_distinguishes_missing_variant() {
        let plain = CartLine::new(product("p1", 100), Quantity::ONE, None);
        let empty = CartLine::new(product("p1", 100), Quantity::ONE, Some(String::new()));
        let sized = CartLine::new(product("p1", 100), Quantity::ONE, Some("50ml".into()));

        assert!(plain.matches("p1", None));
        assert!(!plain.matches("p1", Some("")));
        assert!(empty.matches("p1", Some("")));
        assert!(!empty.matches("p1", None));
        assert!(sized.matches("p1", Some("50ml")));
        assert!(!sized.matches("p2", Some("50ml")));
    }

    #[test]
    fn test_line_total_overflow() {
        let mut huge = product("p1", 0);
        huge.price = Decimal::MAX;
        let line = CartLine::new(huge, Quantity::parse(2).unwrap(), None);

        assert_eq!(line.checked_line_total(), None);
        assert_eq!(line.line_total(), Decimal::MAX);
        assert_eq!(checked_total([&line]), None);
    }

    #[test]
    fn test_line_total() {
        let line = CartLine::new(product("p1", 120), Quantity::parse(3).unwrap(), None);
        assert_eq!(line.line_total(), Decimal::new(360, 0));
    }

    #[test]
    fn test_key_display() {
        let plain = CartLine::new(product("p1", 100), Quantity::ONE, None);
        let sized = CartLine::new(product("p1", 100), Quantity::ONE, Some("50ml".into()));
        assert_eq!(plain.key().to_string(), "p1-default");
        assert_eq!(sized.key().to_string(), "p1-50ml");
        assert_ne!(plain.key(), sized.key());
    }

    #[test]
    fn test_serialized_shape() {
        let line = CartLine::new(product("p1", 100), Quantity::parse(2).unwrap(), None);
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["product"]["id"], "p1");
        assert!(value.get("variant").is_none());

        let sized = CartLine::new(product("p1", 100), Quantity::ONE, Some("30ml".into()));
        let value = serde_json::to_value(&sized).unwrap();
        assert_eq!(value["variant"], "30ml");
    }
}

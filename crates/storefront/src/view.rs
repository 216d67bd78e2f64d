//! Display models for the cart page.
//!
//! The cart store deals in decimals; these types carry the formatted strings
//! the cart page and header badge render.

use rust_decimal::Decimal;

use dermashop_core::{CurrencyCode, Price};

use crate::cart::{CartLine, CartStore};
use crate::storage::CartStorage;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    /// Stable row key, `"{id}-{variant}"` or `"{id}-default"`.
    pub key: String,
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub variant: Option<String>,
    pub image: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// The decrement button is disabled at a quantity of one.
    pub can_decrement: bool,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    /// Header badge count: distinct lines, not units.
    pub item_count: usize,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Decimal::ZERO, currency),
            total: format_price(Decimal::ZERO, currency),
            item_count: 0,
        }
    }

    /// Build the view of a cart's current state.
    #[must_use]
    pub fn from_store<S: CartStorage>(cart: &CartStore<S>, currency: CurrencyCode) -> Self {
        let total = format_price(cart.total_price(), currency);
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView::new(line, currency))
                .collect(),
            subtotal: total.clone(),
            total,
            item_count: cart.line_count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    /// Build the view of one line.
    #[must_use]
    pub fn new(line: &CartLine, currency: CurrencyCode) -> Self {
        let quantity = line.quantity.get();
        Self {
            key: line.key().to_string(),
            product_id: line.product.id.to_string(),
            name: line.product.name.clone(),
            brand: line.product.brand.clone(),
            variant: line.variant.clone(),
            image: line.product.primary_image().map(str::to_owned),
            quantity,
            price: format_price(line.product.price, currency),
            line_price: format_price(line.line_total(), currency),
            can_decrement: quantity > 1,
        }
    }
}

/// Format an amount with the currency symbol and two decimals.
#[must_use]
pub fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cart::test_support::product;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_empty_view() {
        let view = CartView::empty(CurrencyCode::INR);
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "₹0.00");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_view_from_store() {
        let mut cart = CartStore::open_default(MemoryStorage::new());
        cart.add_item(&product("p1", 100), 2, None).unwrap();
        let mut balm = product("p2", 0);
        balm.price = Decimal::new(495, 1);
        balm.images.clear();
        cart.add_item(&balm, 1, Some("mint")).unwrap();

        let view = CartView::from_store(&cart, CurrencyCode::INR);

        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "₹249.50");
        assert_eq!(view.total, view.subtotal);

        let first = &view.items[0];
        assert_eq!(first.key, "p1-default");
        assert_eq!(first.price, "₹100.00");
        assert_eq!(first.line_price, "₹200.00");
        assert_eq!(first.image.as_deref(), Some("/images/p1.jpg"));
        assert!(first.can_decrement);

        let second = &view.items[1];
        assert_eq!(second.key, "p2-mint");
        assert_eq!(second.variant.as_deref(), Some("mint"));
        assert_eq!(second.image, None);
        assert!(!second.can_decrement);
    }

    #[test]
    fn test_format_price_currency() {
        assert_eq!(format_price(Decimal::new(1999, 2), CurrencyCode::USD), "$19.99");
    }
}

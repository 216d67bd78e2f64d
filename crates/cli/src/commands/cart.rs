//! Cart commands.
//!
//! Every mutation is persisted by the store before the command returns. If the
//! write fails the error is reported, and the cart printed afterwards still
//! reflects the change for this run only.

use std::fmt::Write;

use dermashop_core::CurrencyCode;
use dermashop_storefront::cart::CartStore;
use dermashop_storefront::catalog::Catalog;
use dermashop_storefront::error::{AppError, Result};
use dermashop_storefront::storage::CartStorage;
use dermashop_storefront::view::CartView;

use super::emit;

/// Print the cart.
pub fn show<S: CartStorage>(cart: &CartStore<S>, currency: CurrencyCode) {
    emit(&render_cart(&CartView::from_store(cart, currency)));
}

/// Add `quantity` units of a catalog product.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for an unknown product, or the cart error if
/// the quantity is invalid or the cart cannot be saved.
pub fn add<S: CartStorage>(
    catalog: &Catalog,
    cart: &mut CartStore<S>,
    id: &str,
    quantity: i64,
    variant: Option<&str>,
) -> Result<()> {
    let product = catalog
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("product '{id}'")))?;
    cart.add_item(product, quantity, variant)?;
    tracing::info!(product = %product.id, quantity, ?variant, "Added to cart");
    Ok(())
}

/// Remove a line. Removing a line that is not in the cart is not an error.
///
/// # Errors
///
/// Returns the cart error if the cart cannot be saved.
pub fn remove<S: CartStorage>(
    cart: &mut CartStore<S>,
    id: &str,
    variant: Option<&str>,
) -> Result<()> {
    if cart.line(id, variant).is_none() {
        tracing::warn!(product = id, ?variant, "No such line in cart");
    }
    cart.remove_item(id, variant)?;
    Ok(())
}

/// Set a line's quantity; zero or less removes the line.
///
/// # Errors
///
/// Returns the cart error if the quantity is out of range or the cart cannot
/// be saved.
pub fn update<S: CartStorage>(
    cart: &mut CartStore<S>,
    id: &str,
    quantity: i64,
    variant: Option<&str>,
) -> Result<()> {
    if cart.line(id, variant).is_none() {
        tracing::warn!(product = id, ?variant, "No such line in cart");
    }
    cart.update_quantity(id, quantity, variant)?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns the cart error if the cart cannot be saved.
pub fn clear<S: CartStorage>(cart: &mut CartStore<S>) -> Result<()> {
    cart.clear_cart()?;
    tracing::info!("Cart cleared");
    Ok(())
}

fn render_cart(view: &CartView) -> String {
    if view.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Cart ({} item{})",
        view.item_count,
        if view.item_count == 1 { "" } else { "s" }
    );
    for item in &view.items {
        let name = match &item.variant {
            Some(variant) => format!("{} ({variant})", item.name),
            None => item.name.clone(),
        };
        let _ = writeln!(
            out,
            "  {:<40} {:>10} x {:<3} {:>10}",
            name, item.price, item.quantity, item.line_price
        );
    }
    let _ = writeln!(out, "Subtotal: {}", view.subtotal);
    let _ = writeln!(out, "Total:    {}", view.total);
    out
}

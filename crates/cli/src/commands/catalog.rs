//! Catalog browsing commands.

use std::fmt::Write;

use dermashop_core::{CurrencyCode, Product};
use dermashop_storefront::catalog::{Catalog, ProductFilter, RELATED_PRODUCTS_LIMIT, SortOrder};
use dermashop_storefront::error::{AppError, Result};
use dermashop_storefront::view::format_price;

use super::emit;

/// Print the filtered, sorted listing.
pub fn list(catalog: &Catalog, filter: &ProductFilter, order: SortOrder, currency: CurrencyCode) {
    let products = catalog.listing(filter, order);
    tracing::debug!(matched = products.len(), sort = %order, "Listing products");
    emit(&render_listing(&products, order, currency));
}

/// Print a product detail page with related products.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if no product has the given id.
pub fn show(catalog: &Catalog, id: &str, currency: CurrencyCode) -> Result<()> {
    let product = catalog
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("product '{id}'")))?;
    let related = catalog.related(product, RELATED_PRODUCTS_LIMIT);
    emit(&render_detail(product, &related, currency));
    Ok(())
}

/// Print the values available to the listing filters.
pub fn facets(catalog: &Catalog, currency: CurrencyCode) {
    let facets = catalog.facets();

    let mut out = String::new();
    let _ = writeln!(out, "Brands:   {}", facets.brands.join(", "));
    let _ = writeln!(out, "Concerns: {}", facets.tags.join(", "));
    if let Some((min, max)) = facets.price_range {
        let _ = writeln!(
            out,
            "Price:    {} - {}",
            format_price(min, currency),
            format_price(max, currency)
        );
    }
    let _ = writeln!(
        out,
        "Sort:     {}",
        SortOrder::ALL.map(|order| order.as_str()).join(", ")
    );
    emit(&out);
}

fn render_listing(products: &[&Product], order: SortOrder, currency: CurrencyCode) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Showing {} product{} ({})",
        products.len(),
        if products.len() == 1 { "" } else { "s" },
        order.label()
    );
    for product in products {
        let _ = writeln!(out, "{}", summary_row(product, currency));
    }
    out
}

fn summary_row(product: &Product, currency: CurrencyCode) -> String {
    let mut row = format!(
        "  {:<26} {:<34} {:<14} {:>10}",
        product.id.as_str(),
        product.name,
        product.brand,
        format_price(product.price, currency)
    );
    for (flag, badge) in [
        (product.featured, "featured"),
        (product.bestseller, "bestseller"),
        (product.is_new, "new"),
    ] {
        if flag {
            let _ = write!(row, " [{badge}]");
        }
    }
    row.trim_end().to_string()
}

fn render_detail(product: &Product, related: &[&Product], currency: CurrencyCode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} by {}", product.name, product.brand);

    let mut price = format_price(product.price, currency);
    if let Some(original) = product.original_price {
        let _ = write!(price, " (was {})", format_price(original, currency));
    }
    if product.discount_percentage > 0 {
        let _ = write!(price, " -{}%", product.discount_percentage);
    }
    let _ = writeln!(out, "Price:    {price}");
    let _ = writeln!(
        out,
        "Rating:   {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    let _ = writeln!(out, "Category: {}", product.category);
    if !product.tags.is_empty() {
        let _ = writeln!(out, "Concerns: {}", product.tags.join(", "));
    }
    if let Some(sku) = &product.sku {
        let _ = writeln!(out, "SKU:      {sku}");
    }

    for (heading, text) in [
        ("", product.short_description.as_str()),
        ("Description", product.description.as_str()),
        ("Ingredients", product.ingredients.as_str()),
        ("How to use", product.directions.as_str()),
    ] {
        if text.is_empty() {
            continue;
        }
        out.push('\n');
        if !heading.is_empty() {
            let _ = writeln!(out, "{heading}:");
        }
        let _ = writeln!(out, "{text}");
    }

    if !related.is_empty() {
        let _ = writeln!(out, "\nYou may also like:");
        for product in related {
            let _ = writeln!(out, "{}", summary_row(product, currency));
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::bundled().unwrap()
    }

    #[test]
    fn test_render_listing() {
        let catalog = catalog();
        let filter = ProductFilter::new().tag("acne");
        let products = catalog.listing(&filter, SortOrder::PriceAsc);
        let out = render_listing(&products, SortOrder::PriceAsc, CurrencyCode::INR);

        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Showing 3 products (Price: Low to High)")
        );
        let first = lines.next().unwrap();
        assert!(first.trim_start().starts_with("salicylic-cleanser"));
        assert!(first.contains("₹299.00"));
        assert!(first.ends_with("[new]"));
    }

    #[test]
    fn test_render_empty_listing() {
        let out = render_listing(&[], SortOrder::Featured, CurrencyCode::INR);
        assert_eq!(out, "Showing 0 products (Featured)\n");
    }

    #[test]
    fn test_render_detail_lists_related() {
        let catalog = catalog();
        let product = catalog.find("hyaluronic-serum").unwrap();
        let related = catalog.related(product, RELATED_PRODUCTS_LIMIT);
        let out = render_detail(product, &related, CurrencyCode::INR);

        assert!(out.starts_with(&format!("{} by Dewdrop Labs\n", product.name)));
        assert!(out.contains("Category: serums"));
        assert!(out.contains("You may also like:"));
        assert!(out.contains("niacinamide-serum"));
        let own_rows = out
            .lines()
            .filter(|line| line.trim_start().starts_with("hyaluronic-serum"))
            .count();
        assert_eq!(own_rows, 0);
    }

    #[test]
    fn test_show_unknown_product() {
        let err = show(&catalog(), "no-such-product", CurrencyCode::INR).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.exit_code(), 2);
    }
}

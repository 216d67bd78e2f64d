//! Shop listing filters and sort orders.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use dermashop_core::Product;

/// Listing filter built from the shop page selections.
///
/// Empty selections do not constrain the listing. Predicates are applied in
/// order: category, brands, tags, price range, then flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Category slug, compared case-insensitively.
    pub category: Option<String>,
    /// Selected brands. A product must belong to one of them.
    pub brands: Vec<String>,
    /// Selected concerns. A product must carry at least one of them.
    pub tags: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    pub featured: Option<bool>,
    pub bestseller: Option<bool>,
    pub is_new: Option<bool>,
}

impl ProductFilter {
    /// A filter that accepts every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.push(brand.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    #[must_use]
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    #[must_use]
    pub fn bestseller(mut self, bestseller: bool) -> Self {
        self.bestseller = Some(bestseller);
        self
    }

    #[must_use]
    pub fn is_new(mut self, is_new: bool) -> Self {
        self.is_new = Some(is_new);
        self
    }

    /// Select the brand if unselected, unselect it otherwise.
    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand);
    }

    /// Select the concern if unselected, unselect it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.tags, tag);
    }

    /// Drop every selection except the category, which comes from the route.
    pub fn reset(&mut self) {
        *self = Self {
            category: self.category.take(),
            ..Self::default()
        };
    }

    /// Whether `product` passes every active predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && !product.category.eq_ignore_ascii_case(category)
        {
            return false;
        }

        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }

        if !self.tags.is_empty() && !product.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if self.min_price.is_some_and(|min| product.price < min)
            || self.max_price.is_some_and(|max| product.price > max)
        {
            return false;
        }

        flag_matches(self.featured, product.featured)
            && flag_matches(self.bestseller, product.bestseller)
            && flag_matches(self.is_new, product.is_new)
    }
}

fn flag_matches(wanted: Option<bool>, actual: bool) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

fn toggle(selected: &mut Vec<String>, value: &str) {
    if let Some(pos) = selected.iter().position(|s| s == value) {
        selected.remove(pos);
    } else {
        selected.push(value.to_string());
    }
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    /// New arrivals first.
    Newest,
    /// Bestsellers first.
    BestSelling,
}

impl SortOrder {
    /// All orders, in the order the sort menu lists them.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Newest,
        Self::BestSelling,
    ];

    /// Menu value of the order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
            Self::BestSelling => "bestselling",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Newest => "Newest Arrivals",
            Self::BestSelling => "Best Selling",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            // `true` sorts after `false`, so flags are compared reversed.
            Self::Featured => b.featured.cmp(&a.featured),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Newest => b.is_new.cmp(&a.is_new),
            Self::BestSelling => b.bestseller.cmp(&a.bestseller),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort order name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}' (expected featured, price-asc, price-desc, newest or bestselling)")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| ParseSortOrderError(s.to_string()))
    }
}

/// Stable sort of a listing; ties keep their catalog order.
pub fn sort_products(products: &mut [&Product], order: SortOrder) {
    products.sort_by(|a, b| order.compare(a, b));
}

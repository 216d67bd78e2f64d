//! Read-only product catalog.
//!
//! The catalog is loaded once (from the bundled mock feed or a JSON/YAML file)
//! and never mutated. It answers id lookups, homepage partitions, related
//! products for detail pages, and filtered listings for the shop page.

mod filter;

pub use filter::{ParseSortOrderError, ProductFilter, SortOrder, sort_products};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use dermashop_core::{Product, ProductId};

/// Mock product feed compiled into the binary.
const BUNDLED_PRODUCTS: &str = include_str!("../../data/products.json");

/// Number of related products shown on a detail page.
pub const RELATED_PRODUCTS_LIMIT: usize = 10;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported catalog format for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),

    #[error("product {id} has a negative price: {price}")]
    NegativePrice { id: ProductId, price: Decimal },

    #[error("product {id} has a discount of {percentage}% (expected 0-100)")]
    InvalidDiscount { id: ProductId, percentage: u8 },
}

/// Values available to the shop page filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFacets {
    /// Unique brands in first-seen order.
    pub brands: Vec<String>,
    /// Unique tags in first-seen order.
    pub tags: Vec<String>,
    /// Lowest and highest price, `None` for an empty catalog.
    pub price_range: Option<(Decimal, Decimal)>,
}

/// Immutable, ordered product catalog.
///
/// Cheap to clone; clones share the same product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateId`] if two products share an id.
    /// - [`CatalogError::NegativePrice`] if a price is below zero.
    /// - [`CatalogError::InvalidDiscount`] if a discount exceeds 100%.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: product.id.clone(),
                    price: product.price,
                });
            }
            if product.discount_percentage > 100 {
                return Err(CatalogError::InvalidDiscount {
                    id: product.id.clone(),
                    percentage: product.discount_percentage,
                });
            }
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// The mock catalog shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled feed is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_PRODUCTS)
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_products(serde_json::from_str(json)?)
    }

    /// Parse a YAML sequence of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or ids repeat.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Self::from_products(serde_yaml::from_str(yaml)?)
    }

    /// Load a catalog file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// does not parse, or repeats an id.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, CatalogError> = match extension.as_deref() {
            Some("json") => Self::from_json,
            Some("yaml" | "yml") => Self::from_yaml,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = parse(&content)?;
        tracing::info!(products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Exact id lookup.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products flagged for the homepage featured carousel.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    #[must_use]
    pub fn bestsellers(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.bestseller).collect()
    }

    #[must_use]
    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_new).collect()
    }

    /// Other products in the same category, in catalog order, at most `limit`.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.id != product.id && p.category == product.category)
            .take(limit)
            .collect()
    }

    /// Products passing `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Products passing `filter`, sorted by `order`.
    #[must_use]
    pub fn listing(&self, filter: &ProductFilter, order: SortOrder) -> Vec<&Product> {
        let mut products = self.filter(filter);
        sort_products(&mut products, order);
        products
    }

    /// Brands, tags and price bounds for the filter controls.
    #[must_use]
    pub fn facets(&self) -> CatalogFacets {
        let mut brands: Vec<String> = Vec::new();
        let mut tags: Vec<String> = Vec::new();

        for product in &*self.products {
            if !brands.contains(&product.brand) {
                brands.push(product.brand.clone());
            }
            for tag in &product.tags {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }

        let prices = self.products.iter().map(|p| p.price);
        let price_range = prices.clone().min().zip(prices.max());

        CatalogFacets {
            brands,
            tags,
            price_range,
        }
    }
}

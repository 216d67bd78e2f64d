//! Catalog product record.
//!
//! Products come from a read-only feed and are never mutated by the
//! storefront. Field names follow the feed's camelCase JSON.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, Sku};

/// An immutable catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Charged price per unit.
    pub price: Decimal,
    /// Pre-discount price, shown struck through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    /// Informational discount, 0-100. Never applied to `price`.
    #[serde(default)]
    pub discount_percentage: u8,
    /// Image URIs, first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub directions: String,
    /// Category slug (e.g. "cleansers").
    pub category: String,
    /// Skin concerns and other labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Average review rating.
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub sku: Option<Sku>,
}

impl Product {
    /// The primary image, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

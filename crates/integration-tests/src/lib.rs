//! Integration tests for Dermashop.
//!
//! Cross-crate tests that drive the storefront through its public API with
//! real storage backends.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dermashop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over file and in-memory storage
//! - `catalog_queries` - Bundled and file-loaded catalog queries

use std::path::Path;

use rust_decimal::Decimal;
use tempfile::TempDir;

use dermashop_core::Product;
use dermashop_storefront::catalog::Catalog;
use dermashop_storefront::storage::FileStorage;

/// A file-backed storage rooted in a temporary directory that is deleted on
/// drop.
pub struct TestShop {
    dir: TempDir,
    pub catalog: Catalog,
}

impl TestShop {
    /// Fresh data directory and the bundled catalog.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            catalog: bundled_catalog(),
        }
    }

    /// Data directory of this shop.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// A new storage handle over the data directory, as a fresh process would
    /// open it.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_dir())
    }

    /// Look up a bundled product.
    ///
    /// # Panics
    ///
    /// Panics if the bundled catalog has no such product.
    #[must_use]
    pub fn product(&self, id: &str) -> &Product {
        self.catalog
            .find(id)
            .unwrap_or_else(|| panic!("bundled catalog has no product '{id}'"))
    }
}

impl Default for TestShop {
    fn default() -> Self {
        Self::new()
    }
}

/// The catalog compiled into the storefront.
///
/// # Panics
///
/// Panics if the bundled feed does not parse.
#[must_use]
pub fn bundled_catalog() -> Catalog {
    Catalog::bundled().expect("Bundled catalog should parse")
}

/// A minimal product with the given id and whole-unit price.
///
/// # Panics
///
/// Never in practice; the record is built from known-good JSON.
#[must_use]
pub fn fixture_product(id: &str, price: i64) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("Fixture {id}"),
        "brand": "Fixture Co",
        "price": Decimal::from(price),
        "category": "fixtures",
    }))
    .expect("Fixture product should deserialize")
}

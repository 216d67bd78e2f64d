//! Catalog queries against the bundled feed and file-loaded catalogs.

use std::fs;

use rust_decimal::Decimal;

use dermashop_core::Product;
use dermashop_integration_tests::{bundled_catalog, fixture_product};
use dermashop_storefront::catalog::{
    Catalog, CatalogError, ProductFilter, RELATED_PRODUCTS_LIMIT, SortOrder,
};

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn test_bundled_catalog_loads() {
    let catalog = bundled_catalog();
    assert_eq!(catalog.len(), 12);
    assert!(catalog.find("hyaluronic-serum").is_some());
    assert!(catalog.find("HYALURONIC-SERUM").is_none());
}

#[test]
fn test_homepage_partitions() {
    let catalog = bundled_catalog();
    assert_eq!(
        ids(&catalog.featured()),
        [
            "hyaluronic-serum",
            "vitamin-c-serum",
            "ceramide-moisturizer",
            "mineral-sunscreen"
        ]
    );
    assert_eq!(catalog.bestsellers().len(), 5);
    assert_eq!(
        ids(&catalog.new_arrivals()),
        [
            "vitamin-c-serum",
            "salicylic-cleanser",
            "mineral-sunscreen",
            "retinol-night-serum"
        ]
    );
}

#[test]
fn test_related_excludes_self() {
    let catalog = bundled_catalog();
    let serum = catalog.find("vitamin-c-serum").expect("serum");

    let related = catalog.related(serum, RELATED_PRODUCTS_LIMIT);

    assert_eq!(
        ids(&related),
        [
            "hyaluronic-serum",
            "niacinamide-serum",
            "retinol-night-serum"
        ]
    );
    assert_eq!(catalog.related(serum, 1).len(), 1);
}

#[test]
fn test_filters_compose() {
    let catalog = bundled_catalog();

    let acne = ProductFilter::new().tag("acne");
    assert_eq!(
        ids(&catalog.filter(&acne)),
        ["niacinamide-serum", "salicylic-cleanser", "clay-mask"]
    );

    let cheap_acne = acne.price_range(Decimal::ZERO, Decimal::from(500));
    assert_eq!(
        ids(&catalog.filter(&cheap_acne)),
        ["salicylic-cleanser", "clay-mask"]
    );

    let verdant_acne = cheap_acne.brand("Verdant");
    assert_eq!(ids(&catalog.filter(&verdant_acne)), ["clay-mask"]);

    let none = verdant_acne.category("serums");
    assert!(catalog.filter(&none).is_empty());
}

#[test]
fn test_category_is_case_insensitive() {
    let catalog = bundled_catalog();
    let filter = ProductFilter::new().category("Cleansers");
    assert_eq!(
        ids(&catalog.filter(&filter)),
        ["gentle-foaming-cleanser", "salicylic-cleanser"]
    );
}

#[test]
fn test_listing_sorts() {
    let catalog = bundled_catalog();
    let serums = ProductFilter::new().category("serums");

    assert_eq!(
        ids(&catalog.listing(&serums, SortOrder::PriceAsc)),
        [
            "niacinamide-serum",
            "hyaluronic-serum",
            "vitamin-c-serum",
            "retinol-night-serum"
        ]
    );
    assert_eq!(
        ids(&catalog.listing(&serums, SortOrder::PriceDesc)),
        [
            "retinol-night-serum",
            "vitamin-c-serum",
            "hyaluronic-serum",
            "niacinamide-serum"
        ]
    );
    // Stable: flagged products first, ties in catalog order.
    assert_eq!(
        ids(&catalog.listing(&serums, SortOrder::Newest)),
        [
            "vitamin-c-serum",
            "retinol-night-serum",
            "hyaluronic-serum",
            "niacinamide-serum"
        ]
    );
}

#[test]
fn test_facets() {
    let facets = bundled_catalog().facets();
    assert_eq!(
        facets.brands,
        [
            "Dewdrop Labs",
            "Lumiere Skin",
            "Verdant",
            "Hydra Science",
            "Kora Botanics"
        ]
    );
    assert_eq!(facets.tags.first().map(String::as_str), Some("dryness"));
    assert_eq!(facets.tags.len(), 9);
    assert_eq!(
        facets.price_range,
        Some((Decimal::new(2495, 1), Decimal::from(1149)))
    );
}

#[test]
fn test_load_yaml_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.yaml");
    fs::write(
        &path,
        r"
- id: travel-cleanser
  name: Travel Cleanser
  brand: Verdant
  price: 199
  category: cleansers
  tags: [sensitivity]
  bestseller: true
- id: travel-spf
  name: Travel SPF
  brand: Lumiere Skin
  price: '249.00'
  originalPrice: '299.00'
  discountPercentage: 17
  category: sunscreen
",
    )
    .expect("write catalog");

    let catalog = Catalog::load(&path).expect("load");

    assert_eq!(catalog.len(), 2);
    let spf = catalog.find("travel-spf").expect("spf");
    assert_eq!(spf.price, Decimal::from(249));
    assert_eq!(spf.original_price, Some(Decimal::from(299)));
    assert_eq!(ids(&catalog.bestsellers()), ["travel-cleanser"]);
}

#[test]
fn test_load_json_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.json");
    let products = vec![fixture_product("a", 10), fixture_product("b", 20)];
    fs::write(
        &path,
        serde_json::to_string(&products).expect("serialize"),
    )
    .expect("write catalog");

    let catalog = Catalog::load(&path).expect("load");
    assert_eq!(catalog.products(), products.as_slice());
}

#[test]
fn test_load_rejects_bad_catalogs() {
    let dir = tempfile::tempdir().expect("temp dir");

    let missing = Catalog::load(&dir.path().join("missing.json"));
    assert!(matches!(missing, Err(CatalogError::Io { .. })));

    let csv = dir.path().join("catalog.csv");
    fs::write(&csv, "id,name").expect("write");
    assert!(matches!(
        Catalog::load(&csv),
        Err(CatalogError::UnsupportedFormat(_))
    ));

    let duplicated = dir.path().join("dupes.json");
    let products = vec![fixture_product("a", 10), fixture_product("a", 20)];
    fs::write(
        &duplicated,
        serde_json::to_string(&products).expect("serialize"),
    )
    .expect("write");
    assert!(matches!(
        Catalog::load(&duplicated),
        Err(CatalogError::DuplicateId(id)) if id == "a"
    ));
}

//! Dermashop CLI - browse the catalog and drive a persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # List serums for acne, cheapest first
//! dermashop catalog list --category serums --tag acne --sort price-asc
//!
//! # Product detail with related products
//! dermashop catalog show hyaluronic-serum
//!
//! # Add two units of a variant, then view the cart
//! dermashop cart add lip-balm -q 2 --variant mint
//! dermashop cart show
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Filtered and sorted product listing
//! - `catalog show` - Product detail and related products
//! - `catalog facets` - Brands, concerns and price range for filter controls
//! - `cart show|add|remove|update|clear` - Cart operations
//!
//! The cart is stored under `--data-dir` and survives between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use dermashop_core::CurrencyCode;
use dermashop_storefront::cart::CartStore;
use dermashop_storefront::catalog::{Catalog, ProductFilter, SortOrder};
use dermashop_storefront::config::StorefrontConfig;
use dermashop_storefront::error::{AppError, Result};
use dermashop_storefront::storage::{FileStorage, validate_key};

mod commands;

#[derive(Parser)]
#[command(name = "dermashop")]
#[command(author, version, about = "Dermashop storefront CLI")]
struct Cli {
    /// Directory holding the stored cart [env: DERMASHOP_DATA_DIR]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog file (.json, .yaml) instead of the bundled one [env: DERMASHOP_CATALOG]
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Storage slot name for the cart [env: DERMASHOP_CART_KEY]
    #[arg(long, global = true)]
    cart_key: Option<String>,

    /// Display currency code [env: DERMASHOP_CURRENCY]
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products matching the filters
    List {
        /// Category slug
        #[arg(long)]
        category: Option<String>,

        /// Brand to include (repeatable)
        #[arg(long)]
        brand: Vec<String>,

        /// Skin concern to include (repeatable)
        #[arg(long)]
        tag: Vec<String>,

        /// Inclusive minimum price
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Inclusive maximum price
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Only featured products
        #[arg(long)]
        featured: bool,

        /// Only bestsellers
        #[arg(long)]
        bestseller: bool,

        /// Only new arrivals
        #[arg(long = "new")]
        new_arrivals: bool,

        /// Sort order (`featured`, `price-asc`, `price-desc`, `newest`, `bestselling`)
        #[arg(long, default_value_t = SortOrder::Featured)]
        sort: SortOrder,
    },
    /// Show a product with related products
    Show {
        /// Product id
        id: String,
    },
    /// Show the values available to the listing filters
    Facets,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// Variant label, e.g. a shade or size
        #[arg(long)]
        variant: Option<String>,
    },
    /// Remove a line from the cart
    Remove {
        /// Product id
        id: String,

        /// Variant label of the line
        #[arg(long)]
        variant: Option<String>,
    },
    /// Set the quantity of a line (0 or less removes it)
    Update {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Variant label of the line
        #[arg(long)]
        variant: Option<String>,
    },
    /// Remove every line from the cart
    Clear,
}

/// Listing filter from `catalog list` flags. Unset flags do not constrain.
fn listing_filter(
    category: Option<String>,
    brands: Vec<String>,
    tags: Vec<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    [featured, bestseller, new_arrivals]: [bool; 3],
) -> ProductFilter {
    ProductFilter {
        category,
        brands,
        tags,
        min_price,
        max_price,
        featured: featured.then_some(true),
        bestseller: bestseller.then_some(true),
        is_new: new_arrivals.then_some(true),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dermashop=info,dermashop_storefront=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Catalog { action } => {
            let catalog = load_catalog(&config)?;
            match action {
                CatalogAction::List {
                    category,
                    brand,
                    tag,
                    min_price,
                    max_price,
                    featured,
                    bestseller,
                    new_arrivals,
                    sort,
                } => {
                    let filter = listing_filter(
                        category,
                        brand,
                        tag,
                        min_price,
                        max_price,
                        [featured, bestseller, new_arrivals],
                    );
                    commands::catalog::list(&catalog, &filter, sort, config.currency);
                }
                CatalogAction::Show { id } => {
                    commands::catalog::show(&catalog, &id, config.currency)?;
                }
                CatalogAction::Facets => commands::catalog::facets(&catalog, config.currency),
            }
        }
        Commands::Cart { action } => {
            let storage = FileStorage::new(&config.data_dir).with_quota(config.storage_quota);
            let mut cart = CartStore::open(storage, config.cart_key.as_str());

            match action {
                CartAction::Show => {}
                CartAction::Add {
                    id,
                    quantity,
                    variant,
                } => {
                    let catalog = load_catalog(&config)?;
                    commands::cart::add(&catalog, &mut cart, &id, quantity, variant.as_deref())?;
                }
                CartAction::Remove { id, variant } => {
                    commands::cart::remove(&mut cart, &id, variant.as_deref())?;
                }
                CartAction::Update {
                    id,
                    quantity,
                    variant,
                } => commands::cart::update(&mut cart, &id, quantity, variant.as_deref())?,
                CartAction::Clear => commands::cart::clear(&mut cart)?,
            }

            commands::cart::show(&cart, config.currency);
        }
    }
    Ok(())
}

/// The configured catalog file, or the bundled catalog. Only commands that
/// look products up load it, so a broken catalog file never blocks editing
/// the cart.
fn load_catalog(config: &StorefrontConfig) -> Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::bundled()?,
    };
    tracing::debug!(products = catalog.len(), "Catalog ready");
    Ok(catalog)
}

/// Environment configuration with command-line flags applied on top.
fn load_config(cli: &Cli) -> Result<StorefrontConfig> {
    let mut config = StorefrontConfig::from_env()?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.clone());
    }
    if let Some(key) = &cli.cart_key {
        validate_key(key).map_err(|e| AppError::BadRequest(e.to_string()))?;
        config.cart_key.clone_from(key);
    }
    if let Some(code) = &cli.currency {
        config.currency = CurrencyCode::parse(code)
            .ok_or_else(|| AppError::BadRequest(format!("unsupported currency '{code}'")))?;
    }

    Ok(config)
}

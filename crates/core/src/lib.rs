//! Dermashop Core - Shared types library.
//!
//! This crate provides the types shared by all Dermashop components:
//! - `storefront` - Catalog queries and the persisted shopping cart
//! - `cli` - Command-line front end for browsing and cart management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities, and the product record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

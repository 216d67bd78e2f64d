//! Dermashop Storefront library.
//!
//! Client-side storefront core: the read-only product catalog the shop pages
//! query, and the shopping cart persisted to a local storage slot.
//!
//! # Modules
//!
//! - [`catalog`] - Product lookups, partitions, filters, facets and sorting
//! - [`cart`] - Cart lines and the write-through [`cart::CartStore`]
//! - [`storage`] - Durable key-value slots (in-memory and file-backed)
//! - [`view`] - Formatted cart display models
//! - [`config`] - Environment configuration
//! - [`error`] - Unified `AppError`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod view;

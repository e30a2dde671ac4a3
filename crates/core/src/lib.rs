//! Wildflower Core - Shared types library.
//!
//! This crate provides common types used across all Wildflower components:
//! - `catalog` - Catalog API client and product transform pipeline
//! - `storefront` - Page-level browsing state (shop grid, wishlist)
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

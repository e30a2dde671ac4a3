//! Catalog API client and product transform pipeline for Wildflower.
//!
//! The upstream catalog API is the only source of truth; nothing in this
//! crate persists state. Raw records ([`wire`]) are deserialized exactly as
//! the API sends them, then mapped in one place ([`normalize`]) into
//! canonical types every storefront surface can render without further
//! checks.
//!
//! - [`client`] - HTTP client with moka response caching
//! - [`wire`] - permissive mirror of the API's JSON
//! - [`normalize`] - raw records into canonical [`types::Product`]s
//! - [`category`] - category tree groupings
//! - [`query`] - listing query parameters

#![cfg_attr(not(test), forbid(unsafe_code))]

mod cache;

pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;
pub mod wire;

pub use client::{CatalogApi, CatalogClient};
pub use config::{CatalogConfig, ConfigError};
pub use error::CatalogError;
pub use query::ListingQuery;

//! Cache types for catalog API responses.

use crate::wire::{RawCategory, RawProductPage};

/// Cache key for products and categories.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// One products page, keyed by its encoded query string.
    Products(String),
    /// The full category list.
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(RawProductPage),
    Categories(Vec<RawCategory>),
}

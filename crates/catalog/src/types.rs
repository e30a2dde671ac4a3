//! Canonical product types produced by the transform pipeline.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! records: every field is present, defaulted, and safe to render directly.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wildflower_core::{CategoryId, Price, ProductId};

// =============================================================================
// Product Badges
// =============================================================================

/// Badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductTag {
    /// No sellable stock.
    OutOfStock,
    /// Discounted from an older price.
    Sale,
    /// Entered the catalog within the last 30 days.
    New,
}

impl ProductTag {
    /// Display label used on product cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "OUT OF STOCK",
            Self::Sale => "SALE",
            Self::New => "NEW",
        }
    }
}

impl fmt::Display for ProductTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product Parts
// =============================================================================

/// One image variant on a normalized product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Listing-resolution URL.
    pub url: String,
    /// Full-resolution URL.
    pub origin_url: String,
    /// Whether this is the product's main image.
    pub is_main: bool,
}

/// A name/value attribute pair on a normalized product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    /// Attribute display name.
    pub name: String,
    /// Attribute value text.
    pub value: String,
}

/// Stock state for a normalized product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Whether the product can currently be sold.
    pub in_stock: bool,
    /// Units on hand (0 when unknown).
    pub quantity: i64,
}

// =============================================================================
// Product
// =============================================================================

/// A product after normalization.
///
/// Built fresh on every catalog fetch by [`crate::normalize`]; never mutated
/// afterwards. Rendering code can use every field without further checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Stable UUID, when the record carries a valid one.
    pub uuid: Option<Uuid>,
    /// Display name. Never empty; nameless records become "Unnamed Product".
    pub name: String,
    /// Current selling price.
    pub price: Price,
    /// Pre-discount price. Present only when it exceeds `price`.
    pub original_price: Option<Price>,
    /// Main image URL at the resolution the caller requested.
    pub image: String,
    /// All image variants, with per-entry resolution fallbacks applied.
    pub images: Vec<ProductImage>,
    /// Mean review rating; 0.0 when unrated.
    pub rating: f64,
    /// Long-form description (may be empty).
    pub description: String,
    /// Short description for cards (may be empty).
    pub short_description: String,
    /// Whether the product entered the catalog within the last 30 days.
    pub is_new: bool,
    /// Color attribute values; `None` when the record has none.
    pub colors: Option<Vec<String>>,
    /// Feature attribute values; `None` when the record has none.
    pub features: Option<Vec<String>>,
    /// Badges in display order.
    pub tags: Vec<ProductTag>,
    /// Stock state.
    pub inventory: Inventory,
    /// Name/value attribute pairs.
    pub attributes: Vec<ProductAttribute>,
    /// Owning category, when assigned.
    pub category_id: Option<CategoryId>,
    /// When the product entered the catalog, when the record says.
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the product is currently discounted.
    #[must_use]
    pub const fn on_sale(&self) -> bool {
        self.original_price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_labels() {
        assert_eq!(ProductTag::OutOfStock.to_string(), "OUT OF STOCK");
        assert_eq!(ProductTag::Sale.to_string(), "SALE");
        assert_eq!(ProductTag::New.to_string(), "NEW");
    }
}

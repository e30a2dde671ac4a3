//! Raw wire types for the catalog HTTP API.
//!
//! Upstream records are merchant-maintained and routinely arrive with gaps,
//! so every field here is optional and deserialization never fails on a
//! missing one. All defaulting happens in exactly one place -
//! [`crate::normalize`] - and nothing downstream reads these types directly.

use rust_decimal::Decimal;
use serde::Deserialize;

// =============================================================================
// Response Envelopes
// =============================================================================

/// Envelope returned by `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProductPage {
    /// The records on this page.
    pub data: Vec<RawProductRecord>,
    /// Total matching records across all pages.
    pub total: u64,
    /// Page count as reported by the server, when it reports one.
    #[serde(rename = "totalPages")]
    pub total_pages: Option<u32>,
}

/// Envelope returned by `GET /api/categories`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategoryList {
    /// The full flat category list.
    pub data: Vec<RawCategory>,
}

// =============================================================================
// Product Records
// =============================================================================

/// A product exactly as the catalog API sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProductRecord {
    pub product_id: Option<i64>,
    pub uuid: Option<String>,
    pub description: Option<RawProductDescription>,
    pub price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub created_at: Option<String>,
    pub images: Vec<RawProductImage>,
    pub attributes: Vec<RawProductAttribute>,
    pub inventory: Option<RawInventory>,
    #[serde(rename = "meanRating")]
    pub mean_rating: Option<f64>,
}

/// The nested description record on a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProductDescription {
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub url_key: Option<String>,
}

/// One image entry on a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProductImage {
    pub is_main: Option<bool>,
    /// Listing-resolution URL.
    pub single: Option<String>,
    /// Full-resolution URL.
    pub origin: Option<String>,
}

/// One attribute entry on a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProductAttribute {
    pub attribute_code: Option<String>,
    pub attribute_name: Option<String>,
    pub option_text: Option<String>,
}

/// The nested inventory record on a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawInventory {
    pub stock_availability: Option<bool>,
    pub qty: Option<i64>,
}

// =============================================================================
// Category Records
// =============================================================================

/// A category exactly as the catalog API sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    pub id: Option<i64>,
    /// Absent or null means top-level.
    pub parent_id: Option<i64>,
    pub description: Option<RawCategoryDescription>,
}

/// The nested description record on a category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategoryDescription {
    pub name: Option<String>,
    pub image: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_record_tolerates_missing_fields() {
        let record: RawProductRecord = serde_json::from_str("{}").unwrap();
        assert!(record.product_id.is_none());
        assert!(record.description.is_none());
        assert!(record.images.is_empty());
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn test_product_record_tolerates_unknown_fields() {
        let json = r#"{"product_id": 7, "visibility": true, "tax_class": 2}"#;
        let record: RawProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.product_id, Some(7));
    }

    #[test]
    fn test_price_accepts_number_and_string() {
        let from_number: RawProductRecord = serde_json::from_str(r#"{"price": 49.99}"#).unwrap();
        let from_string: RawProductRecord =
            serde_json::from_str(r#"{"price": "49.99"}"#).unwrap();
        assert_eq!(from_number.price, from_string.price);
    }

    #[test]
    fn test_mean_rating_uses_wire_name() {
        let record: RawProductRecord = serde_json::from_str(r#"{"meanRating": 4.2}"#).unwrap();
        assert_eq!(record.mean_rating, Some(4.2));
    }

    #[test]
    fn test_product_page_defaults() {
        let page: RawProductPage = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.total_pages.is_none());
    }

    #[test]
    fn test_category_null_parent_is_top_level() {
        let json = r#"{"id": 3, "parent_id": null, "description": {"name": "Plants"}}"#;
        let category: RawCategory = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, Some(3));
        assert!(category.parent_id.is_none());
    }
}

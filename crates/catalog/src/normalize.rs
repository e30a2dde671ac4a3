//! Conversion from raw wire records to canonical catalog types.
//!
//! Every upstream record, no matter how sparse, maps to a fully populated
//! [`Product`]. The functions here are pure; [`normalize_product`] reads the
//! clock once and everything else is deterministic on its inputs.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use uuid::Uuid;
use wildflower_core::{CategoryId, Price, ProductId};

use crate::types::{Inventory, Product, ProductAttribute, ProductImage, ProductTag};
use crate::wire::{RawProductAttribute, RawProductImage, RawProductRecord};

/// Display name for records missing one.
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

/// Image URL for records with no usable image.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder-product.png";

/// Attribute code carrying color options.
const COLOR_ATTRIBUTE: &str = "color";

/// Attribute code carrying feature options.
const FEATURE_ATTRIBUTE: &str = "feature";

/// How long a product counts as new after entering the catalog.
const NEW_PRODUCT_WINDOW_DAYS: i64 = 30;

/// Which image variant to put in [`Product::image`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageResolution {
    /// Listing-resolution variant, for grids and cards.
    #[default]
    Listing,
    /// Full-resolution variant, for detail views.
    Origin,
}

// =============================================================================
// Normalization
// =============================================================================

/// Converts a raw record into a canonical [`Product`] as of now.
#[must_use]
pub fn normalize_product(raw: &RawProductRecord, resolution: ImageResolution) -> Product {
    normalize_product_at(raw, resolution, Utc::now())
}

/// Converts a raw record into a canonical [`Product`] as of `now`.
///
/// The new-product window is measured against `now`, so repeated calls with
/// the same arguments always return the same product.
#[must_use]
pub fn normalize_product_at(
    raw: &RawProductRecord,
    resolution: ImageResolution,
    now: DateTime<Utc>,
) -> Product {
    let description = raw.description.clone().unwrap_or_default();

    let name = description
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| UNNAMED_PRODUCT.to_owned(), str::to_owned);

    let price_amount = raw.price.unwrap_or_default();
    let price = Price::new(price_amount);
    // A discount only exists when the old price is actually higher.
    let original_price = raw
        .old_price
        .filter(|old| *old > price_amount)
        .map(Price::new);

    let created_at = raw.created_at.as_deref().and_then(parse_timestamp);
    let is_new = created_at.is_some_and(|t| t > now - Duration::days(NEW_PRODUCT_WINDOW_DAYS));

    let inventory = raw.inventory.as_ref().map_or_else(Inventory::default, |i| {
        Inventory {
            in_stock: i.stock_availability.unwrap_or(false),
            quantity: i.qty.unwrap_or(0),
        }
    });

    let mut tags = Vec::new();
    if !inventory.in_stock {
        tags.push(ProductTag::OutOfStock);
    }
    // The sale badge keys off the presence of any non-zero old price, even
    // when it is not higher than the current one.
    if raw.old_price.is_some_and(|old| !old.is_zero()) {
        tags.push(ProductTag::Sale);
    }
    if is_new {
        tags.push(ProductTag::New);
    }

    Product {
        id: ProductId::new(raw.product_id.unwrap_or(0)),
        uuid: raw.uuid.as_deref().and_then(|s| Uuid::parse_str(s).ok()),
        name,
        price,
        original_price,
        image: select_main_image(&raw.images, resolution),
        images: raw.images.iter().map(convert_image).collect(),
        rating: raw.mean_rating.unwrap_or(0.0),
        description: description.description.unwrap_or_default(),
        short_description: description.short_description.unwrap_or_default(),
        is_new,
        colors: collect_attribute_values(&raw.attributes, COLOR_ATTRIBUTE),
        features: collect_attribute_values(&raw.attributes, FEATURE_ATTRIBUTE),
        tags,
        inventory,
        attributes: raw.attributes.iter().map(convert_attribute).collect(),
        category_id: raw.category_id.map(CategoryId::new),
        created_at,
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parses the two timestamp shapes the catalog emits: RFC 3339 and the
/// space-separated `YYYY-MM-DD HH:MM:SS` form, both taken as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|n| n.and_utc())
        })
}

/// Picks the first non-empty URL, falling back to the placeholder.
fn pick_url(preferred: Option<&str>, fallback: Option<&str>) -> String {
    preferred
        .or(fallback)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map_or_else(|| PLACEHOLDER_IMAGE.to_owned(), str::to_owned)
}

/// Resolves the main image URL: the entry flagged as main, else the first
/// entry, else the placeholder.
fn select_main_image(images: &[RawProductImage], resolution: ImageResolution) -> String {
    let main = images
        .iter()
        .find(|img| img.is_main.unwrap_or(false))
        .or_else(|| images.first());

    main.map_or_else(
        || PLACEHOLDER_IMAGE.to_owned(),
        |img| match resolution {
            ImageResolution::Listing => pick_url(img.single.as_deref(), img.origin.as_deref()),
            ImageResolution::Origin => pick_url(img.origin.as_deref(), img.single.as_deref()),
        },
    )
}

fn convert_image(raw: &RawProductImage) -> ProductImage {
    ProductImage {
        url: pick_url(raw.single.as_deref(), raw.origin.as_deref()),
        origin_url: pick_url(raw.origin.as_deref(), raw.single.as_deref()),
        is_main: raw.is_main.unwrap_or(false),
    }
}

fn convert_attribute(raw: &RawProductAttribute) -> ProductAttribute {
    ProductAttribute {
        name: raw
            .attribute_name
            .clone()
            .or_else(|| raw.attribute_code.clone())
            .unwrap_or_default(),
        value: raw.option_text.clone().unwrap_or_default(),
    }
}

/// Collects the option texts of every attribute matching `code`.
///
/// Returns `None` rather than an empty list so callers can distinguish "no
/// such attribute" from "attribute with no values".
fn collect_attribute_values(attrs: &[RawProductAttribute], code: &str) -> Option<Vec<String>> {
    let values: Vec<String> = attrs
        .iter()
        .filter(|a| a.attribute_code.as_deref() == Some(code))
        .filter_map(|a| a.option_text.clone())
        .filter(|text| !text.is_empty())
        .collect();

    if values.is_empty() { None } else { Some(values) }
}

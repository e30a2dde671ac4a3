//! Integration tests for Wildflower.
//!
//! The suites under `tests/` run the catalog client and the shop grid
//! against a local `wiremock` server; nothing here talks to a real catalog.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wildflower-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP client, error mapping, and response caching
//! - `shop_grid` - grid flows end to end over the real client

use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Routes `tracing` output through the test harness.
///
/// Defaults to debug level for our crates if `RUST_LOG` is not set. Safe to
/// call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wildflower_catalog=debug,wildflower_storefront=debug".into());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Builds a raw product record shaped like the catalog API's JSON.
#[must_use]
pub fn product_json(id: i64, name: &str, price: &str) -> Value {
    json!({
        "product_id": id,
        "uuid": "7ad3da7a-2a83-4c1a-bf0c-6a8a4f4f3a10",
        "description": {
            "name": name,
            "description": format!("{name} long description"),
            "short_description": format!("{name} short"),
            "url_key": name.to_lowercase().replace(' ', "-"),
        },
        "price": price,
        "category_id": 7,
        "created_at": "2026-08-01T00:00:00Z",
        "images": [
            {
                "is_main": true,
                "single": "https://img.test/small.jpg",
                "origin": "https://img.test/full.jpg",
            }
        ],
        "attributes": [
            { "attribute_code": "color", "attribute_name": "Color", "option_text": "Moss" }
        ],
        "inventory": { "stock_availability": true, "qty": 12 },
        "meanRating": 4.5,
    })
}

/// Builds a products page envelope around `products`.
#[must_use]
pub fn products_page_json(products: Vec<Value>, total: u64) -> Value {
    json!({
        "data": products,
        "total": total,
        "totalPages": total.div_ceil(10),
    })
}

/// Builds a raw category record.
#[must_use]
pub fn category_json(id: i64, parent_id: Option<i64>, name: &str) -> Value {
    json!({
        "id": id,
        "parent_id": parent_id,
        "description": { "name": name, "image": null },
    })
}

/// Builds the category list envelope around `categories`.
#[must_use]
pub fn categories_json(categories: Vec<Value>) -> Value {
    json!({ "data": categories })
}

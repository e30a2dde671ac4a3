//! End-to-end shop grid tests over the real catalog client.
//!
//! Each test drives a [`ShopGrid`] backed by a `CatalogClient` pointed at a
//! wiremock server, exercising the full fetch-normalize-filter pipeline.

use wildflower_catalog::{CatalogClient, CatalogConfig};
use wildflower_core::CategoryId;
use wildflower_integration_tests::{
    categories_json, category_json, init_tracing, product_json, products_page_json,
};
use wildflower_storefront::{ShopGrid, SortOrder};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_grid(base_url: &str) -> ShopGrid<CatalogClient> {
    init_tracing();
    let client = CatalogClient::new(&CatalogConfig::new(base_url))
        .expect("client construction should not fail");
    ShopGrid::new(client)
}

// =============================================================================
// Search Flow
// =============================================================================

#[tokio::test]
async fn test_search_shows_matching_products() {
    let server = MockServer::start().await;

    let body = products_page_json(
        vec![
            product_json(1, "Trail Shoe", "89.99"),
            product_json(2, "Road Shoe", "119.00"),
        ],
        2,
    );

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("name", "shoe"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let mut grid = test_grid(&server.uri());
    grid.set_search("shoe").await;

    let products = grid.products();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Trail Shoe");
    assert_eq!(products[1].name, "Road Shoe");
    assert_eq!(products[0].image, "https://img.test/small.jpg");

    let pagination = grid.pagination();
    assert_eq!(pagination.current_page, 1);
    assert_eq!(pagination.page_count, 1);
    assert_eq!(pagination.total, 2);
    assert!(grid.error().is_none());
}

#[tokio::test]
async fn test_failed_search_recovers_on_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("name", "shoe"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("name", "shoe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page_json(
            vec![product_json(1, "Trail Shoe", "89.99")],
            1,
        )))
        .mount(&server)
        .await;

    let mut grid = test_grid(&server.uri());

    grid.set_search("shoe").await;
    assert!(grid.error().is_some());
    assert!(grid.products().is_empty());

    grid.retry().await;
    assert!(grid.error().is_none());
    assert_eq!(grid.products().len(), 1);
}

// =============================================================================
// Category Flow
// =============================================================================

#[tokio::test]
async fn test_category_select_filters_then_toggles_off() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("categoryId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page_json(
            vec![product_json(1, "Trail Shoe", "89.99")],
            1,
        )))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page_json(
            vec![
                product_json(1, "Trail Shoe", "89.99"),
                product_json(2, "Wool Socks", "14.00"),
            ],
            2,
        )))
        .mount(&server)
        .await;

    let mut grid = test_grid(&server.uri());

    grid.select_category(Some(CategoryId::new(7))).await;
    assert_eq!(grid.query().category_id(), Some(CategoryId::new(7)));
    assert_eq!(grid.products().len(), 1);

    grid.select_category(Some(CategoryId::new(7))).await;
    assert_eq!(grid.query().category_id(), None);
    assert_eq!(grid.products().len(), 2);
}

#[tokio::test]
async fn test_load_categories_organizes_the_tree() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&categories_json(vec![
            category_json(1, None, "Shoes"),
            category_json(2, Some(1), "Trail"),
            category_json(3, Some(1), "Road"),
            category_json(4, None, "Gift Cards"),
        ])))
        .mount(&server)
        .await;

    let grid = test_grid(&server.uri());
    let tree = grid
        .load_categories()
        .await
        .expect("categories should load");

    assert_eq!(tree.parents_with_children.len(), 1);
    assert_eq!(tree.parents_with_children[0].category.name, "Shoes");
    assert_eq!(tree.parents_with_children[0].children.len(), 2);
    assert_eq!(tree.parents_without_children.len(), 1);
    assert_eq!(tree.parents_without_children[0].name, "Gift Cards");
    assert_eq!(tree.all_with_sub.len(), 4);
}

// =============================================================================
// Local Filters
// =============================================================================

#[tokio::test]
async fn test_price_window_and_sort_apply_without_refetching() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page_json(
            vec![
                product_json(1, "Trail Shoe", "89.99"),
                product_json(2, "Wool Socks", "14.00"),
                product_json(3, "Rain Shell", "240.00"),
            ],
            3,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut grid = test_grid(&server.uri());
    grid.load().await;

    grid.set_price_range(50, 300);
    grid.set_sort(SortOrder::PriceHighToLow);

    let products = grid.products();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Rain Shell");
    assert_eq!(products[1].name, "Trail Shoe");
}

// =============================================================================
// Pagination Flow
// =============================================================================

#[tokio::test]
async fn test_page_change_refetches_within_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page_json(
            vec![product_json(11, "Page Two Pick", "30.00")],
            25,
        )))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&products_page_json(
            vec![product_json(1, "Page One Pick", "20.00")],
            25,
        )))
        .mount(&server)
        .await;

    let mut grid = test_grid(&server.uri());
    grid.load().await;
    assert_eq!(grid.pagination().page_count, 3);

    grid.set_page(2).await;
    assert_eq!(grid.pagination().current_page, 2);
    assert_eq!(grid.products()[0].name, "Page Two Pick");

    // Out of range; the grid stays put without a request.
    grid.set_page(9).await;
    assert_eq!(grid.pagination().current_page, 2);
}

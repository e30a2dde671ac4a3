//! The shop page product grid.
//!
//! [`GridState`] is the pure half: query transitions, filters, pagination
//! math, and last-write-wins bookkeeping. [`ShopGrid`] binds it to a
//! [`CatalogApi`] client and awaits one fetch per transition. Callers that
//! fetch concurrently instead must route every response back through
//! [`GridState::apply_page`] so stale ones get dropped; a dropped future
//! simply never reaches it.

mod filter;
mod state;

pub use filter::{MAX_PRICE, MIN_PRICE_GAP, PriceRange, SortOrder};
pub use state::{Effect, FetchTicket, GridState, PaginationInfo};

use tracing::instrument;
use wildflower_catalog::category::{self, Category, CategoryTree};
use wildflower_catalog::client::CatalogApi;
use wildflower_catalog::error::CatalogError;
use wildflower_catalog::query::ListingQuery;
use wildflower_catalog::types::Product;
use wildflower_core::CategoryId;

/// The product grid of the shop page: a catalog client plus [`GridState`].
pub struct ShopGrid<C> {
    client: C,
    state: GridState,
}

impl<C: CatalogApi> ShopGrid<C> {
    /// Creates a grid over `client` with the default page size.
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: GridState::new(),
        }
    }

    /// Creates a grid fetching `page_size` products per page.
    pub fn with_page_size(client: C, page_size: u32) -> Self {
        Self {
            client,
            state: GridState::with_limit(page_size),
        }
    }

    /// Fetches the first page for the current query.
    pub async fn load(&mut self) {
        self.refetch().await;
    }

    /// Replaces the search text and reloads from page 1.
    pub async fn set_search(&mut self, text: &str) {
        let effect = self.state.set_search(text);
        self.apply_effect(effect).await;
    }

    /// Selects a category, or clears it when tapped again.
    pub async fn select_category(&mut self, category_id: Option<CategoryId>) {
        let effect = self.state.select_category(category_id);
        self.apply_effect(effect).await;
    }

    /// Moves to `page` when it is in range and not already shown.
    pub async fn set_page(&mut self, page: u32) {
        let effect = self.state.set_page(page);
        self.apply_effect(effect).await;
    }

    /// Clears every filter and reloads.
    pub async fn reset(&mut self) {
        let effect = self.state.reset();
        self.apply_effect(effect).await;
    }

    /// Reissues the current query, typically after a failed fetch.
    pub async fn retry(&mut self) {
        self.refetch().await;
    }

    /// Moves the lower price handle. No request; the grid re-filters locally.
    pub fn set_min_price(&mut self, min: u32) {
        self.state.set_min_price(min);
    }

    /// Moves the upper price handle.
    pub fn set_max_price(&mut self, max: u32) {
        self.state.set_max_price(max);
    }

    /// Replaces both price handles in one step.
    pub fn set_price_range(&mut self, min: u32, max: u32) {
        self.state.set_price_range(min, max);
    }

    /// Changes the sort order.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.state.set_sort(sort);
    }

    /// Products to show, price window and sort applied.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.products()
    }

    /// Pagination for the current query.
    #[must_use]
    pub fn pagination(&self) -> PaginationInfo {
        self.state.pagination()
    }

    /// Active query.
    #[must_use]
    pub fn query(&self) -> &ListingQuery {
        self.state.query()
    }

    /// The error from the most recent failed fetch, if any.
    #[must_use]
    pub fn error(&self) -> Option<&CatalogError> {
        self.state.error()
    }

    /// Full grid state, for callers needing the rest of the read model.
    #[must_use]
    pub const fn state(&self) -> &GridState {
        &self.state
    }

    /// Loads the category list and organizes it into the tree groupings.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    pub async fn load_categories(&self) -> Result<CategoryTree, CatalogError> {
        let raw = self.client.fetch_categories().await?;
        let categories: Vec<Category> = raw.iter().map(Category::from_raw).collect();
        Ok(category::organize(&categories))
    }

    async fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Refetch => self.refetch().await,
        }
    }

    #[instrument(skip(self), fields(page = self.state.query().page()))]
    async fn refetch(&mut self) {
        let (ticket, query) = self.state.begin_fetch();
        let outcome = self.client.fetch_products(&query).await;
        self.state.apply_page(ticket, outcome);
    }
}

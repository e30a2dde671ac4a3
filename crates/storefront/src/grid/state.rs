//! Pure state machine for the shop grid.

use tracing::warn;
use wildflower_catalog::error::CatalogError;
use wildflower_catalog::normalize::{ImageResolution, normalize_product};
use wildflower_catalog::query::ListingQuery;
use wildflower_catalog::types::Product;
use wildflower_catalog::wire::RawProductPage;
use wildflower_core::CategoryId;

use super::filter::{self, PriceRange, SortOrder};

/// Ticket identifying one fetch started by [`GridState::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What the caller must do after a transition.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing; the change was local.
    None,
    /// The query changed; fetch a fresh page.
    Refetch,
}

/// Pagination read model for the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    /// 1-based page currently selected.
    pub current_page: u32,
    /// Total pages at the current page size.
    pub page_count: u32,
    /// Total products matching the query, across all pages.
    pub total: u64,
}

#[derive(Debug, Clone)]
struct FetchedPage {
    products: Vec<Product>,
    total: u64,
}

// =============================================================================
// GridState
// =============================================================================

/// Grid state: the active query, local filters, and the last fetched page.
///
/// Owns no I/O. Query transitions return an [`Effect`] telling the caller
/// whether to refetch; every response, in order or not, must come back
/// through [`Self::apply_page`], which drops any that are not for the newest
/// [`FetchTicket`]. Overlapping fetches therefore settle on the newest one.
#[derive(Debug, Default)]
pub struct GridState {
    query: ListingQuery,
    price_range: PriceRange,
    sort: SortOrder,
    page: Option<FetchedPage>,
    error: Option<CatalogError>,
    latest_ticket: u64,
    in_flight: bool,
}

impl GridState {
    /// Creates a grid with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid fetching `limit` products per page.
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        let mut state = Self::default();
        state.query.set_limit(Some(limit));
        state
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Replaces the search text and restarts from page 1.
    ///
    /// Always refetches, even for unchanged text: the caller debounces
    /// keystrokes, so by the time this runs the text is worth a request.
    pub fn set_search(&mut self, text: &str) -> Effect {
        self.query.set_name(text);
        self.query.set_page(1);
        Effect::Refetch
    }

    /// Selects a category, or toggles it off when it is already selected.
    pub fn select_category(&mut self, category_id: Option<CategoryId>) -> Effect {
        let next = if category_id.is_some() && category_id == self.query.category_id() {
            None
        } else {
            category_id
        };
        self.query.set_category(next);
        self.query.set_page(1);
        Effect::Refetch
    }

    /// Moves to `page`, ignoring requests that are out of range or already
    /// current.
    pub fn set_page(&mut self, page: u32) -> Effect {
        if page < 1 || page == self.query.page() || page > self.pagination().page_count {
            return Effect::None;
        }
        self.query.set_page(page);
        Effect::Refetch
    }

    /// Clears search, category, price window, and sort in one step, keeping
    /// the configured page size.
    pub fn reset(&mut self) -> Effect {
        let limit = self.query.limit();
        self.query = ListingQuery::default();
        self.query.set_limit(limit);
        self.price_range = PriceRange::default();
        self.sort = SortOrder::default();
        Effect::Refetch
    }

    /// Moves the lower price handle. Local only; reads re-filter the page.
    pub fn set_min_price(&mut self, min: u32) {
        self.price_range.set_min(min);
    }

    /// Moves the upper price handle. Local only.
    pub fn set_max_price(&mut self, max: u32) {
        self.price_range.set_max(max);
    }

    /// Replaces both price handles in one step. Local only.
    pub fn set_price_range(&mut self, min: u32, max: u32) {
        self.price_range = PriceRange::new(min, max);
    }

    /// Changes the sort order. Local only.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    // =========================================================================
    // Fetch Protocol
    // =========================================================================

    /// Starts a fetch: bumps the ticket and returns it with the query to run.
    pub fn begin_fetch(&mut self) -> (FetchTicket, ListingQuery) {
        self.latest_ticket += 1;
        self.in_flight = true;
        (FetchTicket(self.latest_ticket), self.query.clone())
    }

    /// Applies one fetch outcome.
    ///
    /// Responses for any ticket but the newest are dropped. A failure keeps
    /// the previous page on screen and records the error; a success clears
    /// it.
    pub fn apply_page(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<RawProductPage, CatalogError>,
    ) {
        if ticket.0 != self.latest_ticket {
            warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "ignoring stale products response"
            );
            return;
        }
        self.in_flight = false;

        match outcome {
            Ok(page) => {
                self.page = Some(FetchedPage {
                    products: page
                        .data
                        .iter()
                        .map(|raw| normalize_product(raw, ImageResolution::Listing))
                        .collect(),
                    total: page.total,
                });
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    // =========================================================================
    // Read Model
    // =========================================================================

    /// Active query.
    #[must_use]
    pub const fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Active price window.
    #[must_use]
    pub const fn price_range(&self) -> PriceRange {
        self.price_range
    }

    /// Active sort order.
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Products to show: the fetched page with the price window and sort
    /// applied. Empty before the first page arrives.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.page
            .as_ref()
            .map(|page| filter::apply(&page.products, self.price_range, self.sort))
            .unwrap_or_default()
    }

    /// Pagination computed from the server-reported total and the page size.
    #[must_use]
    pub fn pagination(&self) -> PaginationInfo {
        let total = self.page.as_ref().map_or(0, |page| page.total);
        let page_count =
            u32::try_from(total.div_ceil(u64::from(self.query.page_size()))).unwrap_or(u32::MAX);
        PaginationInfo {
            current_page: self.query.page(),
            page_count,
            total,
        }
    }

    /// The error from the most recent failed fetch, until one succeeds.
    #[must_use]
    pub const fn error(&self) -> Option<&CatalogError> {
        self.error.as_ref()
    }

    /// Whether the newest fetch is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }
}

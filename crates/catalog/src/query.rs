//! Listing query parameters for the products endpoint.

use wildflower_core::CategoryId;

/// Page size used when the caller sets no explicit limit.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page's worth of listing filters, as sent to `/api/products`.
///
/// Fields are private so every query the client sees is well-formed: the page
/// is at least 1, the name filter is trimmed and never empty, and a zero
/// limit cannot be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    page: u32,
    limit: Option<u32>,
    name: Option<String>,
    category_id: Option<CategoryId>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            name: None,
            category_id: None,
        }
    }
}

impl ListingQuery {
    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Explicit page size, when one was set.
    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Effective page size, for pagination math.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Active search text, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Active category filter, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Sets the page, clamping to 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Sets the page size; zero is treated as unset.
    pub fn set_limit(&mut self, limit: Option<u32>) {
        self.limit = limit.filter(|l| *l > 0);
    }

    /// Sets the search text. Whitespace is trimmed and an empty result clears
    /// the filter entirely.
    pub fn set_name(&mut self, name: &str) {
        let trimmed = name.trim();
        self.name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        };
    }

    /// Clears the search text.
    pub fn clear_name(&mut self) {
        self.name = None;
    }

    /// Sets or clears the category filter.
    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
    }

    /// Key/value pairs for the request URL. Unset filters are omitted rather
    /// than sent empty.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryId", category_id.to_string()));
        }
        pairs
    }
}

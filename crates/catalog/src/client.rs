//! Catalog API client implementation.
//!
//! Talks to the catalog's JSON endpoints with `reqwest` and caches responses
//! using `moka` (5-minute TTL by default).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

use crate::cache::{CacheKey, CacheValue};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::query::ListingQuery;
use crate::wire::{RawCategory, RawCategoryList, RawProductPage};

// =============================================================================
// CatalogApi
// =============================================================================

/// The catalog operations the storefront consumes.
///
/// [`CatalogClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait CatalogApi {
    /// Fetch one page of products matching `query`.
    fn fetch_products(
        &self,
        query: &ListingQuery,
    ) -> impl Future<Output = Result<RawProductPage, CatalogError>> + Send;

    /// Fetch the full flat category list.
    fn fetch_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<RawCategory>, CatalogError>> + Send;
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog API.
///
/// Cloning is cheap and shares the connection pool and response cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
    categories_url: Url,
    access_token: Option<String>,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL does not parse or the
    /// HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("wildflower/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Keep a trailing slash so Url::join extends the path instead of
        // replacing its last segment.
        let base = format!("{}/", config.api_url.trim_end_matches('/'));
        let base = Url::parse(&base)
            .map_err(|e| CatalogError::InvalidBaseUrl(format!("{}: {e}", config.api_url)))?;
        let products_url = base
            .join("api/products")
            .map_err(|e| CatalogError::InvalidBaseUrl(e.to_string()))?;
        let categories_url = base
            .join("api/categories")
            .map_err(|e| CatalogError::InvalidBaseUrl(e.to_string()))?;

        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                products_url,
                categories_url,
                access_token: config
                    .access_token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
                cache,
            }),
        })
    }

    /// Builds the products request URL for `query`.
    fn products_url(&self, query: &ListingQuery) -> Url {
        let mut url = self.inner.products_url.clone();
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        url
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        // Get the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body, status),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to decode catalog response"
            );
            CatalogError::Decode {
                context: context.to_string(),
                source: e,
            }
        })
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached responses.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip(self), fields(page = query.page(), name = query.name()))]
    async fn fetch_products(&self, query: &ListingQuery) -> Result<RawProductPage, CatalogError> {
        let url = self.products_url(query);
        let cache_key = CacheKey::Products(url.query().unwrap_or_default().to_owned());

        // Search results churn with every keystroke; only cache unsearched pages.
        let cacheable = query.name().is_none();
        if cacheable
            && let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(page);
        }

        let page: RawProductPage = self.get_json(url, "products page").await?;

        if cacheable {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(page.clone()))
                .await;
        }

        Ok(page)
    }

    #[instrument(skip(self))]
    async fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let list: RawCategoryList = self
            .get_json(self.inner.categories_url.clone(), "category list")
            .await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(list.data.clone()),
            )
            .await;

        Ok(list.data)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Pulls the `message` field out of an error body, falling back to the
/// status line when the body is not the expected JSON shape.
fn extract_error_message(body: &str, status: reqwest::StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("HTTP {status}"))
}

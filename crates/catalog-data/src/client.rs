//! Catalog client over an HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use catalog_core::catalog::{Category, Product};
use catalog_core::search::{CatalogQuery, CatalogResponse, ListingQuery};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::endpoints::{Endpoints, DEFAULT_BASE_URL};
use crate::error::{CatalogError, FetchError};
use crate::response::HttpResponse;
use crate::transport::{HttpTransport, ReqwestTransport, TransportConfig};

const PRODUCTS_CONTEXT: &str = "Failed to fetch products";
const CATEGORIES_CONTEXT: &str = "Failed to fetch categories";

/// Retrieval operations the catalog pages need.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Server-paged listing, or search when the query carries search text.
    async fn list_products(&self, query: &ListingQuery) -> Result<CatalogResponse, CatalogError>;

    /// Every product in a category.
    async fn list_by_category(&self, slug: &str) -> Result<CatalogResponse, CatalogError>;

    /// Full product record including reviews.
    async fn get_product(&self, id: &str) -> Result<Product, CatalogError>;

    /// All categories, in service order.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Execute a derived catalog query.
    async fn fetch(&self, query: &CatalogQuery) -> Result<CatalogResponse, CatalogError> {
        match query {
            CatalogQuery::Listing(listing) | CatalogQuery::Search(listing) => {
                self.list_products(listing).await
            }
            CatalogQuery::CategoryFetch { slug } => self.list_by_category(slug).await,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: TransportConfig::default().timeout,
        }
    }
}

/// Envelope as sent on the wire. Category responses may omit the counters.
#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    products: Option<Vec<Product>>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    skip: Option<u64>,
    #[serde(default)]
    limit: Option<u64>,
}

impl From<RawEnvelope> for CatalogResponse {
    fn from(raw: RawEnvelope) -> Self {
        CatalogResponse {
            products: raw.products.unwrap_or_default(),
            total: raw.total.unwrap_or(0),
            offset: raw.skip.unwrap_or(0),
            limit: raw.limit.unwrap_or(0),
        }
    }
}

/// [`CatalogApi`] implementation against the product-data service.
pub struct CatalogClient<T: HttpTransport = ReqwestTransport> {
    endpoints: Endpoints,
    transport: T,
}

impl CatalogClient<ReqwestTransport> {
    /// Connect with the production transport.
    pub fn connect(config: &ClientConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(&TransportConfig::from_timeout(config.timeout))?;
        Self::with_transport(&config.base_url, transport)
    }
}

impl<T: HttpTransport> CatalogClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self, FetchError> {
        Ok(Self {
            endpoints: Endpoints::new(base_url)?,
            transport,
        })
    }

    /// URL builder in use.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        debug!(url = %url, "GET");
        let resp = self.transport.get(url).await?;
        debug!(url = %url, status = resp.status.as_u16(), bytes = resp.body.len(), "response");
        Ok(resp)
    }

    async fn envelope(&self, url: Url) -> Result<CatalogResponse, CatalogError> {
        let raw: RawEnvelope = self.get_json(&url, PRODUCTS_CONTEXT).await?;
        Ok(raw.into())
    }

    async fn get_json<D: DeserializeOwned>(
        &self,
        url: &Url,
        context: &'static str,
    ) -> Result<D, FetchError> {
        let result = match self.send(url).await {
            Ok(resp) => resp
                .error_for_status(url.as_str(), context)
                .and_then(|resp| resp.json()),
            Err(e) => Err(e),
        };
        logged(url, result)
    }
}

/// Log a failed request once, whichever operation issued it.
fn logged<R, E: std::fmt::Display>(url: &Url, result: Result<R, E>) -> Result<R, E> {
    result.inspect_err(|e| warn!(url = %url, error = %e, "catalog request failed"))
}

#[async_trait]
impl<T: HttpTransport> CatalogApi for CatalogClient<T> {
    async fn list_products(&self, query: &ListingQuery) -> Result<CatalogResponse, CatalogError> {
        let url = self.endpoints.listing(query)?;
        self.envelope(url).await
    }

    async fn list_by_category(&self, slug: &str) -> Result<CatalogResponse, CatalogError> {
        let url = self.endpoints.category(slug)?;
        self.envelope(url).await
    }

    async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        let url = self.endpoints.product(id)?;
        let result = match self.send(&url).await {
            Ok(resp) if !resp.is_success() => {
                debug!(id, status = resp.status.as_u16(), "product not found");
                Err(CatalogError::NotFound { id: id.to_string() })
            }
            Ok(resp) => resp.json().map_err(CatalogError::from),
            Err(e) => Err(e.into()),
        };
        logged(&url, result)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoints.categories()?;
        Ok(self.get_json(&url, CATEGORIES_CONTEXT).await?)
    }
}

//! URL construction for the product-data service.
//!
//! Endpoints used:
//! - `GET /products` (limit, skip, sortBy, order, select)
//! - `GET /products/search?q=` (same parameters)
//! - `GET /products/category/{slug}` (limit=0 for all, select)
//! - `GET /products/categories`
//! - `GET /products/{id}` (full payload)

use catalog_core::search::ListingQuery;
use url::Url;

use crate::error::FetchError;

/// Default product-data service.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Fields needed for list views and cards.
pub const LIST_SELECT: &str = "id,title,thumbnail,price,discountPercentage,rating,category,brand";

/// List fields plus `meta`, so category results can be date-sorted locally.
pub const CATEGORY_SELECT: &str =
    "id,title,thumbnail,price,discountPercentage,rating,category,brand,meta";

/// Builds request URLs against a base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Create endpoints for a base URL such as `https://dummyjson.com`.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        Ok(Self { base })
    }

    /// The base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn path(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Listing or search URL. Blank search text falls back to the listing.
    pub fn listing(&self, query: &ListingQuery) -> Result<Url, FetchError> {
        let search = query.search_text();
        let mut url = match search {
            Some(_) => self.path(&["products", "search"])?,
            None => self.path(&["products"])?,
        };

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = search {
                pairs.append_pair("q", q);
            }
            pairs
                .append_pair("limit", &query.limit.to_string())
                .append_pair("skip", &query.offset.to_string())
                .append_pair("sortBy", query.sort_field.as_str())
                .append_pair("order", query.sort_direction.as_str())
                .append_pair("select", LIST_SELECT);
        }

        Ok(url)
    }

    /// Whole-category URL (`limit=0` asks for every item).
    pub fn category(&self, slug: &str) -> Result<Url, FetchError> {
        let mut url = self.path(&["products", "category", slug])?;
        url.query_pairs_mut()
            .append_pair("limit", "0")
            .append_pair("select", CATEGORY_SELECT);
        Ok(url)
    }

    /// Single-product URL.
    pub fn product(&self, id: &str) -> Result<Url, FetchError> {
        self.path(&["products", id])
    }

    /// Category list URL.
    pub fn categories(&self) -> Result<Url, FetchError> {
        self.path(&["products", "categories"])
    }
}

//! Sort options and query derivation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Field the product-data service sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Price,
}

impl SortField {
    /// Wire name for the `sortBy` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Price => "price",
        }
    }
}

/// Sort direction for the `order` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort options offered by the catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Newest first.
    #[serde(rename = "newest")]
    Newest,
    /// Oldest first.
    #[serde(rename = "oldest")]
    Oldest,
    /// Price, low to high.
    #[default]
    #[serde(rename = "price-asc")]
    PriceAsc,
    /// Price, high to low.
    #[serde(rename = "price-desc")]
    PriceDesc,
}

impl SortOption {
    /// All options in picker order.
    pub const ALL: [SortOption; 4] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    /// Stable identifier, e.g. `price-asc`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::Oldest => "Oldest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }

    /// Server-side sort parameters.
    ///
    /// The service has no creation-date sort, so "newest" and "oldest" use
    /// id order.
    pub fn server_params(&self) -> (SortField, SortDirection) {
        match self {
            SortOption::Newest => (SortField::Id, SortDirection::Desc),
            SortOption::Oldest => (SortField::Id, SortDirection::Asc),
            SortOption::PriceAsc => (SortField::Price, SortDirection::Asc),
            SortOption::PriceDesc => (SortField::Price, SortDirection::Desc),
        }
    }

    /// Local comparator matching [`SortOption::server_params`].
    ///
    /// Date ordering uses the creation timestamp; products without metadata
    /// sort as if created at epoch 0.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Newest => b.created_at_millis().cmp(&a.created_at_millis()),
            SortOption::Oldest => a.created_at_millis().cmp(&b.created_at_millis()),
            SortOption::PriceAsc => a.price.total_cmp(&b.price),
            SortOption::PriceDesc => b.price.total_cmp(&a.price),
        }
    }

    /// Sort a full result set in place. The sort is stable, so ties keep
    /// the order the service returned.
    pub fn sort(&self, products: &mut [Product]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "oldest" => Ok(SortOption::Oldest),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            other => Err(format!(
                "unknown sort option '{}' (expected newest, oldest, price-asc or price-desc)",
                other
            )),
        }
    }
}

/// A server-paged listing or search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Page size.
    pub limit: u32,
    /// Number of items to skip.
    pub offset: u64,
    /// Server-side sort field.
    pub sort_field: SortField,
    /// Server-side sort direction.
    pub sort_direction: SortDirection,
    /// Optional free-text search.
    pub search: Option<String>,
}

impl ListingQuery {
    /// Build a listing for a page of the given size and sort option.
    pub fn new(page_index: u32, page_size: u32, sort: SortOption) -> Self {
        let (sort_field, sort_direction) = sort.server_params();
        Self {
            limit: page_size,
            offset: u64::from(page_index) * u64::from(page_size),
            sort_field,
            sort_direction,
            search: None,
        }
    }

    /// Attach search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Trimmed search text, or `None` when it is absent or blank.
    pub fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// The query the catalog page derives from its filter state.
///
/// Exactly one shape is active per request. A selected category takes
/// precedence over search text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogQuery {
    /// Unfiltered, server-paged listing.
    Listing(ListingQuery),
    /// Server-paged free-text search. The search text is never blank.
    Search(ListingQuery),
    /// Whole-category fetch; sorting and paging happen locally.
    CategoryFetch {
        /// Category slug.
        slug: String,
    },
}

impl CatalogQuery {
    /// Derive the query for a page state.
    pub fn derive(
        category: Option<&str>,
        search: &str,
        sort: SortOption,
        page_index: u32,
        page_size: u32,
    ) -> Self {
        if let Some(slug) = category.filter(|c| !c.is_empty()) {
            return CatalogQuery::CategoryFetch {
                slug: slug.to_string(),
            };
        }

        let listing = ListingQuery::new(page_index, page_size, sort);
        let text = search.trim();
        if text.is_empty() {
            CatalogQuery::Listing(listing)
        } else {
            CatalogQuery::Search(listing.with_search(text))
        }
    }

    /// Whether sorting and paging are done locally.
    pub fn is_category(&self) -> bool {
        matches!(self, CatalogQuery::CategoryFetch { .. })
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogQuery::Listing(_) => "listing",
            CatalogQuery::Search(_) => "search",
            CatalogQuery::CategoryFetch { .. } => "category",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductMeta;

    fn priced(id: u64, price: f64) -> Product {
        Product {
            id,
            title: format!("p{}", id),
            price,
            ..Default::default()
        }
    }

    fn created(id: u64, ts: Option<&str>) -> Product {
        Product {
            id,
            title: format!("p{}", id),
            meta: ts.map(|t| ProductMeta {
                created_at: Some(t.to_string()),
                updated_at: None,
            }),
            ..Default::default()
        }
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_server_params_table() {
        assert_eq!(
            SortOption::Newest.server_params(),
            (SortField::Id, SortDirection::Desc)
        );
        assert_eq!(
            SortOption::Oldest.server_params(),
            (SortField::Id, SortDirection::Asc)
        );
        assert_eq!(
            SortOption::PriceAsc.server_params(),
            (SortField::Price, SortDirection::Asc)
        );
        assert_eq!(
            SortOption::PriceDesc.server_params(),
            (SortField::Price, SortDirection::Desc)
        );
    }

    #[test]
    fn test_sort_option_parse() {
        assert_eq!("price-desc".parse::<SortOption>(), Ok(SortOption::PriceDesc));
        assert_eq!(" Newest ".parse::<SortOption>(), Ok(SortOption::Newest));
        assert!("rating".parse::<SortOption>().is_err());
        assert_eq!(SortOption::default(), SortOption::PriceAsc);
    }

    #[test]
    fn test_local_price_sort() {
        let mut products = vec![priced(1, 30.0), priced(2, 10.0), priced(3, 20.0)];
        SortOption::PriceAsc.sort(&mut products);
        assert_eq!(ids(&products), vec![2, 3, 1]);

        SortOption::PriceDesc.sort(&mut products);
        assert_eq!(ids(&products), vec![1, 3, 2]);
    }

    #[test]
    fn test_local_date_sort_missing_meta_is_epoch() {
        let mut products = vec![
            created(1, Some("2024-05-23T08:56:21.618Z")),
            created(2, None),
            created(3, Some("2025-01-01T00:00:00Z")),
        ];
        SortOption::Newest.sort(&mut products);
        assert_eq!(ids(&products), vec![3, 1, 2]);

        SortOption::Oldest.sort(&mut products);
        assert_eq!(ids(&products), vec![2, 1, 3]);
    }

    #[test]
    fn test_local_sort_is_stable() {
        let mut products = vec![priced(4, 5.0), priced(2, 5.0), priced(9, 1.0)];
        SortOption::PriceAsc.sort(&mut products);
        assert_eq!(ids(&products), vec![9, 4, 2]);
    }

    #[test]
    fn test_derive_category_takes_precedence() {
        let q = CatalogQuery::derive(Some("beauty"), "phone", SortOption::PriceAsc, 3, 8);
        assert_eq!(
            q,
            CatalogQuery::CategoryFetch {
                slug: "beauty".to_string()
            }
        );
        assert!(q.is_category());
    }

    #[test]
    fn test_derive_search_trims() {
        let q = CatalogQuery::derive(None, "  phone ", SortOption::Newest, 1, 8);
        match q {
            CatalogQuery::Search(listing) => {
                assert_eq!(listing.search_text(), Some("phone"));
                assert_eq!(listing.offset, 8);
                assert_eq!(listing.limit, 8);
                assert_eq!(listing.sort_field, SortField::Id);
                assert_eq!(listing.sort_direction, SortDirection::Desc);
            }
            other => panic!("expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_derive_blank_search_is_listing() {
        let q = CatalogQuery::derive(Some(""), "   ", SortOption::PriceAsc, 0, 8);
        assert_eq!(q, CatalogQuery::Listing(ListingQuery::new(0, 8, SortOption::PriceAsc)));
        assert_eq!(q.kind(), "listing");
    }

    #[test]
    fn test_listing_search_text_blank() {
        let listing = ListingQuery::new(0, 8, SortOption::PriceAsc).with_search("  ");
        assert_eq!(listing.search_text(), None);
    }
}

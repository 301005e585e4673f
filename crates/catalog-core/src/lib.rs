//! Catalog domain types and logic.
//!
//! This crate holds everything about the catalog that does not touch the
//! network:
//!
//! - **Catalog**: products, reviews, categories and their display helpers
//! - **Search**: sort options, the derived catalog query, pagination and the
//!   response envelope
//! - **Failure**: turning an arbitrary failure value into a display message
//!
//! # Example
//!
//! ```rust
//! use catalog_core::prelude::*;
//!
//! let query = CatalogQuery::derive(None, "  phone ", SortOption::PriceAsc, 0, 8);
//! assert!(matches!(query, CatalogQuery::Search(_)));
//!
//! let pagination = Pagination::new(0, 8, 32);
//! assert_eq!(pagination.total_pages(), 4);
//! ```

pub mod catalog;
pub mod failure;
pub mod search;

pub use failure::{failure_message, DEFAULT_FAILURE_MESSAGE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::failure::{failure_message, DEFAULT_FAILURE_MESSAGE};

    // Catalog
    pub use crate::catalog::{category_label, star_rating, Category, Product, ProductMeta, Review};

    // Search
    pub use crate::search::{
        CatalogQuery, CatalogResponse, ListingQuery, Pagination, SortDirection, SortField,
        SortOption,
    };
}

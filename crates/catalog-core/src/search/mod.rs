//! Search module.
//!
//! Contains sort options, the derived catalog query, pagination and the
//! response envelope.

mod query;
mod results;

pub use query::{CatalogQuery, ListingQuery, SortDirection, SortField, SortOption};
pub use results::{CatalogResponse, Pagination};

//! Remote catalog client.
//!
//! This crate provides:
//! - `CatalogApi` - the four retrieval operations the catalog pages need
//! - `CatalogClient` - `CatalogApi` over an `HttpTransport`
//! - `ReqwestTransport` - production transport with a request timeout
//! - `Endpoints` - URL construction for the product-data service
//! - `FetchError` / `CatalogError` - failure taxonomy

mod client;
mod endpoints;
mod error;
mod response;
mod transport;

pub use client::*;
pub use endpoints::*;
pub use error::*;
pub use response::*;
pub use transport::*;

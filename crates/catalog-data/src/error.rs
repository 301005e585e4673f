//! Catalog client error types.

use thiserror::Error;

/// Errors from a single request to the product-data service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The service answered with a non-success status.
    ///
    /// Displays only the user-facing context; status and URL are kept for logs.
    #[error("{context}")]
    Status {
        status: u16,
        url: String,
        context: &'static str,
    },

    /// Failed to send the request or read the body.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Failed to parse the response body.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}

/// Errors surfaced by [`CatalogApi`](crate::CatalogApi) operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Listing, category or transport failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Detail fetch for an id the service does not know.
    #[error("Product not found")]
    NotFound { id: String },
}

impl CatalogError {
    /// Whether this is a detail not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// HTTP status, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Fetch(FetchError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

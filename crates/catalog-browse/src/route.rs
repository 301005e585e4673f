//! Path routing.

use std::fmt;

/// A view the navigation layer can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The catalog page at `/`.
    Catalog,
    /// The detail page at `/products/{id}`.
    Detail(String),
    /// Anything else.
    NotFound,
}

impl Route {
    /// Map a path to a route. Query strings and fragments are ignored, as is
    /// a trailing slash.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        if path.is_empty() {
            return Route::Catalog;
        }

        let mut segments = path.trim_start_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("products"), Some(id), None) if !id.is_empty() => Route::Detail(id.to_string()),
            _ => Route::NotFound,
        }
    }

    /// Path for a product's detail page.
    pub fn detail(id: u64) -> Self {
        Route::Detail(id.to_string())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Catalog => f.write_str("/"),
            Route::Detail(id) => write!(f, "/products/{}", id),
            Route::NotFound => f.write_str("(not found)"),
        }
    }
}

//! Catalog page state and request orchestration.
//!
//! This crate provides:
//! - `CatalogController` - page state, query derivation and stale-response discard
//! - `CatalogSession` - async driver that executes fetch plans on tokio
//! - `Debouncer` - quiescence-window delay for rapidly-changing input
//! - `DetailController` - product detail view state
//! - `Picker` - single-select option control
//! - `Route` - catalog/detail path mapping

mod controller;
mod debounce;
mod detail;
mod lifecycle;
mod picker;
mod route;
mod session;
mod settings;
mod state;

pub use controller::*;
pub use debounce::*;
pub use detail::*;
pub use lifecycle::*;
pub use picker::*;
pub use route::*;
pub use session::*;
pub use settings::*;
pub use state::*;

/// Fallback message for failures that carry no message of their own.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load";

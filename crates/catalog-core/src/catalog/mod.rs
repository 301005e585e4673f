//! Catalog module.
//!
//! Contains product, review and category types as served by the
//! product-data service.

mod category;
mod product;

pub use category::{category_label, Category};
pub use product::{star_rating, Product, ProductMeta, Review};

//! Product detail view state.

use std::error::Error as StdError;

use catalog_core::catalog::{category_label, star_rating, Product};
use catalog_core::failure_message;
use catalog_data::CatalogApi;
use serde::Serialize;
use tracing::debug;

use crate::lifecycle::{Completion, Lifecycle};
use crate::LOAD_FAILURE_MESSAGE;

/// Message shown when the detail fetch fails without one of its own.
pub const NOT_FOUND_MESSAGE: &str = "Product not found";

/// Where the "back" link of the detail view points.
pub const CATALOG_PATH: &str = "/";

/// A detail fetch the caller must execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPlan {
    /// Cycle this fetch belongs to.
    pub generation: u64,
    /// Product id to fetch.
    pub id: String,
}

/// Display fields derived from a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Category label, e.g. `Mens & Shirts`.
    pub category: String,
    pub brand: String,
    pub price: f64,
    /// Price after discount.
    pub display_price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    /// Filled stars out of five.
    pub stars: u8,
    pub stock: u32,
    /// Service SKU, or one synthesised from the id.
    pub sku: String,
    /// First gallery image, else the thumbnail.
    pub image: String,
    pub tags: Vec<String>,
    /// Number of reviews.
    pub reviews: usize,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            category: category_label(&p.category),
            brand: p.brand.clone(),
            price: p.price,
            display_price: p.display_price(),
            discount_percentage: p.discount_percentage,
            rating: p.rating,
            stars: star_rating(p.rating),
            stock: p.stock,
            sku: p.display_sku(),
            image: p.main_image().to_string(),
            tags: p.tags(),
            reviews: p.reviews.len(),
        }
    }
}

/// State of the detail view for one product at a time.
///
/// Opening another product supersedes the previous fetch; its late response
/// is discarded.
#[derive(Debug, Default)]
pub struct DetailController {
    generation: u64,
    id: Option<String>,
    lifecycle: Lifecycle<Product>,
}

impl DetailController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading a product.
    pub fn open(&mut self, id: &str) -> DetailPlan {
        self.generation += 1;
        self.id = Some(id.to_string());
        self.lifecycle = Lifecycle::Loading;
        DetailPlan {
            generation: self.generation,
            id: id.to_string(),
        }
    }

    /// Hand back the outcome of a plan.
    pub fn complete(&mut self, generation: u64, result: Result<Product, String>) -> Completion {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale detail response");
            return Completion::Stale;
        }
        self.lifecycle = Lifecycle::from_result(result);
        Completion::Applied
    }

    /// Open `id`, fetch it from `api` and apply the result.
    pub async fn load<A>(&mut self, api: &A, id: &str) -> &Lifecycle<Product>
    where
        A: CatalogApi + ?Sized,
    {
        let plan = self.open(id);
        let result = api.get_product(&plan.id).await.map_err(|e| {
            let e: Box<dyn StdError + Send + Sync> = Box::new(e);
            failure_message(&e, LOAD_FAILURE_MESSAGE)
        });
        self.complete(plan.generation, result);
        &self.lifecycle
    }

    /// Product id currently shown.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Lifecycle of the latest fetch.
    pub fn lifecycle(&self) -> &Lifecycle<Product> {
        &self.lifecycle
    }

    /// The loaded product.
    pub fn product(&self) -> Option<&Product> {
        self.lifecycle.loaded()
    }

    /// Message for the fallback view, or `None` while loading or loaded.
    pub fn failure(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Errored(message) if !message.is_empty() => Some(message),
            Lifecycle::Errored(_) => Some(NOT_FOUND_MESSAGE),
            _ => None,
        }
    }
}

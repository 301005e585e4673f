//! Product and review types.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Number of stars on the rating scale.
const MAX_STARS: u8 = 5;

/// Creation/update timestamps attached to a product.
///
/// Kept as the raw strings the service sends; use [`Product::created_at_millis`]
/// for ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// RFC 3339 last-update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A customer review. Owned by exactly one product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Rating from 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
    /// Timestamp of the review.
    #[serde(default)]
    pub date: String,
    /// Reviewer display name.
    #[serde(default)]
    pub reviewer_name: String,
    /// Reviewer email.
    #[serde(default)]
    pub reviewer_email: String,
}

/// A product in the catalog.
///
/// List views request a field projection, so everything except `id` and
/// `title` defaults when the service leaves it out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier assigned by the product-data service.
    pub id: u64,
    /// Product title.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// List price.
    #[serde(default)]
    pub price: f64,
    /// Discount in percent (0-100).
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average rating (0.0-5.0).
    #[serde(default)]
    pub rating: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Gallery image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Availability status, e.g. "In Stock".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<String>,
    /// Creation/update metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Reviews (detail payloads only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Price after applying the discount, if any.
    pub fn display_price(&self) -> f64 {
        if self.discount_percentage > 0.0 {
            self.price * (1.0 - self.discount_percentage / 100.0)
        } else {
            self.price
        }
    }

    /// Creation time in milliseconds since the epoch.
    ///
    /// Missing or unparsable metadata counts as epoch 0.
    pub fn created_at_millis(&self) -> i64 {
        self.meta
            .as_ref()
            .and_then(|m| m.created_at.as_deref())
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }

    /// Main image for the detail view: first gallery image, else the thumbnail.
    pub fn main_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(&self.thumbnail)
    }

    /// SKU to display, synthesised from the id when the service has none.
    pub fn display_sku(&self) -> String {
        match &self.sku {
            Some(sku) if !sku.is_empty() => sku.clone(),
            _ => format!("HL-{:03}", self.id),
        }
    }

    /// Up to four tags: category, brand (lower-cased) and "quality".
    pub fn tags(&self) -> Vec<String> {
        [
            self.category.clone(),
            self.brand.to_lowercase(),
            "quality".to_string(),
        ]
        .into_iter()
        .filter(|t| !t.is_empty())
        .take(4)
        .collect()
    }
}

/// Number of filled stars for a rating, out of five.
pub fn star_rating(rating: f64) -> u8 {
    if !rating.is_finite() || rating <= 0.0 {
        return 0;
    }
    (rating.floor() as u8).min(MAX_STARS)
}

//! Category types for the filter control.

use serde::{Deserialize, Serialize};

/// A product category as listed by the product-data service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Category {
    /// URL-friendly slug, used as the filter value.
    pub slug: String,
    /// Human-readable name.
    #[serde(rename = "name")]
    pub display_name: String,
}

impl Category {
    /// Create a category.
    pub fn new(slug: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            display_name: display_name.into(),
        }
    }
}

/// Format a category slug for display.
///
/// Words split on `-` or space are capitalised and joined with `" & "`,
/// so `mens-shirts` becomes `Mens & Shirts`.
pub fn category_label(slug: &str) -> String {
    slug.split(['-', ' '])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" & ")
}

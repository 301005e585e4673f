//! Catalog page filter state.

use catalog_core::search::{CatalogQuery, SortOption};

/// User-controlled filter state of the catalog page.
///
/// Changing the category or the debounced search text resets the page index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    /// Search text as typed.
    pub search_text: String,
    /// Search text after the debounce window.
    pub debounced_search: String,
    /// Selected category slug; `None` for all categories.
    pub category: Option<String>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (0-indexed).
    pub page_index: u32,
}

impl PageState {
    /// Initial state with the given sort option.
    pub fn new(sort: SortOption) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Apply a debounced search value. Returns whether it changed.
    pub fn apply_search(&mut self, text: &str) -> bool {
        if self.debounced_search == text {
            return false;
        }
        self.debounced_search = text.to_string();
        self.page_index = 0;
        true
    }

    /// Select a category; an empty slug means all categories. Returns whether it changed.
    pub fn select_category(&mut self, slug: Option<&str>) -> bool {
        let slug = slug.filter(|s| !s.is_empty());
        if self.category.as_deref() == slug {
            return false;
        }
        self.category = slug.map(str::to_string);
        self.page_index = 0;
        true
    }

    /// Whether the typed text has not reached the debounced value yet.
    pub fn search_pending(&self) -> bool {
        self.search_text != self.debounced_search
    }

    /// Whether sorting and paging happen locally.
    pub fn is_category_mode(&self) -> bool {
        self.category.is_some()
    }

    /// The remote query this state calls for.
    pub fn query(&self, page_size: u32) -> CatalogQuery {
        CatalogQuery::derive(
            self.category.as_deref(),
            &self.debounced_search,
            self.sort,
            self.page_index,
            page_size,
        )
    }
}

//! Browse settings.

use std::time::Duration;

use catalog_core::search::SortOption;

/// Items per catalog page.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Search-text quiescence window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tunables for a catalog page.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseSettings {
    /// Items per page (at least 1).
    pub page_size: u32,
    /// Debounce window for search text.
    pub debounce: Duration,
    /// Sort option a fresh page starts with.
    pub default_sort: SortOption,
}

impl BrowseSettings {
    /// Override the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Override the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Override the starting sort option.
    pub fn with_default_sort(mut self, sort: SortOption) -> Self {
        self.default_sort = sort;
        self
    }
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            default_sort: SortOption::default(),
        }
    }
}

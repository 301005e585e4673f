//! Response envelope and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Pagination info for a 0-based page index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (0-indexed).
    pub page_index: u32,
    /// Items per page (at least 1).
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page_index: u32, page_size: u32, total: u64) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
            total,
        }
    }

    /// Total number of pages, never less than one.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    /// Whether "previous" is enabled.
    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    /// Whether "next" is enabled.
    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages() - 1
    }

    /// Clamp a requested page index into `[0, total_pages - 1]`.
    pub fn clamp(&self, page_index: u32) -> u32 {
        page_index.min(self.total_pages() - 1)
    }

    /// The current page's slice of a full, locally-held result set.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let len = items.len();
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(len);
        let end = start.saturating_add(self.page_size as usize).min(len);
        &items[start..end]
    }

    /// Page indices to show, centred on the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<u32> {
        let total = self.total_pages();
        let max_visible = u32::try_from(max_visible.max(1)).unwrap_or(u32::MAX);
        if total <= max_visible {
            return (0..total).collect();
        }

        let half = max_visible / 2;
        let start = self.page_index.saturating_sub(half);
        let end = (start + max_visible).min(total);
        let start = end - max_visible;

        (start..end).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, 8, 0)
    }
}

/// A page of products as returned by the product-data service.
///
/// `products.len() <= limit`, except for whole-category fetches where the
/// limit is unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogResponse {
    /// The returned products, in service order.
    pub products: Vec<Product>,
    /// Total number of matching products.
    pub total: u64,
    /// Offset the page starts at (`skip` on the wire).
    #[serde(rename = "skip")]
    pub offset: u64,
    /// Page size the service applied.
    pub limit: u64,
}

impl CatalogResponse {
    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products in this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_floor_of_one() {
        assert_eq!(Pagination::new(0, 8, 0).total_pages(), 1);
        assert_eq!(Pagination::new(0, 8, 1).total_pages(), 1);
        assert_eq!(Pagination::new(0, 8, 8).total_pages(), 1);
        assert_eq!(Pagination::new(0, 8, 9).total_pages(), 2);
        assert_eq!(Pagination::new(0, 8, 32).total_pages(), 4);
        assert_eq!(Pagination::new(0, 8, 194).total_pages(), 25);
    }

    #[test]
    fn test_zero_page_size_is_coerced() {
        let p = Pagination::new(0, 0, 5);
        assert_eq!(p.page_size, 1);
        assert_eq!(p.total_pages(), 5);
    }

    #[test]
    fn test_prev_next_bounds() {
        let first = Pagination::new(0, 8, 32);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = Pagination::new(3, 8, 32);
        assert!(last.has_prev());
        assert!(!last.has_next());

        let single = Pagination::new(0, 8, 3);
        assert!(!single.has_prev());
        assert!(!single.has_next());
    }

    #[test]
    fn test_clamp() {
        let p = Pagination::new(0, 8, 32);
        assert_eq!(p.clamp(2), 2);
        assert_eq!(p.clamp(4), 3);
        assert_eq!(p.clamp(u32::MAX), 3);
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(Pagination::new(0, 8, 20).slice(&items), &items[0..8]);
        assert_eq!(Pagination::new(2, 8, 20).slice(&items), &items[16..20]);
        assert!(Pagination::new(5, 8, 20).slice(&items).is_empty());
    }

    #[test]
    fn test_page_numbers() {
        assert_eq!(Pagination::new(0, 8, 32).page_numbers(7), vec![0, 1, 2, 3]);
        assert_eq!(
            Pagination::new(10, 8, 160).page_numbers(5),
            vec![8, 9, 10, 11, 12]
        );
        assert_eq!(Pagination::new(19, 8, 160).page_numbers(5), vec![15, 16, 17, 18, 19]);
        assert_eq!(Pagination::new(0, 8, 160).page_numbers(5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_response_wire_names() {
        let json = r#"{"products":[{"id":1,"title":"A"}],"total":194,"skip":8,"limit":8}"#;
        let resp: CatalogResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.offset, 8);
        assert_eq!(resp.total, 194);
        assert_eq!(resp.len(), 1);
    }
}

//! Sort/pagination reconciler for the catalog page.

use catalog_core::catalog::Product;
use catalog_core::search::{CatalogQuery, CatalogResponse, Pagination, SortOption};
use serde::Serialize;
use tracing::{debug, warn};

use crate::lifecycle::{Completion, Lifecycle};
use crate::settings::BrowseSettings;
use crate::state::PageState;

/// Numbered page links shown around the current page.
const PAGE_LINKS: usize = 5;

/// A fetch the caller must execute and hand back through
/// [`CatalogController::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Cycle this fetch belongs to.
    pub generation: u64,
    /// Query to execute.
    pub query: CatalogQuery,
}

/// A response together with the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    /// The query the response answers.
    pub query: CatalogQuery,
    /// The response as received.
    pub response: CatalogResponse,
}

/// Renderable snapshot of the catalog page.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CatalogView {
    /// Products on the current page, in display order.
    pub products: Vec<Product>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Error banner text.
    pub error: Option<String>,
    /// Number of matching products across all pages.
    pub effective_total: u64,
    /// Page count, never less than one.
    pub total_pages: u32,
    /// Current page (0-indexed).
    pub page_index: u32,
    /// Whether "previous" is enabled.
    pub has_prev: bool,
    /// Whether "next" is enabled.
    pub has_next: bool,
    /// Page indices for the numbered page links, around the current page.
    pub page_numbers: Vec<u32>,
    /// Number of products on this page.
    pub showing: usize,
    /// Search text as typed.
    pub search_text: String,
    /// Whether typed search text is still inside the debounce window.
    pub search_pending: bool,
    /// Selected category slug.
    pub category: Option<String>,
    /// Active sort option.
    pub sort: SortOption,
}

/// Owns the catalog page state and decides which query to issue.
///
/// Each state change that alters the remote query starts a new fetch cycle
/// under a fresh generation. Responses are applied only if they belong to the
/// latest generation, so an older, slower response never overwrites a newer
/// one. In category mode the whole category is fetched once and sort or page
/// changes re-sort and re-slice it locally.
#[derive(Debug)]
pub struct CatalogController {
    page_size: u32,
    state: PageState,
    generation: u64,
    active_query: Option<CatalogQuery>,
    lifecycle: Lifecycle<LoadedPage>,
    last_total: u64,
}

impl CatalogController {
    /// Create a controller. No cycle starts until an intent calls for one.
    pub fn new(settings: &BrowseSettings) -> Self {
        Self {
            page_size: settings.page_size.max(1),
            state: PageState::new(settings.default_sort),
            generation: 0,
            active_query: None,
            lifecycle: Lifecycle::Idle,
            last_total: 0,
        }
    }

    /// Current filter state.
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Lifecycle of the latest cycle.
    pub fn lifecycle(&self) -> &Lifecycle<LoadedPage> {
        &self.lifecycle
    }

    /// Latest generation issued.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Items per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Record typed search text. Nothing is fetched until the debounced
    /// value arrives through [`apply_debounced_search`](Self::apply_debounced_search).
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
    }

    /// Apply the debounced search text.
    pub fn apply_debounced_search(&mut self, text: &str) -> Option<FetchPlan> {
        self.state.apply_search(text);
        self.sync()
    }

    /// Select a category (`None` or empty for all).
    pub fn set_category(&mut self, slug: Option<&str>) -> Option<FetchPlan> {
        self.state.select_category(slug);
        self.sync()
    }

    /// Change the sort option. The page index is kept.
    pub fn set_sort(&mut self, sort: SortOption) -> Option<FetchPlan> {
        self.state.sort = sort;
        self.sync()
    }

    /// Jump to a page, clamped into `[0, total_pages - 1]`.
    pub fn set_page(&mut self, page_index: u32) -> Option<FetchPlan> {
        self.state.page_index = self.pagination().clamp(page_index);
        self.sync()
    }

    /// Next page, if there is one.
    pub fn next_page(&mut self) -> Option<FetchPlan> {
        if !self.pagination().has_next() {
            return None;
        }
        self.set_page(self.state.page_index + 1)
    }

    /// Previous page, if there is one.
    pub fn prev_page(&mut self) -> Option<FetchPlan> {
        if !self.pagination().has_prev() {
            return None;
        }
        self.set_page(self.state.page_index - 1)
    }

    /// Start a new cycle for the current query, even if it has not changed.
    pub fn refresh(&mut self) -> FetchPlan {
        self.start_cycle(self.state.query(self.page_size))
    }

    /// Hand back the outcome of a plan.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<CatalogResponse, String>,
    ) -> Completion {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "discarding stale catalog response"
            );
            return Completion::Stale;
        }

        let Some(query) = self.active_query.clone() else {
            return Completion::Stale;
        };

        match result {
            Ok(response) => {
                debug!(
                    generation,
                    kind = query.kind(),
                    count = response.len(),
                    total = response.total,
                    "catalog response applied"
                );
                let local_paging = query.is_category();
                let page = LoadedPage { query, response };
                self.last_total = effective_total(&page);
                self.lifecycle = Lifecycle::Loaded(page);
                // Page moves made while the category was loading were clamped
                // against the previous total.
                if local_paging {
                    self.state.page_index = self.pagination().clamp(self.state.page_index);
                }
            }
            Err(message) => {
                warn!(generation, kind = query.kind(), error = %message, "catalog fetch failed");
                self.lifecycle = Lifecycle::Errored(message);
            }
        }
        Completion::Applied
    }

    /// Pagination over the current effective total.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.state.page_index, self.page_size, self.effective_total())
    }

    /// Number of matching products: the local category size in category mode,
    /// otherwise the server-reported total. Falls back to the last known total
    /// while loading or after an error.
    pub fn effective_total(&self) -> u64 {
        match &self.lifecycle {
            Lifecycle::Loaded(page) => effective_total(page),
            _ => self.last_total,
        }
    }

    /// Products on the current page, in display order.
    pub fn visible_products(&self) -> Vec<Product> {
        let Lifecycle::Loaded(page) = &self.lifecycle else {
            return Vec::new();
        };

        if page.query.is_category() {
            let mut sorted = page.response.products.clone();
            self.state.sort.sort(&mut sorted);
            self.pagination().slice(&sorted).to_vec()
        } else {
            page.response.products.clone()
        }
    }

    /// Renderable snapshot.
    pub fn view(&self) -> CatalogView {
        let products = self.visible_products();
        let pagination = self.pagination();
        CatalogView {
            showing: products.len(),
            products,
            loading: self.lifecycle.is_loading(),
            error: self.lifecycle.error().map(str::to_string),
            effective_total: pagination.total,
            total_pages: pagination.total_pages(),
            page_index: pagination.page_index,
            has_prev: pagination.has_prev(),
            has_next: pagination.has_next(),
            page_numbers: pagination.page_numbers(PAGE_LINKS),
            search_text: self.state.search_text.clone(),
            search_pending: self.state.search_pending(),
            category: self.state.category.clone(),
            sort: self.state.sort,
        }
    }

    fn sync(&mut self) -> Option<FetchPlan> {
        let query = self.state.query(self.page_size);
        if self.active_query.as_ref() == Some(&query) {
            return None;
        }
        Some(self.start_cycle(query))
    }

    fn start_cycle(&mut self, query: CatalogQuery) -> FetchPlan {
        self.generation += 1;
        self.active_query = Some(query.clone());
        self.lifecycle = Lifecycle::Loading;
        debug!(generation = self.generation, kind = query.kind(), "starting catalog fetch");
        FetchPlan {
            generation: self.generation,
            query,
        }
    }
}

fn effective_total(page: &LoadedPage) -> u64 {
    if page.query.is_category() {
        page.response.products.len() as u64
    } else {
        page.response.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::catalog::ProductMeta;
    use catalog_core::search::ListingQuery;

    fn product(id: u64, price: f64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price,
            ..Default::default()
        }
    }

    fn page(ids: std::ops::Range<u64>, total: u64) -> CatalogResponse {
        CatalogResponse {
            products: ids.map(|id| product(id, id as f64)).collect(),
            total,
            offset: 0,
            limit: 8,
        }
    }

    fn controller() -> CatalogController {
        CatalogController::new(&BrowseSettings::default())
    }

    fn listing(plan: &FetchPlan) -> &ListingQuery {
        match &plan.query {
            CatalogQuery::Listing(l) | CatalogQuery::Search(l) => l,
            other => panic!("expected a server-paged query, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_listing_scenario() {
        let mut c = controller();
        let plan = c.refresh();
        assert_eq!(plan.generation, 1);
        let q = listing(&plan);
        assert_eq!((q.limit, q.offset), (8, 0));
        assert_eq!(q.sort_field.as_str(), "price");
        assert_eq!(q.sort_direction.as_str(), "asc");
        assert!(c.view().loading);

        assert_eq!(c.complete(plan.generation, Ok(page(1..9, 32))), Completion::Applied);
        let view = c.view();
        assert!(!view.loading);
        assert_eq!(view.effective_total, 32);
        assert_eq!(view.total_pages, 4);
        assert_eq!(view.showing, 8);
        assert!(!view.has_prev);
        assert!(view.has_next);
        assert_eq!(view.page_numbers, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut c = controller();
        let a = c.refresh();
        let b = c.apply_debounced_search("phone").unwrap();
        assert!(b.generation > a.generation);

        // B resolves first, then the slower A arrives.
        assert_eq!(c.complete(b.generation, Ok(page(100..102, 2))), Completion::Applied);
        assert_eq!(c.complete(a.generation, Ok(page(1..9, 194))), Completion::Stale);

        let view = c.view();
        assert_eq!(view.effective_total, 2);
        assert_eq!(view.products[0].id, 100);
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let mut c = controller();
        let a = c.refresh();
        let b = c.set_sort(SortOption::Newest).unwrap();

        assert_eq!(
            c.complete(a.generation, Err("Failed to fetch products".into())),
            Completion::Stale
        );
        assert!(c.view().loading);
        assert_eq!(c.view().error, None);

        c.complete(b.generation, Ok(page(1..5, 4)));
        assert_eq!(c.view().error, None);
    }

    #[test]
    fn test_page_resets_on_category_and_search() {
        let mut c = controller();
        let plan = c.refresh();
        c.complete(plan.generation, Ok(page(1..9, 32)));
        let plan = c.set_page(3).unwrap();
        assert_eq!(listing(&plan).offset, 24);
        c.complete(plan.generation, Ok(page(25..33, 32)));
        assert_eq!(c.view().page_index, 3);

        let plan = c.apply_debounced_search("phone").unwrap();
        assert_eq!(listing(&plan).offset, 0);
        assert_eq!(c.state().page_index, 0);

        c.complete(plan.generation, Ok(page(1..9, 20)));
        c.set_page(2);
        assert_eq!(c.state().page_index, 2);
        c.set_category(Some("beauty"));
        assert_eq!(c.state().page_index, 0);
    }

    #[test]
    fn test_page_set_while_category_loads_is_reclamped() {
        let mut c = controller();
        let plan = c.refresh();
        c.complete(plan.generation, Ok(page(1..9, 194)));

        let plan = c.set_category(Some("beauty")).unwrap();
        assert_eq!(c.set_page(5), None);
        assert_eq!(c.state().page_index, 5);

        c.complete(plan.generation, Ok(page(1..4, 0)));
        let view = c.view();
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page_index, 0);
        assert_eq!(view.showing, 3);
        assert!(!view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn test_category_mode_sorts_and_pages_locally() {
        let mut c = controller();
        let plan = c.set_category(Some("beauty")).unwrap();
        assert_eq!(
            plan.query,
            CatalogQuery::CategoryFetch {
                slug: "beauty".into()
            }
        );

        // Service order is not price order; server total is ignored.
        let mut response = page(1..13, 0);
        response.products.reverse();
        c.complete(plan.generation, Ok(response));

        let view = c.view();
        assert_eq!(view.effective_total, 12);
        assert_eq!(view.total_pages, 2);
        let ids: Vec<u64> = view.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        assert_eq!(c.set_sort(SortOption::PriceDesc), None);
        let ids: Vec<u64> = c.view().products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![12, 11, 10, 9, 8, 7, 6, 5]);

        assert_eq!(c.next_page(), None);
        let view = c.view();
        assert_eq!(view.page_index, 1);
        assert_eq!(view.effective_total, 12);
        assert_eq!(view.showing, 4);
        assert!(!view.has_next);
        assert_eq!(c.next_page(), None);
        assert_eq!(c.state().page_index, 1);
    }

    #[test]
    fn test_category_mode_ignores_search_text() {
        let mut c = controller();
        let plan = c.set_category(Some("beauty")).unwrap();
        c.complete(plan.generation, Ok(page(1..4, 3)));

        assert_eq!(c.apply_debounced_search("phone"), None);
        assert_eq!(c.view().effective_total, 3);
    }

    #[test]
    fn test_category_newest_uses_created_at() {
        let mut c = controller();
        let plan = c.set_category(Some("beauty")).unwrap();
        let stamp = |id: u64, created: Option<&str>| Product {
            meta: created.map(|c| ProductMeta {
                created_at: Some(c.to_string()),
                updated_at: None,
            }),
            ..product(id, 1.0)
        };
        let response = CatalogResponse {
            products: vec![
                stamp(1, Some("2024-05-23T08:56:21.618Z")),
                stamp(2, None),
                stamp(3, Some("2025-01-01T00:00:00Z")),
            ],
            ..Default::default()
        };
        c.complete(plan.generation, Ok(response));
        c.set_sort(SortOption::Newest);

        let ids: Vec<u64> = c.view().products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_leaving_category_refetches_listing() {
        let mut c = controller();
        let plan = c.set_category(Some("beauty")).unwrap();
        c.complete(plan.generation, Ok(page(1..4, 3)));

        let plan = c.set_category(None).unwrap();
        assert!(matches!(plan.query, CatalogQuery::Listing(_)));
    }

    #[test]
    fn test_error_clears_grid_and_keeps_totals() {
        let mut c = controller();
        let plan = c.refresh();
        c.complete(plan.generation, Ok(page(1..9, 32)));
        let plan = c.set_page(2).unwrap();

        assert_eq!(
            c.complete(plan.generation, Err("Failed to fetch products".into())),
            Completion::Applied
        );
        let view = c.view();
        assert!(view.products.is_empty());
        assert_eq!(view.error.as_deref(), Some("Failed to fetch products"));
        assert_eq!(view.page_index, 2);
        assert_eq!(view.effective_total, 32);
        assert_eq!(view.total_pages, 4);
    }

    #[test]
    fn test_identical_retrigger_via_refresh() {
        let mut c = controller();
        let plan = c.refresh();
        c.complete(plan.generation, Err("Failed to fetch products".into()));

        let retry = c.refresh();
        assert_eq!(retry.query, plan.query);
        assert!(retry.generation > plan.generation);
        assert!(c.view().loading);
    }

    #[test]
    fn test_page_bounds() {
        let mut c = controller();
        assert_eq!(c.prev_page(), None);

        let plan = c.refresh();
        c.complete(plan.generation, Ok(page(1..9, 20)));
        let plan = c.set_page(99).unwrap();
        assert_eq!(listing(&plan).offset, 16);
        assert_eq!(c.state().page_index, 2);

        c.complete(plan.generation, Ok(page(17..21, 20)));
        assert_eq!(c.next_page(), None);
        let plan = c.prev_page().unwrap();
        assert_eq!(listing(&plan).offset, 8);
    }

    #[test]
    fn test_unchanged_state_starts_no_cycle() {
        let mut c = controller();
        let plan = c.refresh();
        assert_eq!(c.set_sort(SortOption::PriceAsc), None);
        assert_eq!(c.set_category(Some("")), None);
        assert_eq!(c.apply_debounced_search("  "), None);
        assert_eq!(c.generation(), plan.generation);
    }

    #[test]
    fn test_total_pages_floor() {
        let mut c = controller();
        let plan = c.refresh();
        c.complete(plan.generation, Ok(page(0..0, 0)));
        let view = c.view();
        assert_eq!(view.total_pages, 1);
        assert!(!view.has_next);
        assert_eq!(view.showing, 0);
    }

    #[test]
    fn test_search_text_is_not_fetched_until_debounced() {
        let mut c = controller();
        c.refresh();
        let generation = c.generation();
        c.set_search_text("pho");
        assert_eq!(c.generation(), generation);
        assert!(c.view().search_pending);

        let plan = c.apply_debounced_search("pho").unwrap();
        assert!(matches!(plan.query, CatalogQuery::Search(_)));
        assert!(!c.view().search_pending);
    }
}

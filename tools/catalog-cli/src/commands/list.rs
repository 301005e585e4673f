//! One-shot catalog page.

use std::error::Error as StdError;

use anyhow::{bail, Result};
use catalog_browse::{CatalogController, CatalogView, FetchPlan};
use catalog_core::catalog::{category_label, star_rating};
use catalog_core::failure_message;
use catalog_data::CatalogApi;

use super::ListArgs;
use crate::context::Context;
use crate::output::{price_label, star_bar, truncate, Output};

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let mut settings = ctx.settings()?;
    if let Some(sort) = args.sort {
        settings = settings.with_default_sort(sort);
    }

    let client = ctx.client()?;
    let mut controller = CatalogController::new(&settings);
    let plan = initial_plan(
        &mut controller,
        args.category.as_deref(),
        args.search.as_deref(),
    );

    let spinner = ctx.output.spinner("Loading products...");
    execute(&client, &mut controller, plan).await;

    // The page is clamped against the total, which is only known now.
    if args.page > 1 {
        if let Some(plan) = controller.set_page(args.page - 1) {
            execute(&client, &mut controller, plan).await;
        }
    }
    spinner.finish_and_clear();

    let view = controller.view();
    if ctx.output.is_json() {
        ctx.output.json(&view);
    } else {
        print_page(&ctx.output, &view);
    }

    if let Some(error) = view.error {
        bail!(error);
    }
    Ok(())
}

/// Apply the command-line filters and return the one plan to execute.
///
/// Each filter change may issue its own plan; only the latest generation
/// would be applied, so earlier ones are superseded rather than run.
fn initial_plan(
    controller: &mut CatalogController,
    category: Option<&str>,
    search: Option<&str>,
) -> FetchPlan {
    let mut plan = controller.refresh();
    if let Some(next) = controller.set_category(category) {
        plan = next;
    }
    if let Some(search) = search {
        // No one is typing, so the text is already settled.
        controller.set_search_text(search);
        if let Some(next) = controller.apply_debounced_search(search) {
            plan = next;
        }
    }
    plan
}

/// Execute a plan and hand the outcome back to the controller.
pub async fn execute<A>(api: &A, controller: &mut CatalogController, plan: FetchPlan)
where
    A: CatalogApi + ?Sized,
{
    let result = api.fetch(&plan.query).await.map_err(|e| {
        let e: Box<dyn StdError + Send + Sync> = Box::new(e);
        failure_message(&e, catalog_browse::LOAD_FAILURE_MESSAGE)
    });
    controller.complete(plan.generation, result);
}

/// Render a catalog page as a table.
pub fn print_page(output: &Output, view: &CatalogView) {
    let title = match (&view.category, view.search_text.trim()) {
        (Some(slug), _) => format!("Category: {}", category_label(slug)),
        (None, "") => "All products".to_string(),
        (None, text) => format!("Search: \"{}\"", text),
    };
    output.header(&format!("{} ({})", title, view.sort.display_name()));

    if let Some(error) = &view.error {
        output.error(error);
        return;
    }

    if view.products.is_empty() {
        output.info("No products found");
        return;
    }

    for product in &view.products {
        let id = format!("#{}", product.id);
        let title = truncate(&product.title, 36);
        let stars = star_bar(star_rating(product.rating));
        let price = price_label(product);
        output.table_row(
            &[id.as_str(), title.as_str(), stars.as_str(), price.as_str()],
            &[5, 36, 5, 0],
        );
    }

    output.line("");
    output.line(&format!(
        "  {}  Page {} of {} · {} products",
        page_nav(view),
        view.page_index + 1,
        view.total_pages.max(1),
        view.effective_total
    ));
}

/// Numbered page links with the current page bracketed, e.g. `‹ 1 [2] 3 ›`.
/// Arrows are dimmed out at the edges.
pub fn page_nav(view: &CatalogView) -> String {
    let mut parts = Vec::with_capacity(view.page_numbers.len() + 2);
    parts.push(if view.has_prev { "‹" } else { " " }.to_string());
    for &index in &view.page_numbers {
        if index == view.page_index {
            parts.push(format!("[{}]", index + 1));
        } else {
            parts.push((index + 1).to_string());
        }
    }
    parts.push(if view.has_next { "›" } else { " " }.to_string());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_browse::BrowseSettings;
    use catalog_core::search::CatalogQuery;

    #[test]
    fn test_initial_plan_is_latest_generation() {
        let mut controller = CatalogController::new(&BrowseSettings::default());
        let plan = initial_plan(&mut controller, None, Some("phone"));
        assert_eq!(plan.generation, controller.generation());
        assert!(matches!(plan.query, CatalogQuery::Search(_)));

        let mut controller = CatalogController::new(&BrowseSettings::default());
        let plan = initial_plan(&mut controller, Some("beauty"), Some("phone"));
        assert_eq!(plan.generation, controller.generation());
        assert_eq!(
            plan.query,
            CatalogQuery::CategoryFetch {
                slug: "beauty".into()
            }
        );

        let mut controller = CatalogController::new(&BrowseSettings::default());
        let plan = initial_plan(&mut controller, None, None);
        assert_eq!(plan.generation, 1);
        assert!(matches!(plan.query, CatalogQuery::Listing(_)));
    }

    #[test]
    fn test_page_nav_marks_current_page() {
        let view = CatalogView {
            page_index: 1,
            total_pages: 4,
            has_prev: true,
            has_next: true,
            page_numbers: vec![0, 1, 2, 3],
            ..Default::default()
        };
        assert_eq!(page_nav(&view), "‹ 1 [2] 3 4 ›");
    }

    #[test]
    fn test_page_nav_single_page() {
        let view = CatalogView {
            total_pages: 1,
            page_numbers: vec![0],
            ..Default::default()
        };
        assert_eq!(page_nav(&view), "  [1]  ");
    }
}

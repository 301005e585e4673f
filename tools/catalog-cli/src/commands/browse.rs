//! Interactive catalog browsing.

use std::sync::Arc;

use anyhow::{bail, Result};
use catalog_browse::{CatalogSession, CatalogView, Intent, Picker, SessionHandle};
use catalog_core::catalog::Category;
use console::Term;
use dialoguer::{Input, Select};
use tracing::debug;

use super::{list, show, BrowseArgs};
use crate::context::Context;

enum Action {
    Search,
    Category,
    Sort,
    Next,
    Prev,
    GoTo,
    Open,
    Refresh,
    Quit,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() || !Term::stdout().is_term() {
        bail!("browse needs an interactive terminal; use `catalog list` instead");
    }

    let mut settings = ctx.settings()?;
    if let Some(sort) = args.sort {
        settings = settings.with_default_sort(sort);
    }

    let api = Arc::new(ctx.client()?);
    let mut session = CatalogSession::spawn(Arc::clone(&api), settings);
    if let Some(category) = args.category {
        session.send(Intent::Category(Some(category)))?;
    }

    let result = browse_loop(&mut session, &api, ctx).await;
    session.shutdown().await;
    result
}

async fn browse_loop(
    session: &mut SessionHandle,
    api: &catalog_data::CatalogClient,
    ctx: &Context,
) -> Result<()> {
    let mut categories: Option<Vec<Category>> = None;

    loop {
        let spinner = ctx.output.spinner("Loading products...");
        let view = session.settle().await;
        spinner.finish_and_clear();
        let view = view?;

        list::print_page(&ctx.output, &view);

        let (labels, actions) = menu(&view);
        let choice = prompt(move || {
            Select::new()
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()
        })
        .await?;

        let intent = match &actions[choice] {
            Action::Search => {
                let current = view.search_text.clone();
                let text = prompt(move || {
                    Input::<String>::new()
                        .with_prompt("Search")
                        .with_initial_text(current)
                        .allow_empty(true)
                        .interact_text()
                })
                .await?;
                Intent::Search(text)
            }
            Action::Category => {
                if categories.is_none() {
                    categories = Some(session.categories_loaded().await);
                }
                let known = categories.as_deref().unwrap_or_default();
                let mut picker = Picker::categories(known, view.category.as_deref());
                match pick(&mut picker, "Category").await? {
                    Some(slug) => Intent::Category(Some(slug)),
                    None => continue,
                }
            }
            Action::Sort => {
                let mut picker = Picker::sort_options(view.sort);
                match pick(&mut picker, "Sort by").await? {
                    Some(sort) => Intent::Sort(sort),
                    None => continue,
                }
            }
            Action::Next => Intent::NextPage,
            Action::Prev => Intent::PrevPage,
            Action::GoTo => {
                let pages = view.total_pages.max(1);
                let page = prompt(move || {
                    Input::<u32>::new()
                        .with_prompt(format!("Page (1-{})", pages))
                        .interact_text()
                })
                .await?;
                Intent::Page(page.saturating_sub(1))
            }
            Action::Open => {
                let titles: Vec<String> = view
                    .products
                    .iter()
                    .map(|p| format!("#{} {}", p.id, p.title))
                    .collect();
                let index = prompt(move || {
                    Select::new()
                        .with_prompt("Open product")
                        .items(&titles)
                        .default(0)
                        .interact_opt()
                })
                .await?;
                if let Some(product) = index.and_then(|i| view.products.get(i)) {
                    let id = product.id.to_string();
                    if let Err(e) = show::show_product(api, &id, true, ctx).await {
                        ctx.output.warn(&format!("{:#}", e));
                    }
                }
                continue;
            }
            Action::Refresh => Intent::Refresh,
            Action::Quit => return Ok(()),
        };

        debug!(?intent, "browse intent");
        session.send(intent)?;
    }
}

fn menu(view: &CatalogView) -> (Vec<String>, Vec<Action>) {
    let mut items = vec![
        ("Search...".to_string(), Action::Search),
        (
            format!("Category: {}", view.category.as_deref().unwrap_or("all")),
            Action::Category,
        ),
        (format!("Sort: {}", view.sort.display_name()), Action::Sort),
    ];
    if view.has_next {
        items.push(("Next page".to_string(), Action::Next));
    }
    if view.has_prev {
        items.push(("Previous page".to_string(), Action::Prev));
    }
    if view.total_pages > 1 {
        items.push(("Go to page...".to_string(), Action::GoTo));
    }
    if !view.products.is_empty() {
        items.push(("Open product...".to_string(), Action::Open));
    }
    items.push(("Refresh".to_string(), Action::Refresh));
    items.push(("Quit".to_string(), Action::Quit));
    items.into_iter().unzip()
}

/// Show a picker as a select prompt. Returns the new value, or `None` if
/// the prompt was dismissed or the selection did not change.
async fn pick<T>(picker: &mut Picker<T>, title: &str) -> Result<Option<T>>
where
    T: Clone + PartialEq,
{
    picker.toggle();
    let labels: Vec<String> = picker.labels().into_iter().map(String::from).collect();
    let default = picker.selected_index().unwrap_or(0);
    let title = format!("{} ({})", title, picker.display_label());

    let index = prompt(move || {
        Select::new()
            .with_prompt(title)
            .items(&labels)
            .default(default)
            .interact_opt()
    })
    .await?;

    Ok(match index {
        Some(index) => picker.select_index(index),
        None => {
            picker.dismiss();
            None
        }
    })
}

/// Run a blocking terminal prompt off the async workers so the session
/// keeps running its timers and fetches.
async fn prompt<T, E, F>(f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

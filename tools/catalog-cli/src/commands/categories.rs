//! Category listing.

use anyhow::{Context as _, Result};
use catalog_data::CatalogApi;

use crate::context::Context;

/// Run the categories command.
pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Fetching categories...");
    let categories = client.list_categories().await;
    spinner.finish_and_clear();
    let categories = categories.context("Failed to fetch categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header(&format!("Categories ({})", categories.len()));
    let width = categories.iter().map(|c| c.slug.len()).max().unwrap_or(0);
    for category in &categories {
        ctx.output
            .table_row(&[category.slug.as_str(), category.display_name.as_str()], &[width, 0]);
    }

    Ok(())
}

//! Product detail.

use anyhow::{bail, Result};
use catalog_browse::{DetailController, Lifecycle, ProductSummary, Route, CATALOG_PATH};
use catalog_core::catalog::{star_rating, Product};
use catalog_data::CatalogApi;
use serde::Serialize;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{format_date, format_price, star_bar, Output};

#[derive(Serialize)]
struct DetailJson<'a> {
    #[serde(flatten)]
    summary: ProductSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    reviews: Option<&'a [catalog_core::catalog::Review]>,
}

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    show_product(&client, &args.id, args.reviews, ctx).await
}

/// Load a product into a detail view and print it.
pub async fn show_product<A>(api: &A, id: &str, reviews: bool, ctx: &Context) -> Result<()>
where
    A: CatalogApi + ?Sized,
{
    let mut detail = DetailController::new();

    let spinner = ctx.output.spinner(&format!("Loading product {}...", id));
    detail.load(api, id).await;
    spinner.finish_and_clear();

    match detail.lifecycle() {
        Lifecycle::Loaded(product) => {
            if ctx.output.is_json() {
                ctx.output.json(&DetailJson {
                    summary: ProductSummary::from(product),
                    reviews: reviews.then_some(product.reviews.as_slice()),
                });
            } else {
                print_product(&ctx.output, product, reviews);
            }
            Ok(())
        }
        _ => {
            let message = detail.failure().unwrap_or(catalog_browse::NOT_FOUND_MESSAGE);
            ctx.output.header(message);
            ctx.output.kv("Back to catalog", CATALOG_PATH);
            bail!("{}", message)
        }
    }
}

/// Render the detail view.
pub fn print_product(output: &Output, product: &Product, reviews: bool) {
    let summary = ProductSummary::from(product);

    output.header(&summary.title);
    output.kv("Category", &summary.category);
    if !summary.brand.is_empty() {
        output.kv("Brand", &summary.brand);
    }
    if summary.discount_percentage > 0.0 {
        output.kv(
            "Price",
            &format!(
                "{} (was {}, -{:.0}%)",
                format_price(summary.display_price),
                format_price(summary.price),
                summary.discount_percentage
            ),
        );
    } else {
        output.kv("Price", &format_price(summary.display_price));
    }
    output.kv(
        "Rating",
        &format!("{} {:.2}", star_bar(summary.stars), summary.rating),
    );
    let availability = product
        .availability_status
        .as_deref()
        .unwrap_or("In Stock");
    output.kv("Stock", &format!("{} ({})", summary.stock, availability));
    output.kv("SKU", &summary.sku);
    output.kv("Path", &Route::detail(summary.id).to_string());
    if !summary.image.is_empty() {
        output.kv("Image", &summary.image);
    }
    if !summary.tags.is_empty() {
        output.kv("Tags", &summary.tags.join(", "));
    }

    if !summary.description.is_empty() {
        output.line("");
        output.line(&format!("  {}", summary.description));
    }

    if reviews {
        output.header(&format!("Reviews ({})", summary.reviews));
        for review in &product.reviews {
            output.list_item(&format!(
                "{} {} on {}",
                star_bar(star_rating(review.rating)),
                review.reviewer_name,
                format_date(&review.date)
            ));
            output.line(&format!("      {}", review.comment));
        }
    }

    output.line("");
    output.kv("Back to catalog", CATALOG_PATH);
}

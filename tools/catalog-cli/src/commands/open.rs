//! Route dispatch.

use anyhow::{bail, Result};
use catalog_browse::{Route, CATALOG_PATH};

use super::{list, show, ListArgs, OpenArgs};
use crate::context::Context;

/// Run the open command.
pub async fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let route = Route::parse(&args.path);
    ctx.output.debug(&format!("{} -> {}", args.path, route));

    match route {
        Route::Catalog => {
            let args = ListArgs {
                search: None,
                category: None,
                sort: None,
                page: 1,
            };
            list::run(args, ctx).await
        }
        Route::Detail(id) => {
            let client = ctx.client()?;
            show::show_product(&client, &id, false, ctx).await
        }
        Route::NotFound => {
            ctx.output.kv("Back to catalog", CATALOG_PATH);
            bail!("No page at {}", args.path)
        }
    }
}

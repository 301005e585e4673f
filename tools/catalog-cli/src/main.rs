//! Catalog CLI - Terminal front-end for the product catalog.
//!
//! Commands:
//! - `catalog list` - Show one catalog page
//! - `catalog show` - Show a product's details
//! - `catalog categories` - List categories
//! - `catalog open` - Open a route path (`/` or `/products/{id}`)
//! - `catalog browse` - Browse interactively
//! - `catalog config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BrowseArgs, ConfigArgs, ListArgs, OpenArgs, ShowArgs};

/// Catalog CLI - Browse products from the product-data service
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the catalog
    List(ListArgs),

    /// Show a product's details
    Show(ShowArgs),

    /// List product categories
    Categories,

    /// Open a route path such as `/` or `/products/1`
    Open(OpenArgs),

    /// Browse the catalog interactively
    Browse(BrowseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Categories => commands::categories::run(&ctx).await,
        Commands::Open(args) => commands::open::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "catalog", "--json", "list", "--category", "beauty", "--sort", "price-desc", "--page",
            "2",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.category.as_deref(), Some("beauty"));
                assert_eq!(args.sort, Some(catalog_core::search::SortOption::PriceDesc));
                assert_eq!(args.page, 2);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_config_short_flag_with_subcommands() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "catalog", "-c", "catalog.toml", "browse", "--category", "beauty",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("catalog.toml"));
        match cli.command {
            Commands::Browse(args) => assert_eq!(args.category.as_deref(), Some("beauty")),
            _ => panic!("expected browse"),
        }
    }

    #[test]
    fn test_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["catalog", "list", "--sort", "rating"]).is_err());
    }

    #[test]
    fn test_parse_open() {
        let cli = Cli::try_parse_from(["catalog", "open", "/products/3"]).unwrap();
        assert!(matches!(cli.command, Commands::Open(ref a) if a.path == "/products/3"));
    }
}

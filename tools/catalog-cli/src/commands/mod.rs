//! CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod list;
pub mod open;
pub mod show;

use catalog_core::search::SortOption;
use clap::{Args, Subcommand};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Search text (ignored when a category is given).
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category slug to filter by.
    #[arg(long)]
    pub category: Option<String>,

    /// Sort option: newest, oldest, price-asc or price-desc.
    #[arg(long)]
    pub sort: Option<SortOption>,

    /// Page number, starting at 1.
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: String,

    /// Also print the product's reviews.
    #[arg(short, long)]
    pub reviews: bool,
}

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// Route path, e.g. `/` or `/products/1`.
    #[arg(default_value = "/")]
    pub path: String,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Start with this category selected.
    #[arg(long)]
    pub category: Option<String>,

    /// Start with this sort option.
    #[arg(long)]
    pub sort: Option<SortOption>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}

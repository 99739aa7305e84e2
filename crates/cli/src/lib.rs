pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront recommender CLI",
    long_about = "Browse the product catalog, inspect quality scores, and query similar and cross-category recommendations.",
    after_help = "Examples:\n  storefront categories\n  storefront recommend 8\n  storefront explain 5\n  storefront doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List catalog products, optionally restricted to one category")]
    Products {
        #[arg(long, help = "Exact, case-sensitive category name")]
        category: Option<String>,
    },
    #[command(about = "List distinct catalog categories")]
    Categories,
    #[command(about = "Rank similar and cross-category products for a product id")]
    Recommend {
        product_id: String,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Break a product's quality score down by factor")]
    Explain { product_id: String },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate config, catalog loading, and scoring invariants")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Products { category } => commands::products::run(category.as_deref()),
        Command::Categories => commands::categories::run(),
        Command::Recommend { product_id, json } => commands::recommend::run(&product_id, json),
        Command::Explain { product_id } => commands::explain::run(&product_id),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopfront-cli")]
#[command(about = "Shopfront operator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products with their current price.
    Products {
        /// Storefront search syntax, e.g. `tag:camping`.
        #[arg(long)]
        query: Option<String>,
        #[arg(long, default_value_t = commands::DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Print one product as JSON.
    Product { handle: String },
    /// Show the promotions running right now.
    Discounts,
    /// Render `sitemap.xml` for the current catalog and blog.
    Sitemap {
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("shopfront-cli: no command given; see --help");
        return Ok(());
    };

    let config = shopfront_core::load_app_config()?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Products { query, limit } => {
            commands::run_products(&config, query.as_deref(), limit).await?;
        }
        Commands::Product { handle } => commands::run_product(&config, &handle).await?,
        Commands::Discounts => commands::run_discounts(&config).await?,
        Commands::Sitemap { out } => commands::run_sitemap(&config, out.as_deref()).await?,
    }

    Ok(())
}

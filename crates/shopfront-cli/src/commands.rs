//! Command handlers for the CLI.
//!
//! Unlike the server, these surface commerce failures to the operator
//! instead of degrading to empty output.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use shopfront_admin::{fetch_active_discounts, AdminClient};
use shopfront_content::{build_sitemap, load_posts, site_entries};
use shopfront_core::{AppConfig, DiscountKind, Promotion, StorefrontProduct};
use shopfront_storefront::StorefrontClient;

pub(crate) const DEFAULT_LIMIT: u32 = 24;

const SITEMAP_PAGE_SIZE: u32 = 100;

fn storefront(config: &AppConfig) -> anyhow::Result<StorefrontClient> {
    StorefrontClient::from_config(config).context("failed to build storefront client")
}

/// One tab-separated row: handle, title, price, and the sale note if any.
pub(crate) fn product_row(product: &StorefrontProduct) -> String {
    let sale = product.sale_summary();
    let mut row = format!("{}\t{}\t{}", product.handle, product.title, sale.price_text);
    if sale.is_on_sale {
        row.push_str(&format!(
            "\twas {} (save {})",
            sale.compare_at_text, sale.save_percent_text
        ));
    }
    if !product.available_for_sale {
        row.push_str("\tsold out");
    }
    row
}

pub(crate) fn promotion_row(promotion: &Promotion) -> String {
    let value = match &promotion.kind {
        DiscountKind::Percentage { percent } => format!("{percent}% off"),
        DiscountKind::FixedAmount { amount } => format!("{} off", amount.display()),
        DiscountKind::FreeShipping => "free shipping".to_string(),
        DiscountKind::BuyXGetY => "buy x get y".to_string(),
    };
    let code = promotion.code.as_deref().unwrap_or("(automatic)");
    let ends = promotion.ends_at.map_or_else(
        || "open-ended".to_string(),
        |end| format!("until {}", end.format("%Y-%m-%d")),
    );
    format!("{code}\t{value}\t{}\t{ends}", promotion.title)
}

/// # Errors
///
/// Returns an error if the client cannot be built or the catalog request fails.
pub(crate) async fn run_products(
    config: &AppConfig,
    query: Option<&str>,
    limit: u32,
) -> anyhow::Result<()> {
    let client = storefront(config)?;
    let products = client
        .products(limit.clamp(1, 250), query)
        .await
        .context("failed to list products")?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }
    for product in &products {
        println!("{}", product_row(product));
    }
    tracing::info!(count = products.len(), "listed products");
    Ok(())
}

/// # Errors
///
/// Returns an error if the request fails or no product has `handle`.
pub(crate) async fn run_product(config: &AppConfig, handle: &str) -> anyhow::Result<()> {
    let client = storefront(config)?;
    let product = client
        .product_by_handle(handle)
        .await
        .with_context(|| format!("failed to fetch product '{handle}'"))?
        .ok_or_else(|| anyhow::anyhow!("product '{handle}' not found"))?;

    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}

/// # Errors
///
/// Returns an error only if the admin client cannot be built; feed failures
/// print as "no active discounts" after a logged warning.
pub(crate) async fn run_discounts(config: &AppConfig) -> anyhow::Result<()> {
    let client = AdminClient::from_config(config).context("failed to build admin client")?;
    if client.is_none() {
        println!("SHOPIFY_ADMIN_ACCESS_TOKEN is not set; discount feed disabled");
        return Ok(());
    }

    let feed = fetch_active_discounts(client.as_ref(), Utc::now()).await;
    if !feed.active {
        println!("no active discounts");
        return Ok(());
    }
    for promotion in &feed.discounts {
        println!("{}", promotion_row(promotion));
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalog or blog cannot be read, or the output
/// file cannot be written.
pub(crate) async fn run_sitemap(config: &AppConfig, out: Option<&Path>) -> anyhow::Result<()> {
    let client = storefront(config)?;
    let products: Vec<String> = client
        .products(SITEMAP_PAGE_SIZE, None)
        .await
        .context("failed to list products")?
        .into_iter()
        .map(|p| p.handle)
        .collect();
    let collections: Vec<String> = client
        .collections(SITEMAP_PAGE_SIZE)
        .await
        .context("failed to list collections")?
        .into_iter()
        .map(|c| c.handle)
        .collect();
    let posts = load_posts(&config.content_dir).context("failed to load blog posts")?;

    let entries = site_entries(&products, &collections, &posts);
    let xml = build_sitemap(&config.site_url, &entries)?;

    match out {
        Some(path) => {
            std::fs::write(path, &xml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), urls = entries.len(), "wrote sitemap");
        }
        None => println!("{xml}"),
    }
    Ok(())
}

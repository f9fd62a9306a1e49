//! Loads the catalog from the configured backend and prints its views.
//!
//! ```text
//! CATALOG_API_URL=http://localhost:4200 cargo run --bin catalog-demo
//! ```

use anyhow::Context;
use product_catalog::{Catalog, CatalogConfig};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CatalogConfig::from_env().context("invalid catalog configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!(products = %config.products_url(), "Starting catalog demo");

    let catalog = Catalog::from_config(&config);

    catalog
        .load()
        .await?
        .wait_with_timeout(SETTLE_TIMEOUT)
        .await
        .context("catalog did not load in time")?;

    if let Some(message) = catalog.error_message().await {
        println!("Error: {message}");
    }

    println!("\n=== Categories ===");
    for category in catalog.categories().await.unwrap_or_default() {
        println!("{:>4}  {}", category.id, category.name);
    }

    println!("\n=== Products ===");
    let products = catalog.filtered_products().await;
    for product in &products {
        println!(
            "{:>4}  {:<24} {:>8.2}  {}",
            product.id,
            product.product_name,
            product.price.unwrap_or_default(),
            product.category.as_deref().unwrap_or("-")
        );
    }

    if let Some(first) = products.first() {
        catalog
            .select_product(first.id)
            .await?
            .wait_with_timeout(SETTLE_TIMEOUT)
            .await
            .context("supplier lookup did not finish in time")?;

        println!("\n=== {} ===", catalog.page_title().await.unwrap_or_default());
        match catalog.selected_product_suppliers().await {
            Some(suppliers) if suppliers.is_empty() => println!("No suppliers"),
            Some(suppliers) => {
                for supplier in suppliers {
                    println!("{}", serde_json::to_string(&supplier)?);
                }
            },
            None => println!(
                "Suppliers unavailable: {}",
                catalog.error_message().await.unwrap_or_default()
            ),
        }
    }

    catalog.add_product(None).await?;
    println!(
        "\nProducts with local additions: {}",
        catalog.products_with_add().await.len()
    );

    catalog.shutdown_default().await?;
    Ok(())
}

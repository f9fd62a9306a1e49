//! Display-ready product records.
//!
//! Enrichment scales the price, resolves the category name and sets the
//! search key. [`Enrichment`] re-runs it every time either input list
//! changes, pairing the new list with the last known other one.

use crate::types::{Category, CategoryId, Product};
use catalog_core::latest::Latest2;
use std::collections::HashMap;
use std::sync::Arc;

/// Markup applied to every priced product.
pub const PRICE_MARKUP: f64 = 1.5;

/// Scaled price: `raw * 1.5` for a present, non-zero price, else `0`.
#[must_use]
pub fn scale_price(raw: Option<f64>) -> f64 {
    match raw {
        // zero and NaN count as no price
        Some(price) if price.abs() > 0.0 => price * PRICE_MARKUP,
        _ => 0.0,
    }
}

/// Scale the price and set the search key, leaving the category alone.
#[must_use]
pub fn transform(product: Product) -> Product {
    let search_key = vec![product.product_name.clone()];
    Product {
        price: Some(scale_price(product.price)),
        search_key: Some(search_key),
        ..product
    }
}

/// Enrich every product against `categories`.
///
/// A product whose `categoryId` is missing or matches no category gets no
/// category name. When ids repeat, the first category wins.
#[must_use]
pub fn enrich(products: &[Product], categories: &[Category]) -> Vec<Product> {
    let mut names: HashMap<CategoryId, &str> = HashMap::with_capacity(categories.len());
    for category in categories {
        names.entry(category.id).or_insert(&category.name);
    }

    products
        .iter()
        .map(|product| {
            let category = product
                .category_id
                .and_then(|id| names.get(&id))
                .map(|name| (*name).to_string());
            Product {
                category,
                ..transform(product.clone())
            }
        })
        .collect()
}

/// Combine-latest over the product and category lists.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    latest: Latest2<Arc<Vec<Product>>, Arc<Vec<Category>>>,
}

impl Enrichment {
    /// Nothing received yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: Latest2::new(),
        }
    }

    /// New product list; returns the enriched catalog once categories are known.
    pub fn on_products(&mut self, products: Arc<Vec<Product>>) -> Option<Vec<Product>> {
        self.latest
            .set_left(products)
            .map(|(products, categories)| enrich(products, categories))
    }

    /// New category list; returns the enriched catalog once products are known.
    pub fn on_categories(&mut self, categories: Arc<Vec<Category>>) -> Option<Vec<Product>> {
        self.latest
            .set_right(categories)
            .map(|(products, categories)| enrich(products, categories))
    }

    /// Forget both lists.
    pub fn reset(&mut self) {
        self.latest.clear();
    }
}

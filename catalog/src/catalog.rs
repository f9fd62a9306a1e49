//! The catalog facade.
//!
//! [`Catalog`] owns the store and exposes the catalog the way a
//! presentation layer consumes it: setters, one-shot reads, and `watch_*`
//! streams for every derived view.

use crate::actions::CatalogAction;
use crate::api::{CatalogApi, HttpCatalogApi};
use crate::config::CatalogConfig;
use crate::environment::CatalogEnvironment;
use crate::error::Result;
use crate::reducer::CatalogReducer;
use crate::sources::CatalogSources;
use crate::state::CatalogState;
use crate::types::{Category, CategoryId, Product, ProductId, Supplier, SupplierId};
use catalog_core::environment::{Clock, SystemClock};
use catalog_runtime::{EffectHandle, Store, StoreConfig, StoreError};
use futures::{future, Stream, StreamExt};
use std::time::Duration;

/// Store specialized to the catalog.
pub type CatalogStore<A, C> =
    Store<CatalogState, CatalogAction, CatalogEnvironment<A, C>, CatalogReducer<A, C>>;

/// Reactive product catalog.
///
/// # Example
///
/// ```ignore
/// let catalog = Catalog::from_config(&CatalogConfig::from_env()?);
/// catalog.load().await?.wait().await;
///
/// catalog.select_category(CategoryId::new(3)).await?;
/// for product in catalog.filtered_products().await {
///     println!("{} {:?}", product.product_name, product.price);
/// }
/// ```
pub struct Catalog<A, C = SystemClock>
where
    A: CatalogApi + 'static,
    C: Clock + Clone + 'static,
{
    store: CatalogStore<A, C>,
    sources: CatalogSources<A>,
}

impl Catalog<HttpCatalogApi, SystemClock> {
    /// Catalog backed by the HTTP endpoints in `config`.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::with_store_config(HttpCatalogApi::new(config), SystemClock, config.store_config())
    }
}

impl<A, C> Catalog<A, C>
where
    A: CatalogApi + 'static,
    C: Clock + Clone + 'static,
{
    /// Catalog over `api`, timestamping errors with `clock`.
    #[must_use]
    pub fn new(api: A, clock: C) -> Self {
        Self::with_store_config(api, clock, StoreConfig::default())
    }

    /// Catalog with explicit store settings.
    #[must_use]
    pub fn with_store_config(api: A, clock: C, config: StoreConfig) -> Self {
        let environment = CatalogEnvironment::new(api, clock);
        let sources = environment.sources.clone();
        let store = Store::with_config(
            CatalogState::default(),
            CatalogReducer::new(),
            environment,
            config,
        );
        Self { store, sources }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &CatalogStore<A, C> {
        &self.store
    }

    // ───────────────────────── Commands ─────────────────────────

    /// Fetch both lists and build the enriched catalog.
    ///
    /// The handle completes once the catalog and any supplier lookup it
    /// triggered have settled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn load(&self) -> std::result::Result<EffectHandle, StoreError> {
        self.store.send_cascading(CatalogAction::LoadCatalog).await
    }

    /// Select a product; zero clears the selection.
    ///
    /// The handle completes once the supplier lookup has settled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn select_product(
        &self,
        id: impl Into<ProductId>,
    ) -> std::result::Result<EffectHandle, StoreError> {
        self.store
            .send_cascading(CatalogAction::SelectProduct { id: id.into() })
            .await
    }

    /// Filter by a category; zero removes the filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn select_category(
        &self,
        id: impl Into<CategoryId>,
    ) -> std::result::Result<(), StoreError> {
        self.store
            .send(CatalogAction::SelectCategory { id: id.into() })
            .await
            .map(drop)
    }

    /// Append `product`, or the placeholder product, to `products_with_add`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after shutdown.
    pub async fn add_product(
        &self,
        product: Option<Product>,
    ) -> std::result::Result<(), StoreError> {
        self.store
            .send(CatalogAction::AddProduct { product })
            .await
            .map(drop)
    }

    /// Stop accepting commands and wait for running lookups.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if lookups are still running
    /// after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> std::result::Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }

    /// [`Catalog::shutdown`] with the store's configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if lookups are still running
    /// when the timeout expires.
    pub async fn shutdown_default(&self) -> std::result::Result<(), StoreError> {
        self.store.shutdown_default().await
    }

    // ─────────────────────── Direct lookups ───────────────────────

    /// A fresh product fetch with prices scaled and search keys set.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn products_transformed(&self) -> Result<Vec<Product>> {
        self.sources.products_transformed().await
    }

    /// Look up one supplier.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn supplier(&self, id: SupplierId) -> Result<Supplier> {
        self.sources.supplier(id).await
    }

    // ────────────────────────── Reads ──────────────────────────

    /// Products in the selected category.
    pub async fn filtered_products(&self) -> Vec<Product> {
        self.store.state(CatalogState::filtered_products).await
    }

    /// The selected product.
    pub async fn selected_product(&self) -> Option<Product> {
        self.store.state(|s| s.selected_product().cloned()).await
    }

    /// Detail page heading.
    pub async fn page_title(&self) -> Option<String> {
        self.store.state(CatalogState::page_title).await
    }

    /// Suppliers of the selected product.
    pub async fn selected_product_suppliers(&self) -> Option<Vec<Supplier>> {
        self.store
            .state(|s| s.selected_product_suppliers().map(<[Supplier]>::to_vec))
            .await
    }

    /// The category list.
    pub async fn categories(&self) -> Option<Vec<Category>> {
        self.store
            .state(|s| s.categories().map(<[Category]>::to_vec))
            .await
    }

    /// Enriched catalog plus locally added products.
    pub async fn products_with_add(&self) -> Vec<Product> {
        self.store.state(|s| s.products_with_add().to_vec()).await
    }

    /// Most recent error message.
    pub async fn error_message(&self) -> Option<String> {
        self.store
            .state(|s| s.error_message().map(str::to_string))
            .await
    }

    // ────────────────────────── Watches ──────────────────────────

    /// Follow `filtered_products`.
    pub fn watch_filtered_products(&self) -> impl Stream<Item = Vec<Product>> + Send + 'static {
        distinct(self.store.observe(CatalogState::filtered_products))
    }

    /// Follow `selected_product`.
    pub fn watch_selected_product(
        &self,
    ) -> impl Stream<Item = Option<Product>> + Send + 'static {
        distinct(self.store.observe(|s| s.selected_product().cloned()))
    }

    /// Follow `page_title`.
    pub fn watch_page_title(&self) -> impl Stream<Item = Option<String>> + Send + 'static {
        distinct(self.store.observe(CatalogState::page_title))
    }

    /// Follow `selected_product_suppliers`.
    ///
    /// Consecutive equal lists are collapsed, so reselecting a product whose
    /// lookup returns the same suppliers does not yield again.
    pub fn watch_selected_product_suppliers(
        &self,
    ) -> impl Stream<Item = Option<Vec<Supplier>>> + Send + 'static {
        distinct(
            self.store
                .observe(|s| s.selected_product_suppliers().map(<[Supplier]>::to_vec)),
        )
    }

    /// Follow `categories`.
    pub fn watch_categories(&self) -> impl Stream<Item = Option<Vec<Category>>> + Send + 'static {
        distinct(
            self.store
                .observe(|s| s.categories().map(<[Category]>::to_vec)),
        )
    }

    /// Follow `products_with_add`.
    pub fn watch_products_with_add(&self) -> impl Stream<Item = Vec<Product>> + Send + 'static {
        distinct(self.store.observe(|s| s.products_with_add().to_vec()))
    }

    /// Follow `error_message`.
    pub fn watch_error_message(&self) -> impl Stream<Item = Option<String>> + Send + 'static {
        distinct(
            self.store
                .observe(|s| s.error_message().map(str::to_string)),
        )
    }
}

/// Drop values equal to the one before.
fn distinct<S, T>(values: S) -> impl Stream<Item = T> + Send + 'static
where
    S: Stream<Item = T> + Send + 'static,
    T: PartialEq + Clone + Send + 'static,
{
    let mut last: Option<T> = None;
    values.filter_map(move |value| {
        let changed = last.as_ref() != Some(&value);
        if changed {
            last = Some(value.clone());
        }
        future::ready(changed.then_some(value))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn distinct_drops_repeats() {
        let values: Vec<u8> = distinct(stream::iter([1, 1, 2, 2, 2, 1, 3]))
            .collect()
            .await;
        assert_eq!(values, vec![1, 2, 1, 3]);
    }
}

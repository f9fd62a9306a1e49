//! Product, category and supplier sources.
//!
//! Product and category lists are fetched once and replayed to every later
//! caller. Suppliers are looked up on demand and never cached.

use crate::api::CatalogApi;
use crate::enrichment;
use crate::error::Result;
use crate::types::{Category, Product, Supplier, SupplierId};
use catalog_core::replay::Replay;
use futures::future::try_join_all;
use std::sync::Arc;

/// Shared access to the backend lists.
///
/// Clones share the same caches.
pub struct CatalogSources<A> {
    api: Arc<A>,
    products: Replay<Vec<Product>>,
    categories: Replay<Vec<Category>>,
}

impl<A> Clone for CatalogSources<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            products: self.products.clone(),
            categories: self.categories.clone(),
        }
    }
}

impl<A: CatalogApi> CatalogSources<A> {
    /// Wrap `api` with empty caches.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::from_arc(Arc::new(api))
    }

    /// Wrap a shared `api` with empty caches.
    #[must_use]
    pub fn from_arc(api: Arc<A>) -> Self {
        Self {
            api,
            products: Replay::new(),
            categories: Replay::new(),
        }
    }

    /// The underlying backend.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The product list, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure. Failures are not cached.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>> {
        let products = self
            .products
            .get_or_fetch(|| self.api.fetch_products())
            .await?;
        tracing::debug!(count = products.len(), "Products");
        Ok(products)
    }

    /// The category list, fetched on first use.
    ///
    /// # Example
    ///
    /// ```
    /// use product_catalog::mocks::MockCatalogApi;
    /// use product_catalog::sources::CatalogSources;
    /// use product_catalog::types::{Category, CategoryId};
    ///
    /// let api = MockCatalogApi::new()
    ///     .with_categories(vec![Category::new(CategoryId::new(1), "Books")]);
    /// let sources = CatalogSources::new(api.clone());
    ///
    /// tokio_test::block_on(async {
    ///     let first = sources.categories().await.unwrap();
    ///     let again = sources.clone().categories().await.unwrap();
    ///     assert_eq!(first, again);
    /// });
    /// assert_eq!(api.category_fetches(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the fetch failure. Failures are not cached.
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>> {
        let categories = self
            .categories
            .get_or_fetch(|| self.api.fetch_categories())
            .await?;
        tracing::debug!(count = categories.len(), "Categories");
        Ok(categories)
    }

    /// A fresh product fetch with prices scaled and search keys set.
    ///
    /// Category names are not resolved, and the result is not cached.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn products_transformed(&self) -> Result<Vec<Product>> {
        let products = self.api.fetch_products().await?;
        Ok(products.into_iter().map(enrichment::transform).collect())
    }

    /// Look up one supplier.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure.
    pub async fn supplier(&self, id: SupplierId) -> Result<Supplier> {
        self.api.fetch_supplier(id).await
    }

    /// Look up every supplier in `ids` concurrently.
    ///
    /// Resolves once all lookups finish, in the order of `ids`. Any failure
    /// fails the whole batch. An empty `ids` resolves to an empty list.
    ///
    /// # Errors
    ///
    /// Returns the first lookup failure.
    pub async fn suppliers(&self, ids: &[SupplierId]) -> Result<Vec<Supplier>> {
        let suppliers = try_join_all(ids.iter().map(|id| self.api.fetch_supplier(*id))).await?;
        tracing::debug!(?ids, count = suppliers.len(), "Product suppliers");
        Ok(suppliers)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::mocks::MockCatalogApi;
    use crate::types::{CategoryId, ProductId};
    use std::time::Duration;

    fn api() -> MockCatalogApi {
        MockCatalogApi::new()
            .with_products(vec![
                Product::new(ProductId::new(1), "Leaf Rake")
                    .with_price(19.95)
                    .with_category(CategoryId::new(1)),
            ])
            .with_categories(vec![Category::new(CategoryId::new(1), "Garden")])
            .with_supplier(Supplier::new(SupplierId::new(3)).with_attribute("name", "Acme"))
            .with_supplier(Supplier::new(SupplierId::new(7)).with_attribute("name", "Gizmo"))
    }

    #[tokio::test]
    async fn categories_are_fetched_once() {
        let api = api();
        let sources = CatalogSources::new(api.clone());

        let first = sources.categories().await.unwrap();
        let second = sources.clone().categories().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(api.category_fetches(), 1);
    }

    #[tokio::test]
    async fn concurrent_product_callers_share_a_fetch() {
        let api = api().with_fetch_delay(Duration::from_millis(20));
        let sources = CatalogSources::new(api.clone());

        let (a, b, c) = tokio::join!(sources.products(), sources.products(), sources.products());

        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
        assert_eq!(c.unwrap().len(), 1);
        assert_eq!(api.product_fetches(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_retried_by_next_caller() {
        let api = api().failing_categories(CatalogError::Network("offline".into()));
        let sources = CatalogSources::new(api.clone());

        assert!(sources.categories().await.is_err());

        api.set_categories(vec![Category::new(CategoryId::new(2), "Toolbox")]);
        let categories = sources.categories().await.unwrap();

        assert_eq!(categories[0].name, "Toolbox");
        assert_eq!(api.category_fetches(), 2);
    }

    #[tokio::test]
    async fn transformed_products_are_not_cached() {
        let api = api();
        let sources = CatalogSources::new(api.clone());

        let first = sources.products_transformed().await.unwrap();
        let _ = sources.products_transformed().await.unwrap();

        assert_eq!(first[0].price, Some(19.95 * 1.5));
        assert_eq!(first[0].search_key, Some(vec!["Leaf Rake".to_string()]));
        assert!(first[0].category.is_none());
        assert_eq!(api.product_fetches(), 2);
    }

    #[tokio::test]
    async fn suppliers_keep_request_order() {
        let api = api().with_supplier_delay(SupplierId::new(3), Duration::from_millis(20));
        let sources = CatalogSources::new(api);

        let suppliers = sources
            .suppliers(&[SupplierId::new(3), SupplierId::new(7)])
            .await
            .unwrap();

        let ids: Vec<_> = suppliers.iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![3, 7]);
    }

    #[tokio::test]
    async fn one_failed_supplier_fails_the_batch() {
        let api = api().failing_supplier(
            SupplierId::new(7),
            CatalogError::Backend {
                status: 500,
                message: "boom".into(),
            },
        );
        let sources = CatalogSources::new(api);

        let result = sources
            .suppliers(&[SupplierId::new(3), SupplierId::new(7)])
            .await;

        assert!(matches!(result, Err(CatalogError::Backend { status: 500, .. })));
    }

    #[tokio::test]
    async fn empty_supplier_list_resolves_immediately() {
        let api = api();
        let sources = CatalogSources::new(api.clone());

        let suppliers = sources.suppliers(&[]).await.unwrap();

        assert!(suppliers.is_empty());
        assert_eq!(api.supplier_fetches(), 0);
    }

    #[tokio::test]
    async fn single_supplier_lookup() {
        let sources = CatalogSources::new(api());
        let supplier = sources.supplier(SupplierId::new(7)).await.unwrap();
        assert_eq!(supplier.attributes["name"], "Gizmo");

        let missing = sources.supplier(SupplierId::new(99)).await;
        assert!(matches!(missing, Err(CatalogError::Backend { status: 404, .. })));
    }
}

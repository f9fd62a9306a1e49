//! In-memory backend for tests.

use crate::api::CatalogApi;
use crate::error::{CatalogError, Result};
use crate::types::{Category, Product, Supplier, SupplierId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
struct MockData {
    products: Result<Vec<Product>>,
    categories: Result<Vec<Category>>,
    suppliers: HashMap<SupplierId, Supplier>,
    failing_suppliers: HashMap<SupplierId, CatalogError>,
    supplier_delays: HashMap<SupplierId, Duration>,
    fetch_delay: Option<Duration>,
}

impl Default for MockData {
    fn default() -> Self {
        Self {
            products: Ok(Vec::new()),
            categories: Ok(Vec::new()),
            suppliers: HashMap::new(),
            failing_suppliers: HashMap::new(),
            supplier_delays: HashMap::new(),
            fetch_delay: None,
        }
    }
}

#[derive(Debug, Default)]
struct MockInner {
    data: Mutex<MockData>,
    product_fetches: AtomicUsize,
    category_fetches: AtomicUsize,
    supplier_fetches: AtomicUsize,
}

/// Mock catalog backend.
///
/// Serves canned lists and suppliers, counts every request, and can be told
/// to fail or to answer slowly. Clones share the same data and counters.
///
/// # Example
///
/// ```
/// use product_catalog::mocks::MockCatalogApi;
/// use product_catalog::types::{Supplier, SupplierId};
/// use product_catalog::error::CatalogError;
///
/// let api = MockCatalogApi::new()
///     .with_supplier(Supplier::new(SupplierId::new(3)))
///     .failing_supplier(SupplierId::new(7), CatalogError::Network("reset".into()));
/// assert_eq!(api.supplier_fetches(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCatalogApi {
    inner: Arc<MockInner>,
}

impl MockCatalogApi {
    /// Empty backend: no products, no categories, no suppliers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, f: impl FnOnce(&mut MockData)) {
        if let Ok(mut data) = self.inner.data.lock() {
            f(&mut data);
        }
    }

    /// Serve `products`.
    #[must_use]
    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.set_products(products);
        self
    }

    /// Serve `categories`.
    #[must_use]
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.set_categories(categories);
        self
    }

    /// Serve `supplier` at its id.
    #[must_use]
    pub fn with_supplier(self, supplier: Supplier) -> Self {
        self.update(|data| {
            data.suppliers.insert(supplier.id, supplier);
        });
        self
    }

    /// Fail product fetches with `error`.
    #[must_use]
    pub fn failing_products(self, error: CatalogError) -> Self {
        self.update(|data| data.products = Err(error));
        self
    }

    /// Fail category fetches with `error`.
    #[must_use]
    pub fn failing_categories(self, error: CatalogError) -> Self {
        self.update(|data| data.categories = Err(error));
        self
    }

    /// Fail lookups of supplier `id` with `error`.
    #[must_use]
    pub fn failing_supplier(self, id: SupplierId, error: CatalogError) -> Self {
        self.update(|data| {
            data.failing_suppliers.insert(id, error);
        });
        self
    }

    /// Delay lookups of supplier `id`.
    #[must_use]
    pub fn with_supplier_delay(self, id: SupplierId, delay: Duration) -> Self {
        self.update(|data| {
            data.supplier_delays.insert(id, delay);
        });
        self
    }

    /// Delay product and category fetches.
    #[must_use]
    pub fn with_fetch_delay(self, delay: Duration) -> Self {
        self.update(|data| data.fetch_delay = Some(delay));
        self
    }

    /// Replace the served products.
    pub fn set_products(&self, products: Vec<Product>) {
        self.update(|data| data.products = Ok(products));
    }

    /// Replace the served categories.
    pub fn set_categories(&self, categories: Vec<Category>) {
        self.update(|data| data.categories = Ok(categories));
    }

    /// Number of product fetches so far.
    #[must_use]
    pub fn product_fetches(&self) -> usize {
        self.inner.product_fetches.load(Ordering::SeqCst)
    }

    /// Number of category fetches so far.
    #[must_use]
    pub fn category_fetches(&self) -> usize {
        self.inner.category_fetches.load(Ordering::SeqCst)
    }

    /// Number of supplier lookups so far.
    #[must_use]
    pub fn supplier_fetches(&self) -> usize {
        self.inner.supplier_fetches.load(Ordering::SeqCst)
    }
}

fn poisoned() -> CatalogError {
    CatalogError::Network("mock backend lock poisoned".to_string())
}

impl CatalogApi for MockCatalogApi {
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            inner.product_fetches.fetch_add(1, Ordering::SeqCst);
            let (result, delay) = {
                let data = inner.data.lock().map_err(|_| poisoned())?;
                (data.products.clone(), data.fetch_delay)
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }

    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            inner.category_fetches.fetch_add(1, Ordering::SeqCst);
            let (result, delay) = {
                let data = inner.data.lock().map_err(|_| poisoned())?;
                (data.categories.clone(), data.fetch_delay)
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }

    fn fetch_supplier(&self, id: SupplierId) -> impl Future<Output = Result<Supplier>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            inner.supplier_fetches.fetch_add(1, Ordering::SeqCst);
            let (result, delay) = {
                let data = inner.data.lock().map_err(|_| poisoned())?;
                let result = match (data.failing_suppliers.get(&id), data.suppliers.get(&id)) {
                    (Some(error), _) => Err(error.clone()),
                    (None, Some(supplier)) => Ok(supplier.clone()),
                    (None, None) => Err(CatalogError::Backend {
                        status: 404,
                        message: format!("Http failure response for api/suppliers/{id}: 404 Not Found"),
                    }),
                };
                (result, data.supplier_delays.get(&id).copied())
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }
}

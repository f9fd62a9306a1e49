//! Backend access.
//!
//! [`CatalogApi`] is the seam between the catalog and its backend. The
//! reqwest-backed [`HttpCatalogApi`] is used in production;
//! [`crate::mocks::MockCatalogApi`] replaces it in tests.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::types::{Category, Product, Supplier, SupplierId};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Read-only backend endpoints used by the catalog.
pub trait CatalogApi: Send + Sync {
    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status, or decode failure.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Fetch the full category list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status, or decode failure.
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;

    /// Fetch a single supplier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport, status, or decode failure.
    fn fetch_supplier(&self, id: SupplierId) -> impl Future<Output = Result<Supplier>> + Send;
}

/// JSON-over-HTTP backend client
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    products_url: String,
    categories_url: String,
    suppliers_url: String,
}

impl HttpCatalogApi {
    /// Create a client for the endpoints named in `config`
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a client reusing an existing `reqwest` client
    #[must_use]
    pub fn with_client(client: Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            products_url: config.products_url(),
            categories_url: config.categories_url(),
            suppliers_url: config.suppliers_url(),
        }
    }

    async fn get_json<T: DeserializeOwned + Send>(&self, url: String) -> Result<T> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "Backend rejected request");
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                message: format!("Http failure response for {url}: {status}"),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        tracing::debug!(%url, payload = %String::from_utf8_lossy(&body), "Fetched");

        serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

impl CatalogApi for HttpCatalogApi {
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send {
        self.get_json(self.products_url.clone())
    }

    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send {
        self.get_json(self.categories_url.clone())
    }

    fn fetch_supplier(&self, id: SupplierId) -> impl Future<Output = Result<Supplier>> + Send {
        self.get_json(format!("{}/{id}", self.suppliers_url))
    }
}

//! Catalog actions.

use crate::error::CatalogError;
use crate::types::{Category, CategoryId, Product, ProductId, Supplier};
use std::sync::Arc;

/// One of the two list feeds behind the enriched catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// The product list
    Products,
    /// The category list
    Categories,
}

/// Everything that can happen to the catalog.
///
/// Variants ending in `Loaded`/`Failed` are produced by effects; the rest
/// are sent by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    // Commands
    /// Fetch (or replay) both lists and rebuild the enriched catalog
    LoadCatalog,
    /// Move the product cursor
    SelectProduct {
        /// Product to show; zero clears the selection
        id: ProductId,
    },
    /// Move the category cursor
    SelectCategory {
        /// Category to filter by; zero removes the filter
        id: CategoryId,
    },
    /// Append a product to `productsWithAdd`
    AddProduct {
        /// Product to append; the placeholder when absent
        product: Option<Product>,
    },

    // Effect results
    /// The product list arrived
    ProductsLoaded {
        /// Raw products
        products: Arc<Vec<Product>>,
    },
    /// The category list arrived
    CategoriesLoaded {
        /// Categories
        categories: Arc<Vec<Category>>,
    },
    /// A list fetch failed
    FeedFailed {
        /// Which list
        feed: Feed,
        /// Why
        error: CatalogError,
    },
    /// Every supplier lookup for a selection succeeded
    SuppliersLoaded {
        /// Lookup this result belongs to
        generation: u64,
        /// Suppliers in request order
        suppliers: Vec<Supplier>,
    },
    /// A supplier lookup failed
    SuppliersFailed {
        /// Lookup this result belongs to
        generation: u64,
        /// First failure
        error: CatalogError,
    },
}

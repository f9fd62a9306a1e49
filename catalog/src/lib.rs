//! # Product Catalog
//!
//! A reactive product catalog built on the reducer/store architecture.
//!
//! Products, categories and suppliers come from a REST backend. Product and
//! category lists are fetched once and replayed; together they form the
//! enriched catalog (prices marked up, category names resolved). Two
//! cursors select a product and filter by category, an insertion log
//! accumulates locally added products, and one error handler turns every
//! failure into a display message.
//!
//! ## Layout
//!
//! - [`types`]: wire records
//! - [`api`]: backend trait and reqwest client
//! - [`sources`]: replayed lists and supplier lookups
//! - [`enrichment`], [`selection`], [`insertion`]: the pure building blocks
//! - [`state`], [`actions`], [`reducer`], [`environment`]: the feature
//! - [`catalog`]: the facade presentation code talks to
//!
//! ## Example
//!
//! ```ignore
//! use product_catalog::{Catalog, CatalogConfig};
//!
//! let catalog = Catalog::from_config(&CatalogConfig::from_env()?);
//! catalog.load().await?.wait().await;
//! catalog.select_product(5u32).await?.wait().await;
//!
//! println!("{:?}", catalog.page_title().await);
//! ```

pub mod actions;
pub mod api;
pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod environment;
pub mod error;
pub mod insertion;
pub mod mocks;
pub mod reducer;
pub mod selection;
pub mod sources;
pub mod state;
pub mod types;

pub use actions::{CatalogAction, Feed};
pub use api::{CatalogApi, HttpCatalogApi};
pub use catalog::{Catalog, CatalogStore};
pub use config::{CatalogConfig, ConfigError};
pub use environment::CatalogEnvironment;
pub use error::{CatalogError, ErrorHandler, ErrorRecord, Result};
pub use reducer::CatalogReducer;
pub use state::CatalogState;
pub use types::{Category, CategoryId, Product, ProductId, Supplier, SupplierId};

//! The catalog reducer.
//!
//! Data flow:
//!
//! ```text
//! LoadCatalog ──► fetch products ─┐
//!             └─► fetch categories ┴─► Enrichment ─► catalog ─┬─► insertion log (full replace)
//!                                                              └─► supplier lookup (if selected)
//! ```
//!
//! Selection and insertion each touch exactly one cell of state.

use crate::actions::{CatalogAction, Feed};
use crate::api::CatalogApi;
use crate::environment::CatalogEnvironment;
use crate::insertion::InsertionEvent;
use crate::state::CatalogState;
use crate::types::Product;
use catalog_core::environment::Clock;
use catalog_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::marker::PhantomData;
use std::sync::Arc;

type Effects = SmallVec<[Effect<CatalogAction>; 4]>;

/// Reducer for [`CatalogState`].
pub struct CatalogReducer<A, C> {
    _phantom: PhantomData<fn() -> (A, C)>,
}

impl<A, C> CatalogReducer<A, C> {
    /// Create the reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<A, C> Default for CatalogReducer<A, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, C> Clone for CatalogReducer<A, C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<A, C> std::fmt::Debug for CatalogReducer<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CatalogReducer")
    }
}

impl<A, C> CatalogReducer<A, C>
where
    A: CatalogApi + 'static,
    C: Clock,
{
    fn load(env: &CatalogEnvironment<A, C>) -> Effect<CatalogAction> {
        let products = env.sources.clone();
        let categories = env.sources.clone();

        Effect::merge(vec![
            Effect::Future(Box::pin(async move {
                Some(match products.products().await {
                    Ok(products) => CatalogAction::ProductsLoaded { products },
                    Err(error) => CatalogAction::FeedFailed {
                        feed: Feed::Products,
                        error,
                    },
                })
            })),
            Effect::Future(Box::pin(async move {
                Some(match categories.categories().await {
                    Ok(categories) => CatalogAction::CategoriesLoaded { categories },
                    Err(error) => CatalogAction::FeedFailed {
                        feed: Feed::Categories,
                        error,
                    },
                })
            })),
        ])
    }

    /// Install a freshly enriched catalog and refresh what depends on it.
    fn publish(
        state: &mut CatalogState,
        catalog: Vec<Product>,
        env: &CatalogEnvironment<A, C>,
    ) -> Effects {
        tracing::debug!(count = catalog.len(), "Catalog updated");

        state
            .insertion
            .apply(InsertionEvent::FullReplace(catalog.clone()));
        state.catalog = Some(Arc::new(catalog));

        if state.suppliers.is_halted() {
            tracing::debug!("Supplier view halted, not refreshing");
            return smallvec![Effect::None];
        }
        Self::refresh_suppliers(state, env)
    }

    /// Start a supplier lookup for the selected product.
    fn refresh_suppliers(state: &mut CatalogState, env: &CatalogEnvironment<A, C>) -> Effects {
        let Some(product) = state.selected_product() else {
            tracing::debug!(
                id = %state.selection.product.current(),
                "No selected product, supplier view unchanged"
            );
            return smallvec![Effect::None];
        };

        let ids = product.supplier_ids.clone().unwrap_or_default();
        if ids.is_empty() {
            state.suppliers.emit_empty();
            return smallvec![Effect::None];
        }

        let generation = state.suppliers.begin();
        let sources = env.sources.clone();
        tracing::debug!(generation, ?ids, "Looking up suppliers");

        smallvec![Effect::Future(Box::pin(async move {
            Some(match sources.suppliers(&ids).await {
                Ok(suppliers) => CatalogAction::SuppliersLoaded {
                    generation,
                    suppliers,
                },
                Err(error) => CatalogAction::SuppliersFailed { generation, error },
            })
        }))]
    }
}

impl<A, C> Reducer for CatalogReducer<A, C>
where
    A: CatalogApi + 'static,
    C: Clock,
{
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = CatalogEnvironment<A, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            CatalogAction::LoadCatalog => {
                tracing::debug!("Loading catalog");
                state.enrichment.reset();
                state.catalog_failed = false;
                state.categories_failed = false;
                smallvec![Self::load(env)]
            },

            CatalogAction::ProductsLoaded { products } => {
                if state.catalog_failed {
                    tracing::debug!("Catalog stopped, ignoring products");
                    return smallvec![Effect::None];
                }
                match state.enrichment.on_products(products) {
                    Some(catalog) => Self::publish(state, catalog, env),
                    None => smallvec![Effect::None],
                }
            },

            CatalogAction::CategoriesLoaded { categories } => {
                state.categories = Some(Arc::clone(&categories));
                if state.catalog_failed {
                    tracing::debug!("Catalog stopped, ignoring categories");
                    return smallvec![Effect::None];
                }
                match state.enrichment.on_categories(categories) {
                    Some(catalog) => Self::publish(state, catalog, env),
                    None => smallvec![Effect::None],
                }
            },

            CatalogAction::FeedFailed { feed, error } => {
                env.errors.handle::<()>(&mut state.errors, &error);
                state.catalog_failed = true;
                if feed == Feed::Categories {
                    state.categories_failed = true;
                    state.categories = None;
                }
                smallvec![Effect::None]
            },

            CatalogAction::SelectProduct { id } => {
                tracing::debug!(%id, "Product selected");
                state.selection.product.select(id);
                state.suppliers.resume();
                Self::refresh_suppliers(state, env)
            },

            CatalogAction::SelectCategory { id } => {
                tracing::debug!(%id, "Category selected");
                state.selection.category.select(id);
                smallvec![Effect::None]
            },

            CatalogAction::AddProduct { product } => {
                let product = product.unwrap_or_else(Product::placeholder);
                tracing::debug!(id = %product.id, "Product added");
                state.insertion.apply(InsertionEvent::Append(product));
                smallvec![Effect::None]
            },

            CatalogAction::SuppliersLoaded {
                generation,
                suppliers,
            } => {
                if !state.suppliers.complete(generation, suppliers) {
                    tracing::warn!(
                        generation,
                        current = state.suppliers.generation(),
                        "Discarding superseded supplier lookup"
                    );
                }
                smallvec![Effect::None]
            },

            CatalogAction::SuppliersFailed { generation, error } => {
                if state.suppliers.fail(generation) {
                    env.errors.handle::<()>(&mut state.errors, &error);
                } else {
                    tracing::warn!(
                        generation,
                        current = state.suppliers.generation(),
                        %error,
                        "Discarding failure of superseded supplier lookup"
                    );
                }
                smallvec![Effect::None]
            },
        }
    }
}

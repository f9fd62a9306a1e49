//! Dependencies injected into the catalog reducer.

use crate::api::CatalogApi;
use crate::error::ErrorHandler;
use crate::sources::CatalogSources;
use catalog_core::environment::Clock;

/// Catalog environment.
///
/// Generic over the backend `A` and the clock `C`, so tests can run the
/// reducer against [`crate::mocks::MockCatalogApi`] and a fixed clock.
pub struct CatalogEnvironment<A, C> {
    /// Replayed product/category lists and supplier lookups
    pub sources: CatalogSources<A>,
    /// Shared error handler
    pub errors: ErrorHandler<C>,
}

impl<A: CatalogApi, C: Clock> CatalogEnvironment<A, C> {
    /// Build an environment around `api`, stamping errors with `clock`.
    #[must_use]
    pub fn new(api: A, clock: C) -> Self {
        Self {
            sources: CatalogSources::new(api),
            errors: ErrorHandler::new(clock),
        }
    }
}

impl<A, C: Clone> Clone for CatalogEnvironment<A, C> {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            errors: self.errors.clone(),
        }
    }
}

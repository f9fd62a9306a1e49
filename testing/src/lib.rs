//! # Catalog Testing
//!
//! Testing utilities for catalog reducers and stores.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Helpers that run effect futures and collect the actions they feed back
//!
//! ## Example
//!
//! ```ignore
//! use catalog_testing::{test_clock, ReducerTest};
//! use product_catalog::environment::CatalogEnvironment;
//! use product_catalog::mocks::MockCatalogApi;
//! use product_catalog::reducer::CatalogReducer;
//! use product_catalog::{CatalogAction, CatalogState, CategoryId};
//!
//! ReducerTest::new(CatalogReducer::new())
//!     .with_env(CatalogEnvironment::new(MockCatalogApi::new(), test_clock()))
//!     .given_state(CatalogState::default())
//!     .when_action(CatalogAction::SelectCategory { id: CategoryId::new(0) })
//!     .then_state(|state| assert!(state.selected_category_id().is_none()))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use catalog_core::environment::Clock;


/// Deterministic environment implementations.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making timestamped error messages
    /// reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_testing::mocks::FixedClock;
    /// use catalog_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Never in practice: the timestamp is a constant.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Effect helpers for tests.
pub mod helpers {
    use catalog_core::effect::Effect;
    use futures::future::BoxFuture;
    use futures::FutureExt;

    /// Run every future in `effects` and collect the actions they produce.
    ///
    /// Parallel effects are flattened and awaited in declaration order, so the
    /// result is deterministic. Futures resolving to `None` contribute nothing.
    pub async fn run_effects<A, I>(effects: I) -> Vec<A>
    where
        I: IntoIterator<Item = Effect<A>>,
        A: Send + 'static,
    {
        let mut actions = Vec::new();
        for effect in effects {
            actions.extend(run_effect(effect).await);
        }
        actions
    }

    fn run_effect<A>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>>
    where
        A: Send + 'static,
    {
        async move {
            match effect {
                Effect::None => Vec::new(),
                Effect::Future(fut) => fut.await.into_iter().collect(),
                Effect::Parallel(effects) => {
                    let mut actions = Vec::new();
                    for effect in effects {
                        actions.extend(run_effect(effect).await);
                    }
                    actions
                },
            }
        }
        .boxed()
    }

    /// Install a `tracing` subscriber that writes through the test harness.
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, run_effects};
pub use mocks::{test_clock, FixedClock};
pub use reducer_test::{assertions, ReducerTest};

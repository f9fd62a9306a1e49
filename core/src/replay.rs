//! Compute once, replay to every caller.
//!
//! A [`Replay`] runs its fetch the first time a value is requested and hands
//! the same `Arc` to every later caller. Concurrent first callers share one
//! in-flight fetch. A failed fetch is not cached: the next caller starts a
//! fresh one.
//!
//! Clones share the same cell.
//!
//! # Examples
//!
//! ```
//! use catalog_core::replay::Replay;
//!
//! # tokio_test::block_on(async {
//! let replay: Replay<Vec<u32>> = Replay::new();
//! let first = replay
//!     .get_or_fetch(|| async { Ok::<_, std::io::Error>(vec![1, 2, 3]) })
//!     .await
//!     .unwrap();
//! let second = replay
//!     .get_or_fetch(|| async { Ok::<_, std::io::Error>(vec![]) })
//!     .await
//!     .unwrap();
//! assert_eq!(first, second);
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Single-slot cache of a successful fetch.
#[derive(Debug)]
pub struct Replay<T> {
    cell: Arc<OnceCell<Arc<T>>>,
}

impl<T> Replay<T> {
    /// Empty cache; nothing is fetched until the first request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Return the cached value, or run `fetch` to produce it.
    ///
    /// # Errors
    ///
    /// Returns the error of `fetch` when no value is cached yet and the
    /// fetch fails. The failure leaves the cache empty.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell
            .get_or_try_init(|| async move { fetch().await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    /// The cached value, without fetching.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<T>> {
        self.cell.get().map(Arc::clone)
    }

    /// Whether a value has been cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cell.initialized()
    }
}

impl<T> Clone for Replay<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Default for Replay<T> {
    fn default() -> Self {
        Self::new()
    }
}

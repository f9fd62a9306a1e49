//! Selection cursors.
//!
//! A cursor holds one identifier, with the zero id meaning "nothing
//! selected". Selecting never validates: an id that matches no record simply
//! yields empty derived views.

use crate::types::{CategoryId, ProductId};

/// A single selected identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor<I> {
    current: I,
}

impl<I: Copy + Default + PartialEq> Cursor<I> {
    /// Overwrite the cursor.
    pub fn select(&mut self, id: I) {
        self.current = id;
    }

    /// Reset to "nothing selected".
    pub fn clear(&mut self) {
        self.current = I::default();
    }

    /// The raw cursor value, zero included.
    #[must_use]
    pub fn current(&self) -> I {
        self.current
    }

    /// The selected id, if any.
    #[must_use]
    pub fn selected(&self) -> Option<I> {
        (self.current != I::default()).then_some(self.current)
    }
}

/// The two catalog cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected product; zero is none
    pub product: Cursor<ProductId>,
    /// Category filter; zero is no filter
    pub category: Cursor<CategoryId>,
}

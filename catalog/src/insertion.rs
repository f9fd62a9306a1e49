//! The insertion log behind `productsWithAdd`.
//!
//! A fold over two kinds of events: a full batch replaces the contents, a
//! single product is appended.

use crate::types::Product;

/// Input to [`InsertionLog::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertionEvent {
    /// A new enriched catalog; replaces everything.
    FullReplace(Vec<Product>),
    /// One locally added product.
    Append(Product),
}

/// Accumulated product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertionLog {
    items: Vec<Product>,
}

impl InsertionLog {
    /// Fold one event into the log.
    pub fn apply(&mut self, event: InsertionEvent) {
        match event {
            InsertionEvent::FullReplace(products) => self.items = products,
            InsertionEvent::Append(product) => self.items.push(product),
        }
    }

    /// Current contents.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

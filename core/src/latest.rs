//! Combine-latest over two sources.
//!
//! [`Latest2`] keeps the last value seen from each side. Once both slots are
//! filled, every update yields the current pair: the updated value together
//! with the last known value of the other side. Before that, updates only
//! fill their slot.
//!
//! # Examples
//!
//! ```
//! use catalog_core::latest::Latest2;
//!
//! let mut latest = Latest2::new();
//! assert!(latest.set_left(1).is_none());
//! assert_eq!(latest.set_right("a"), Some((&1, &"a")));
//! assert_eq!(latest.set_left(2), Some((&2, &"a")));
//! ```

/// Last value from each of two sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Latest2<A, B> {
    left: Option<A>,
    right: Option<B>,
}

impl<A, B> Latest2<A, B> {
    /// Both slots empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: None,
            right: None,
        }
    }

    /// Store a new left value, returning the pair if both sides are known.
    pub fn set_left(&mut self, value: A) -> Option<(&A, &B)> {
        self.left = Some(value);
        self.pair()
    }

    /// Store a new right value, returning the pair if both sides are known.
    pub fn set_right(&mut self, value: B) -> Option<(&A, &B)> {
        self.right = Some(value);
        self.pair()
    }

    /// The current pair, if both sides have emitted.
    #[must_use]
    pub fn pair(&self) -> Option<(&A, &B)> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }

    /// Last left value.
    #[must_use]
    pub const fn left(&self) -> Option<&A> {
        self.left.as_ref()
    }

    /// Last right value.
    #[must_use]
    pub const fn right(&self) -> Option<&B> {
        self.right.as_ref()
    }

    /// Whether both sides have emitted at least once.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Forget both sides.
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }
}

impl<A, B> Default for Latest2<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

//! Catalog state and the views derived from it.
//!
//! Every view is a plain function of [`CatalogState`]. Reading one through
//! `Store::state` gives its current value; `Store::observe` recomputes it
//! after every state change.

use crate::enrichment::Enrichment;
use crate::error::{ErrorRecord, ErrorSlot};
use crate::insertion::InsertionLog;
use crate::selection::Selection;
use crate::types::{Category, CategoryId, Product, ProductId, Supplier};
use std::sync::Arc;

/// State of the supplier view for the selected product.
///
/// Each lookup started for the view gets a new generation. Results carrying
/// an older generation belong to a superseded lookup and are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierView {
    generation: u64,
    suppliers: Option<Vec<Supplier>>,
    halted: bool,
}

impl SupplierView {
    /// Generation of the most recent lookup.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Last emitted supplier list.
    #[must_use]
    pub fn suppliers(&self) -> Option<&[Supplier]> {
        self.suppliers.as_deref()
    }

    /// Whether a failure stopped automatic refreshes.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Start a lookup, superseding any in flight.
    pub(crate) const fn begin(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Emit an empty list without a lookup.
    pub(crate) fn emit_empty(&mut self) {
        self.begin();
        self.suppliers = Some(Vec::new());
    }

    /// Accept a completed lookup. Returns `false` if it was superseded.
    pub(crate) fn complete(&mut self, generation: u64, suppliers: Vec<Supplier>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.suppliers = Some(suppliers);
        true
    }

    /// Record a failed lookup. Returns `false` if it was superseded.
    pub(crate) fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.suppliers = None;
        self.halted = true;
        true
    }

    /// Allow refreshes again after an explicit selection.
    pub(crate) const fn resume(&mut self) {
        self.halted = false;
    }
}

/// Everything the catalog knows.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub(crate) enrichment: Enrichment,
    pub(crate) catalog: Option<Arc<Vec<Product>>>,
    pub(crate) catalog_failed: bool,
    pub(crate) categories: Option<Arc<Vec<Category>>>,
    pub(crate) categories_failed: bool,
    pub(crate) selection: Selection,
    pub(crate) insertion: InsertionLog,
    pub(crate) suppliers: SupplierView,
    pub(crate) errors: ErrorSlot,
}

impl CatalogState {
    /// The enriched catalog, once both lists have arrived.
    #[must_use]
    pub fn enriched_products(&self) -> Option<&[Product]> {
        self.catalog.as_deref().map(Vec::as_slice)
    }

    /// Enriched products in the selected category, or all of them with no
    /// category selected. Empty until the catalog has arrived.
    #[must_use]
    pub fn filtered_products(&self) -> Vec<Product> {
        let products = self.enriched_products().unwrap_or_default();
        match self.selection.category.selected() {
            Some(category) => products
                .iter()
                .filter(|product| product.category_id == Some(category))
                .cloned()
                .collect(),
            None => products.to_vec(),
        }
    }

    /// The first enriched product with the selected id.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selection.product.current();
        self.enriched_products()?
            .iter()
            .find(|product| product.id == id)
    }

    /// Detail page heading for the selected product.
    #[must_use]
    pub fn page_title(&self) -> Option<String> {
        self.selected_product()
            .map(|product| format!("Product detail for: {}", product.product_name))
    }

    /// Suppliers of the selected product.
    #[must_use]
    pub fn selected_product_suppliers(&self) -> Option<&[Supplier]> {
        self.suppliers.suppliers()
    }

    /// The category list, until it fails.
    #[must_use]
    pub fn categories(&self) -> Option<&[Category]> {
        self.categories.as_deref().map(Vec::as_slice)
    }

    /// Enriched catalog plus locally added products.
    #[must_use]
    pub fn products_with_add(&self) -> &[Product] {
        self.insertion.items()
    }

    /// Message of the most recent failure.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.errors.message()
    }

    /// The most recent failure with its timestamp.
    #[must_use]
    pub const fn last_error(&self) -> Option<&ErrorRecord> {
        self.errors.last()
    }

    /// Raw product cursor.
    #[must_use]
    pub fn selected_product_id(&self) -> ProductId {
        self.selection.product.current()
    }

    /// Selected category, if filtering.
    #[must_use]
    pub fn selected_category_id(&self) -> Option<CategoryId> {
        self.selection.category.selected()
    }

    /// Supplier view bookkeeping.
    #[must_use]
    pub const fn supplier_view(&self) -> &SupplierView {
        &self.suppliers
    }

    /// Whether the enriched catalog stopped after a failure.
    #[must_use]
    pub const fn is_catalog_failed(&self) -> bool {
        self.catalog_failed
    }

    /// Whether the category list stopped after a failure.
    #[must_use]
    pub const fn is_categories_failed(&self) -> bool {
        self.categories_failed
    }
}

//! Catalog records as they travel over the wire.
//!
//! Field names are camelCase in JSON. Derived fields (`category`,
//! `searchKey`) are absent on fetched records and filled in by
//! [`crate::enrichment`].

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// The raw identifier.
            #[must_use]
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_type!(
    /// Product identifier. `0` is reserved for "no product selected".
    ProductId
);
id_type!(
    /// Category identifier. `0` is reserved for "no category filter".
    CategoryId
);
id_type!(
    /// Supplier identifier.
    SupplierId
);

/// A product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identifier
    pub id: ProductId,
    /// Display name
    pub product_name: String,
    /// Stock-keeping code
    #[serde(default)]
    pub product_code: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Unit price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Foreign key into the category list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Category name, resolved by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Units on hand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_in_stock: Option<u32>,
    /// Suppliers carrying this product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_ids: Option<Vec<SupplierId>>,
    /// Search terms, set by enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_key: Option<Vec<String>>,
}

impl Product {
    /// Minimal product with only the required fields set.
    #[must_use]
    pub fn new(id: ProductId, product_name: impl Into<String>) -> Self {
        Self {
            id,
            product_name: product_name.into(),
            product_code: String::new(),
            description: String::new(),
            price: None,
            category_id: None,
            category: None,
            quantity_in_stock: None,
            supplier_ids: None,
            search_key: None,
        }
    }

    /// The record appended when a product is added without one.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: ProductId::new(42),
            product_name: "Another One".to_string(),
            product_code: "TBX-0042".to_string(),
            description: "Our new product".to_string(),
            price: Some(8.9),
            category_id: Some(CategoryId::new(3)),
            category: Some("Toolbox".to_string()),
            quantity_in_stock: Some(30),
            supplier_ids: None,
            search_key: None,
        }
    }

    /// Set the price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the category foreign key.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the supplier list.
    #[must_use]
    pub fn with_suppliers(mut self, supplier_ids: impl IntoIterator<Item = SupplierId>) -> Self {
        self.supplier_ids = Some(supplier_ids.into_iter().collect());
        self
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
}

impl Category {
    /// Create a category.
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A supplier record.
///
/// Only the identifier is interpreted; every other field is carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique identifier
    pub id: SupplierId,
    /// Remaining fields, as received
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Supplier {
    /// Supplier with no attributes besides its id.
    #[must_use]
    pub fn new(id: SupplierId) -> Self {
        Self {
            id,
            attributes: serde_json::Map::new(),
        }
    }

    /// Attach an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

//! # Domain Types
//!
//! The single record type managed by Estoque.
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │              Product                │
//! │  ─────────────────────────────────  │
//! │  id        i64    (storage-assigned)│
//! │  name      String (never empty)     │
//! │  price     Money  (>= 0, 2 places)  │
//! │  quantity  i64    (>= 0)            │
//! └─────────────────────────────────────┘
//!          1 Product  ==  1 row in `product`
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Id carried by a product that has not been persisted yet.
///
/// Storage ids start at 1, so 0 never collides with a real row.
pub const UNASSIGNED_ID: i64 = 0;

// =============================================================================
// Product
// =============================================================================

/// One inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned by the database on insert.
    /// Ignored on create; required on update/delete.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Units in stock.
    pub quantity: i64,
}

impl Product {
    /// Creates a product that has not been stored yet.
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        Product {
            id: UNASSIGNED_ID,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Returns a copy of this product carrying the given id.
    ///
    /// ## Usage
    /// The repository calls this with the generated key after an insert.
    pub fn with_id(&self, id: i64) -> Self {
        Product {
            id,
            ..self.clone()
        }
    }

    /// Whether this product has a storage-assigned id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id > UNASSIGNED_ID
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # estoque-core: Pure Domain Logic for Estoque
//!
//! This crate holds the inventory record type, the `Money` type used for
//! prices, and the validation that turns raw form text into a `Product`.
//! It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Estoque Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 estoque CLI (command dispatch)                  │   │
//! │  │        add ──► update ──► delete ──► list ──► next-id           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ estoque-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌───────────┐     ┌──────────────────┐     │   │
//! │  │   │   types   │     │   money   │     │    validation    │     │   │
//! │  │   │  Product  │     │   Money   │     │   ProductForm    │     │   │
//! │  │   └───────────┘     └───────────┘     └──────────────────┘     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 estoque-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `Product` record
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation and form parsing
//!
//! ## Example Usage
//!
//! ```rust
//! use estoque_core::validation::ProductForm;
//!
//! let form = ProductForm::new("", "Mouse", "49.90", "10");
//! let product = form.to_new_product().unwrap();
//!
//! assert_eq!(product.name, "Mouse");
//! assert_eq!(product.price.cents(), 4990);
//! assert!(!product.is_persisted());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::Product;
pub use validation::ProductForm;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Placeholder shown in the id field before a row is selected.
///
/// A form carrying this text (or an empty id) has no selection, so it
/// cannot be used for update or delete.
pub const ID_PLACEHOLDER: &str = "ID (auto)";

//! # estoque-db: Database Layer for Estoque
//!
//! This crate provides database access for Estoque.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Estoque Data Flow                                │
//! │                                                                         │
//! │  CLI command (add / update / delete / list)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  estoque-core: ProductForm ──► Product (validated)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ★ estoque-db (THIS CRATE) ★                                            │
//! │       │  ProductRepository                                              │
//! │       │  ConnectionProvider: open ► one statement ► close               │
//! │       ▼                                                                 │
//! │  SQLite file (table `product`)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`connection`] - Connection configuration, provider and `Database` handle
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`schema`] - Table bootstrap for fresh database files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estoque_db::{ConnectionConfig, Database};
//!
//! let db = Database::new(ConnectionConfig::new("path/to/estoque.db"));
//! db.ensure_schema().await?;
//!
//! let products = db.products().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use connection::{ConnectionConfig, ConnectionProvider, Database};
pub use error::{DbError, DbResult};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;

//! # Repository Module
//!
//! Database repository implementations for Estoque.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CLI command ──► ProductRepository ──► ConnectionProvider ──► SQLite   │
//! │                    (one statement)       (one connection)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product create/list/update/delete

pub mod product;

//! # Commands Module
//!
//! Everything a subcommand of the `estoque` binary can do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── product.rs  ◄─── Product CRUD, next-id probe, schema bootstrap, health
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  estoque add --name Mouse --price 49.90 --quantity 10                   │
//! │         │                                                               │
//! │         │ (clap parses flags into a ProductForm)                        │
//! │         ▼                                                               │
//! │  async fn add_product(                                                  │
//! │      db: &Database,          ◄── Built from AppConfig                   │
//! │      form: &ProductForm,     ◄── Raw field text                         │
//! │  ) -> Result<CommandOutcome, ApiError>                                  │
//! │         │                                                               │
//! │         │ (validate → repository → refreshed list)                      │
//! │         ▼                                                               │
//! │  render: message + table, or JSON with --json                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;

pub use product::{
    add_product, check_health, delete_product, init_schema, list_products, next_product_id,
    show_product, update_product, CommandOutcome, ProductDto,
};

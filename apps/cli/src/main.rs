//! # Estoque Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        estoque                                          │
//! │                                                                         │
//! │  main.rs ────► Parses arguments, sets up logging                        │
//! │  lib.rs ─────► Loads config, dispatches the command, renders output     │
//! │  commands/ ──► add, update, delete, list, show, next-id, init           │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  SQLite database (estoque.db, one connection per operation)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::process::ExitCode;

use estoque_cli::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    estoque_cli::init_tracing();

    estoque_cli::run(cli).await
}

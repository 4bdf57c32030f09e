//! # Estoque CLI Library
//!
//! Everything behind the `estoque` binary: argument parsing, configuration,
//! command dispatch and output.
//!
//! ## Module Organization
//! ```text
//! estoque_cli/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── AppConfig (env, defaults, price display)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── product.rs  ◄─── Product CRUD commands
//! ├── render.rs       ◄─── Table / JSON output
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::AppConfig;
use error::ApiError;
use estoque_db::Database;

/// Runs one invocation of the CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • ESTOQUE_* environment variables, then --db/--user/--password      │
/// │                                                                         │
/// │  2. Prepare Default Location ─────────────────────────────────────────► │
/// │     • Creates the platform data directory when the default file is used │
/// │                                                                         │
/// │  3. Dispatch Command ─────────────────────────────────────────────────► │
/// │     • One repository operation at a time, each on its own connection    │
/// │                                                                         │
/// │  4. Render ───────────────────────────────────────────────────────────► │
/// │     • stdout: table or JSON                                             │
/// │     • stderr: error line, exit code by error class                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ExitCode {
    let config = cli.apply_overrides(AppConfig::from_env());
    debug!(endpoint = %config.database_url, "Configuration loaded");

    let result = match prepare_default_location(&config) {
        Ok(()) => execute(&cli, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                // stdout may be closed; nothing more to report then
                let _ = render::write_json(&mut io::stdout().lock(), &err);
            } else {
                eprintln!("error: {}", err);
            }
            ExitCode::from(err.code.exit_code())
        }
    }
}

/// Runs the parsed command and writes its output to stdout.
async fn execute(cli: &Cli, config: &AppConfig) -> Result<(), ApiError> {
    let db = Database::new(config.connection_config());

    let outcome = match &cli.command {
        Command::Init => commands::init_schema(&db).await?,
        Command::List => commands::list_products(&db).await?,
        Command::Show(args) => commands::show_product(&db, &args.id).await?,
        Command::Add(args) => commands::add_product(&db, &args.to_form()).await?,
        Command::Update(args) => commands::update_product(&db, &args.to_form()).await?,
        Command::Delete(args) => commands::delete_product(&db, &args.id).await?,
        Command::Health => commands::check_health(&db).await?,
        Command::NextId => {
            let id = commands::next_product_id(&db).await?;
            return print(|out| {
                if cli.json {
                    render::write_json(out, &serde_json::json!({ "nextId": id }))
                } else {
                    writeln!(out, "{}", id)
                }
            });
        }
    };

    print(|out| {
        if cli.json {
            render::write_json(out, &outcome)
        } else {
            render::write_outcome(out, &outcome, config)
        }
    })
}

fn print(f: impl FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>) -> Result<(), ApiError> {
    let mut out = io::stdout().lock();
    f(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| ApiError::internal(format!("Failed to write output: {}", e)))
}

/// Creates the platform data directory when the default database is used.
fn prepare_default_location(config: &AppConfig) -> Result<(), ApiError> {
    if !config.uses_default_database() {
        return Ok(());
    }

    if let Some(dir) = Path::new(&config.database_url).parent() {
        std::fs::create_dir_all(dir).map_err(|e| {
            ApiError::internal(format!(
                "Could not create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        debug!(path = %dir.display(), "Data directory ready");
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so that table and JSON output on stdout stay clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=estoque=trace` - Show trace for estoque crates only
/// - Default: WARN, INFO for estoque crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,estoque=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

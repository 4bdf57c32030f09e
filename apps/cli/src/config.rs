//! # Application Configuration
//!
//! Connection settings and display preferences loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--user`, `--password`)
//! 2. Environment variables (`ESTOQUE_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use directories::ProjectDirs;
use estoque_core::Money;
use estoque_db::ConnectionConfig;
use serde::Serialize;
use std::path::PathBuf;

/// Database file name used inside the platform data directory.
pub const DEFAULT_DATABASE_FILE: &str = "estoque.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Database endpoint (SQLite URL or file path).
    pub database_url: String,

    /// Database user name.
    pub username: Option<String>,

    /// Database password.
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Currency symbol shown in front of prices.
    pub currency_symbol: String,
}

impl Default for AppConfig {
    /// Returns the default configuration.
    ///
    /// ## Default Values
    /// - Database: `estoque.db` in the platform data directory
    ///   (falls back to the working directory)
    /// - No credentials
    /// - Currency: `R$`
    fn default() -> Self {
        AppConfig {
            database_url: default_database_path()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
                .display()
                .to_string(),
            username: None,
            password: None,
            currency_symbol: "R$".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ESTOQUE_DB_URL`: Database endpoint
    /// - `ESTOQUE_DB_USER`: Database user name
    /// - `ESTOQUE_DB_PASSWORD`: Database password
    /// - `ESTOQUE_CURRENCY_SYMBOL`: Currency symbol for display
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(url) = get("ESTOQUE_DB_URL") {
            config.database_url = url;
        }

        if let Some(user) = get("ESTOQUE_DB_USER") {
            config.username = Some(user);
        }

        if let Some(password) = get("ESTOQUE_DB_PASSWORD") {
            config.password = Some(password);
        }

        if let Some(symbol) = get("ESTOQUE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Builds the connection configuration handed to the database layer.
    pub fn connection_config(&self) -> ConnectionConfig {
        let mut config = ConnectionConfig::new(self.database_url.clone());
        if let Some(user) = &self.username {
            config = config.username(user.clone());
        }
        if let Some(password) = &self.password {
            config = config.password(password.clone());
        }
        config
    }

    /// Whether the endpoint is the default file in the data directory.
    pub fn uses_default_database(&self) -> bool {
        default_database_path()
            .map(|path| path.display().to_string() == self.database_url)
            .unwrap_or(false)
    }

    /// Formats a price with the currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use estoque_cli::config::AppConfig;
    /// use estoque_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_price(Money::from_cents(4990)), "R$ 49.90");
    /// ```
    pub fn format_price(&self, price: Money) -> String {
        format!("{} {}", self.currency_symbol, price)
    }
}

/// Determines the default database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.estoque.estoque/estoque.db`
/// - **Windows**: `%APPDATA%\estoque\estoque\data\estoque.db`
/// - **Linux**: `~/.local/share/estoque/estoque.db`
pub fn default_database_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "estoque", "estoque")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DATABASE_FILE))
}

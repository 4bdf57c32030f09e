//! # Connection Provider
//!
//! Opens one SQLite connection per repository operation and closes it
//! afterwards. There is no pool and no reuse across calls.
//!
//! ## Lifecycle of a Connection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  repository.create(&product)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  provider.acquire() ──── fails? ──► DbError::ConnectionFailed           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  run ONE statement ──── Ok(T) or Err(DbError)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  provider.release(conn)   ◄── ALWAYS, on success and on failure         │
//! │       │                        close error? log at warn, swallow        │
//! │       ▼                                                                 │
//! │  return the statement's result                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! The endpoint and credentials are injected through [`ConnectionConfig`];
//! nothing is compiled in.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqliteSynchronous};
use sqlx::{ConnectOptions, Connection};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::schema;

// =============================================================================
// Configuration
// =============================================================================

/// Connection configuration: `{endpoint, username, password}`.
///
/// ## Endpoint Forms
/// - `sqlite://path/to/estoque.db` or `sqlite:estoque.db` (URL)
/// - `path/to/estoque.db` (plain file path)
///
/// ## Example
/// ```rust
/// use estoque_db::ConnectionConfig;
/// use std::time::Duration;
///
/// let config = ConnectionConfig::new("./data/estoque.db")
///     .username("estoque")
///     .password("secret")
///     .connect_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.endpoint, "./data/estoque.db");
/// assert!(!format!("{config:?}").contains("secret"));
/// ```
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Database location (URL or file path).
    pub endpoint: String,

    /// User name, for drivers that authenticate.
    pub username: Option<String>,

    /// Password, for drivers that authenticate. Redacted in `Debug`.
    pub password: Option<String>,

    /// How long `acquire` may take before giving up.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether a missing database file is created on first connect.
    /// Default: true
    pub create_if_missing: bool,
}

impl ConnectionConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        ConnectionConfig {
            endpoint: endpoint.into(),
            username: None,
            password: None,
            connect_timeout: Duration::from_secs(30),
            create_if_missing: true,
        }
    }

    /// Sets the user name.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether a missing database file may be created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Builds sqlx connect options from the endpoint.
    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.endpoint.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(&self.endpoint)
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new().filename(Path::new(&self.endpoint))
        };

        Ok(options
            // WAL mode: readers don't block the writer
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(self.create_if_missing))
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("connect_timeout", &self.connect_timeout)
            .field("create_if_missing", &self.create_if_missing)
            .finish()
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Hands out fresh connections built from a [`ConnectionConfig`].
///
/// Cloning is cheap; clones share nothing but the configuration.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: ConnectionConfig,
}

impl ConnectionProvider {
    /// Creates a provider for the given configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        if config.username.is_some() || config.password.is_some() {
            // SQLite has no authentication layer
            debug!("Credentials configured but not used by the SQLite driver");
        }
        ConnectionProvider { config }
    }

    /// Opens a new connection.
    ///
    /// ## Errors
    /// `DbError::ConnectionFailed` when the endpoint is malformed, cannot be
    /// opened, or the connect timeout elapses.
    pub async fn acquire(&self) -> DbResult<SqliteConnection> {
        let options = self.config.connect_options()?;

        debug!(endpoint = %self.config.endpoint, "Opening connection");

        match tokio::time::timeout(self.config.connect_timeout, options.connect()).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(DbError::ConnectionFailed(e.to_string())),
            Err(_) => Err(DbError::ConnectionFailed(format!(
                "timed out after {:?} connecting to {}",
                self.config.connect_timeout, self.config.endpoint
            ))),
        }
    }

    /// Closes a connection.
    ///
    /// A failure to close is logged and swallowed: the caller is already
    /// done with the connection, and an error from the operation itself
    /// takes precedence.
    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection");
        } else {
            debug!("Connection closed");
        }
    }

    /// Checks if the database is reachable (can execute queries).
    ///
    /// ## Returns
    /// * `true` - A connection opened and `SELECT 1` ran
    /// * `false` - Anything failed
    pub async fn health_check(&self) -> bool {
        let mut conn = match self.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                debug!(error = %e, "Health check could not connect");
                return false;
            }
        };

        let healthy = sqlx::query("SELECT 1").execute(&mut conn).await.is_ok();
        self.release(conn).await;
        healthy
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(ConnectionConfig::new("estoque.db"));
/// db.ensure_schema().await?;
///
/// let created = db.products().create(&product).await?;
/// let all = db.products().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    connections: ConnectionProvider,
}

impl Database {
    /// Creates a database handle. No connection is opened until an
    /// operation runs.
    pub fn new(config: ConnectionConfig) -> Self {
        info!(endpoint = %config.endpoint, "Database configured");
        Database {
            connections: ConnectionProvider::new(config),
        }
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.connections.clone())
    }

    /// Creates the product table if it does not exist yet.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        schema::ensure_schema(&self.connections).await
    }

    /// Checks if the database is reachable.
    pub async fn health_check(&self) -> bool {
        self.connections.health_check().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_builder() {
        let config = ConnectionConfig::new("/tmp/estoque.db")
            .username("estoque")
            .password("secret")
            .connect_timeout(Duration::from_secs(2))
            .create_if_missing(false);

        assert_eq!(config.username.as_deref(), Some("estoque"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert!(!config.create_if_missing);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ConnectionConfig::new("estoque.db").password("hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("********"));
    }

    #[tokio::test]
    async fn test_acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("estoque.db");
        let provider = ConnectionProvider::new(ConnectionConfig::new(path.display().to_string()));

        let conn = provider.acquire().await.unwrap();
        provider.release(conn).await;

        assert!(path.exists());
        assert!(provider.health_check().await);
    }

    #[tokio::test]
    async fn test_url_endpoint() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("url.db").display());
        let provider = ConnectionProvider::new(ConnectionConfig::new(url));

        assert!(provider.health_check().await);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("estoque.db");
        let provider = ConnectionProvider::new(ConnectionConfig::new(path.display().to_string()));

        let err = provider.acquire().await.unwrap_err();
        assert!(err.is_connection_error(), "unexpected error: {err}");
        assert!(!provider.health_check().await);
    }

    #[tokio::test]
    async fn test_missing_file_without_create_is_connection_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.db");
        let config = ConnectionConfig::new(path.display().to_string()).create_if_missing(false);

        let err = ConnectionProvider::new(config).acquire().await.unwrap_err();
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_malformed_url_is_connection_error() {
        let provider = ConnectionProvider::new(ConnectionConfig::new("sqlite://estoque.db?mode=bogus"));
        let err = provider.acquire().await.unwrap_err();
        assert!(err.is_connection_error());
    }

    #[tokio::test]
    async fn test_database_health_check() {
        let dir = TempDir::new().unwrap();

        let db = Database::new(ConnectionConfig::new(
            dir.path().join("estoque.db").display().to_string(),
        ));
        assert!(db.health_check().await);

        let unreachable = Database::new(ConnectionConfig::new(
            dir.path().join("gone").join("estoque.db").display().to_string(),
        ));
        assert!(!unreachable.health_check().await);
    }
}

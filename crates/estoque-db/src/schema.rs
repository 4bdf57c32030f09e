//! # Schema Bootstrap
//!
//! Creates the `product` table in a fresh database file.
//!
//! The table is normally pre-existing. This is a one-shot
//! `CREATE TABLE IF NOT EXISTS`, not a migration system: an existing table
//! is never altered and no version is tracked.
//!
//! ```text
//! product
//! ├── id        INTEGER PRIMARY KEY AUTOINCREMENT
//! ├── name      TEXT    NOT NULL
//! ├── price     NUMERIC NOT NULL
//! └── quantity  INTEGER NOT NULL
//! ```
//!
//! `AUTOINCREMENT` keeps ids from being reused after a delete, so an id
//! that was deleted once stays "never issued" for later updates.

use tracing::info;

use crate::connection::ConnectionProvider;
use crate::error::DbResult;

/// DDL for the product table.
pub const CREATE_PRODUCT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS product (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT    NOT NULL,
    price    NUMERIC NOT NULL,
    quantity INTEGER NOT NULL
)
"#;

/// Creates the product table if it does not exist.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Leaves existing rows untouched
///
/// ## Example
/// ```rust,ignore
/// let provider = ConnectionProvider::new(ConnectionConfig::new("estoque.db"));
/// ensure_schema(&provider).await?;
/// ```
pub async fn ensure_schema(provider: &ConnectionProvider) -> DbResult<()> {
    let mut conn = provider.acquire().await?;

    let result: DbResult<_> = sqlx::query(CREATE_PRODUCT_TABLE)
        .execute(&mut conn)
        .await
        .map_err(Into::into);

    provider.release(conn).await;

    if result.is_ok() {
        info!("Product table ready");
    }
    result.map(|_| ())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let provider = ConnectionProvider::new(ConnectionConfig::new(
            dir.path().join("estoque.db").display().to_string(),
        ));

        ensure_schema(&provider).await.unwrap();
        ensure_schema(&provider).await.unwrap();

        let mut conn = provider.acquire().await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        provider.release(conn).await;

        assert_eq!(count, 0);
    }
}

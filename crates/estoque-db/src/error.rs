//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  sqlx::Error ──────► From<sqlx::Error> ──────► DbError                  │
//! │                                                                         │
//! │  Connection class (cannot reach storage at all):                        │
//! │    any failure inside acquire()        ──► ConnectionFailed             │
//! │                                                                         │
//! │  Storage class (statement ran, storage said no):                        │
//! │    Io / Protocol on an open connection ──► QueryFailed                  │
//! │    Database "constraint failed"        ──► ConstraintViolation          │
//! │    Database (anything else)            ──► QueryFailed                  │
//! │    ColumnDecode / ColumnNotFound / ... ──► Decode                       │
//! │    postcondition (0 rows, no new id)   ──► NoRowsAffected /             │
//! │                                            MissingGeneratedId           │
//! │    MAX(id) has no successor            ──► IdExhausted                  │
//! │                                                                         │
//! │  NOT AN ERROR: update/delete of a missing id returns Ok(false)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection could not be established.
    ///
    /// Only `ConnectionProvider::acquire` produces this variant.
    ///
    /// ## When This Occurs
    /// - Endpoint is malformed
    /// - Database file doesn't exist (and may not be created) or is unreadable
    /// - Connect timeout elapsed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Statement was rejected by the database.
    ///
    /// ## When This Occurs
    /// - Table missing
    /// - Runtime SQL error
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A table constraint (NOT NULL, CHECK, UNIQUE) rejected the statement.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A write that must touch a row touched none.
    #[error("{operation} affected no rows")]
    NoRowsAffected { operation: String },

    /// An insert succeeded but storage returned no generated id.
    #[error("{entity} inserted but no id was generated")]
    MissingGeneratedId { entity: String },

    /// The id column holds the largest representable id.
    #[error("{entity} ids exhausted: no id after {max}")]
    IdExhausted { entity: String, max: i64 },

    /// A returned row could not be mapped back to a domain type.
    #[error("Failed to decode row: {0}")]
    Decode(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NoRowsAffected error for the given operation.
    pub fn no_rows(operation: impl Into<String>) -> Self {
        DbError::NoRowsAffected {
            operation: operation.into(),
        }
    }

    /// Creates a MissingGeneratedId error for the given entity.
    pub fn missing_id(entity: impl Into<String>) -> Self {
        DbError::MissingGeneratedId {
            entity: entity.into(),
        }
    }

    /// Whether storage could not be reached at all.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_))
    }

    /// Whether a statement ran (or was attempted on an open connection)
    /// and failed.
    pub fn is_storage_error(&self) -> bool {
        !self.is_connection_error()
    }
}

/// Convert sqlx errors to DbError.
///
/// Statements only run on a connection that `acquire` already opened, so
/// driver faults raised here are storage faults.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Io / Tls / Configuration / Protocol  → DbError::QueryFailed
/// sqlx::Error::Database                              → ConstraintViolation / QueryFailed
/// sqlx::Error::RowNotFound / ColumnDecode / ...      → DbError::Decode
/// Other                                              → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::Protocol(_) => DbError::QueryFailed(err.to_string()),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports e.g. "NOT NULL constraint failed: product.name"
                if msg.contains("constraint failed") {
                    DbError::ConstraintViolation(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::RowNotFound
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => DbError::Decode(err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(DbError::ConnectionFailed("refused".into()).is_connection_error());
        assert!(!DbError::ConnectionFailed("refused".into()).is_storage_error());

        for err in [
            DbError::QueryFailed("no such table: product".into()),
            DbError::ConstraintViolation("NOT NULL constraint failed".into()),
            DbError::no_rows("Insert product"),
            DbError::missing_id("Product"),
            DbError::Decode("bad column".into()),
            DbError::IdExhausted {
                entity: "Product".into(),
                max: i64::MAX,
            },
        ] {
            assert!(err.is_storage_error(), "{err} should be a storage error");
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DbError::no_rows("Insert product").to_string(),
            "Insert product affected no rows"
        );
        assert_eq!(
            DbError::missing_id("Product").to_string(),
            "Product inserted but no id was generated"
        );
    }

    #[test]
    fn test_from_sqlx_io_on_open_connection_is_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = DbError::from(sqlx::Error::Io(io));
        assert!(matches!(err, DbError::QueryFailed(_)));
        assert!(err.is_storage_error());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_from_sqlx_row_not_found_is_storage_error() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Decode(_)));
    }
}

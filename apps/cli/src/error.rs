//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Estoque                                │
//! │                                                                         │
//! │  Command Function  →  Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError ─────────► VALIDATION_ERROR  (exit 2)       │
//! │         ├── update/delete → false ───► NOT_FOUND         (exit 3)       │
//! │         ├── DbError::ConnectionFailed► CONNECTION_ERROR  (exit 4)       │
//! │         ├── any other DbError ───────► DATABASE_ERROR    (exit 5)       │
//! │         └── Success ─────────────────► table / JSON on stdout           │
//! │                                                                         │
//! │  Errors are printed to stderr: "error: [NotFound] Product not found: 7" │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use estoque_core::{CoreError, ValidationError};
use estoque_db::DbError;
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// With `--json`, this is what a failed command prints:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 7"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id does not exist
    NotFound,

    /// Form input rejected before reaching storage
    ValidationError,

    /// Database could not be reached
    ConnectionError,

    /// Statement failed in the database
    DatabaseError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit code for this error class.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::ConnectionError => 4,
            ErrorCode::DatabaseError => 5,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(
                    ErrorCode::ConnectionError,
                    format!("Could not connect to the database: {}", e),
                )
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::internal(format!("Internal database error: {}", e))
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(
                    ErrorCode::DatabaseError,
                    format!("Database operation failed: {}", other),
                )
            }
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

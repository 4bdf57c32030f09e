//! # Error Types
//!
//! Domain-specific error types for estoque-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CoreError                                                             │
//! │     └── Validation(ValidationError)                                     │
//! │            ├── Required          "name is required"                     │
//! │            ├── TooLong           "name must be at most 255 characters"  │
//! │            ├── OutOfRange        "quantity must be between 0 and ..."   │
//! │            ├── InvalidFormat     "price has invalid format: ..."        │
//! │            └── SelectionRequired "select a product to update"           │
//! │                                                                         │
//! │   Raised BEFORE the repository is called. Never reaches storage.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in the message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// They are caught by the command layer and shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Text could not be parsed (e.g., "abc" as a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An operation on an existing product was requested without
    /// selecting one first.
    ///
    /// ## When This Occurs
    /// - Update or delete with an empty id field
    /// - Id field still shows the placeholder text
    #[error("select a product to {action}")]
    SelectionRequired { action: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::invalid_format("price", "not a number").to_string(),
            "price has invalid format: not a number"
        );
        assert_eq!(
            ValidationError::SelectionRequired {
                action: "delete".to_string()
            }
            .to_string(),
            "select a product to delete"
        );
    }

    #[test]
    fn test_core_error_wraps_validation() {
        let err: CoreError = ValidationError::required("quantity").into();
        assert_eq!(err.to_string(), "Validation error: quantity is required");
    }
}

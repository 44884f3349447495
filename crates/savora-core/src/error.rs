//! # Error Types
//!
//! Validation error types for savora-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  savora-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  savora-db errors (separate crate)                                     │
//! │  └── DbError          - NotFound + storage failures                    │
//! │                         (wraps ValidationError so invalid input is     │
//! │                          rejected before any statement runs)           │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What HTTP clients see (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → ApiError → HTTP status              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when a recipe payload doesn't meet requirements.
/// Used for early validation before any storage call is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A required collection arrived with no elements.
    #[error("{field} must contain at least one entry")]
    EmptyCollection { field: String },

    /// A collection exceeds its size cap.
    #[error("{field} must contain at most {max} entries")]
    TooMany { field: String, max: usize },

    /// A serialized child payload (ingredients/steps) failed to decode.
    ///
    /// ## When This Occurs
    /// - A form field carried a JSON-encoded list that is not valid JSON
    /// - The JSON decoded to the wrong shape (e.g. object instead of array)
    #[error("{field} is not a valid list: {reason}")]
    MalformedList { field: String, reason: String },

    /// A numeric field arrived as text that does not parse.
    #[error("{field} must be an integer")]
    InvalidNumber { field: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an EmptyCollection error for the given field.
    pub fn empty(field: impl Into<String>) -> Self {
        ValidationError::EmptyCollection {
            field: field.into(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "description".to_string(),
            max: 2000,
        };
        assert_eq!(err.to_string(), "description must be at most 2000 characters");

        let err = ValidationError::empty("steps");
        assert_eq!(err.to_string(), "steps must contain at least one entry");
    }

    #[test]
    fn test_malformed_list_message() {
        let err = ValidationError::MalformedList {
            field: "ingredients".to_string(),
            reason: "expected array".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ingredients is not a valid list: expected array"
        );
    }
}

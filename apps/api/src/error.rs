//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Savora                                 │
//! │                                                                         │
//! │  Handler returns Result<T, ApiError>                                   │
//! │         │                                                               │
//! │         ├── DbError::NotFound ──────────► 404 NOT_FOUND                │
//! │         ├── DbError::Validation ────────► 400 VALIDATION_ERROR         │
//! │         ├── DbError::* (storage) ───────► 500 DATABASE_ERROR           │
//! │         │                                  (real cause logged,         │
//! │         │                                   generic message returned)  │
//! │         └── UploadError ────────────────► 500 UPLOAD_ERROR             │
//! │                                                                         │
//! │  Response body:                                                         │
//! │  { "code": "NOT_FOUND", "message": "Recipe not found: 42" }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use savora_core::ValidationError;
use savora_db::DbError;

use crate::upload::UploadError;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what clients receive when a request fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "description is required"
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

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Image transfer to the object store failed (500)
    UploadError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::UploadError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
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
    pub fn not_found(resource: &str, id: i64) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
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

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::Validation(e) => ApiError::validation(e.to_string()),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts validation errors straight from the input layer.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts upload errors, propagated unchanged from the collaborator.
impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        tracing::error!("Image upload failed: {}", err);
        ApiError::new(ErrorCode::UploadError, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::DatabaseError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_keeps_identity_storage_error_does_not() {
        let api: ApiError = DbError::not_found("Recipe", 42).into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Recipe not found: 42");

        // Storage detail never leaks to the client
        let api: ApiError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert_eq!(api.message, "Database operation failed");
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api: ApiError = DbError::Validation(ValidationError::required("name")).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.message, "name is required");
    }
}

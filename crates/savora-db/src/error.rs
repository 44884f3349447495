//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in API app) ← Serialized for HTTP clients                   │
//! │                                                                         │
//! │  NotFound and Validation are carried as distinct variants so the API   │
//! │  can answer 404/400; every other variant is a storage failure (500).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use savora_core::ValidationError;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and caller feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `get`/`update`/`delete` target a recipe id with no row
    /// - An UPDATE or DELETE affects zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    /// Input rejected before any statement was issued.
    ///
    /// Carried here so repository methods have a single error type while the
    /// caller can still tell bad input apart from storage trouble.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - A child row references a recipe_id that does not exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Statement execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction begin/commit failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// True for every variant that represents a storage-side failure,
    /// as opposed to bad input or a missing row.
    pub fn is_storage_failure(&self) -> bool {
        !matches!(self, DbError::NotFound { .. } | DbError::Validation(_))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports FK failures as:
                // "FOREIGN KEY constraint failed"
                if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Recipe", 42);
        assert_eq!(err.to_string(), "Recipe not found: 42");
    }

    #[test]
    fn test_validation_passthrough() {
        let err: DbError = ValidationError::required("name").into();
        assert_eq!(err.to_string(), "name is required");
        assert!(!err.is_storage_failure());
    }

    #[test]
    fn test_storage_failure_classification() {
        assert!(DbError::QueryFailed("boom".to_string()).is_storage_failure());
        assert!(DbError::PoolExhausted.is_storage_failure());
        assert!(!DbError::not_found("Recipe", 1).is_storage_failure());
    }
}

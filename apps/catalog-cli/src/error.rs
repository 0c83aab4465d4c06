//! # API Error Type
//!
//! Unified error type for catalog commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Catalog CLI                        │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, ApiError>                                                   │
//! │         │                                                               │
//! │         ├── ValidationError ──────────► VALIDATION_ERROR + message     │
//! │         │                                                               │
//! │         ├── DbError::QueryFailed ─────► DATABASE_ERROR (details logged)│
//! │         │                                                               │
//! │         ├── Option::None ─────────────► NOT_FOUND                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stderr: {"code": "NOT_FOUND", "message": "Product not found: 999"}    │
//! │  exit status 1                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::ValidationError;
use catalog_db::DbError;
use serde::Serialize;

/// Error returned from catalog commands.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "product_name must be at least 3 characters"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Internal error (serialization and the like)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// JSON form printed on stderr.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|_| format!("{{\"code\":\"INTERNAL\",\"message\":{:?}}}", self.message))
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::QueryFailed { context, source } => {
                // Log the actual error but return a generic message
                tracing::error!(context, error = %source, "Database query failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!(error = %e, "Database connection failed");
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!(error = %e, "Database migration failed");
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::debug!(field = err.field(), "Validation failed");
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to encode output: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

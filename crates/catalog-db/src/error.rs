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
//! │       ▼  .context("count products")                                    │
//! │  DbError::QueryFailed { context, source }                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← code + message, details logged                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No operation retries. Every failure is handed to the caller as soon as it
//! happens. A missing row is never an error: lookups return `Option` and
//! existence checks return `false`.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A statement could not be executed or a row could not be decoded.
    ///
    /// `context` names the step that failed, e.g. `"count products"`.
    #[error("{context}: {source}")]
    QueryFailed {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created or opened
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl DbError {
    /// Wraps a sqlx error with a short label naming the failed step.
    pub fn query(context: &'static str, source: sqlx::Error) -> Self {
        DbError::QueryFailed { context, source }
    }

    /// Label of the failed step, for query failures.
    pub fn context(&self) -> Option<&'static str> {
        match self {
            DbError::QueryFailed { context, .. } => Some(context),
            _ => None,
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Attaches a context label to sqlx results.
///
/// ```rust,ignore
/// let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
///     .fetch_one(&pool)
///     .await
///     .context("count products")?;
/// ```
pub trait QueryContext<T> {
    fn context(self, context: &'static str) -> DbResult<T>;
}

impl<T> QueryContext<T> for Result<T, sqlx::Error> {
    fn context(self, context: &'static str) -> DbResult<T> {
        self.map_err(|source| DbError::query(context, source))
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

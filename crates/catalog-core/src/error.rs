//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - QueryFailed { context, source }                │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → ApiError → stdout/stderr            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Query building and report rendering cannot fail, so there is no error type
//! for them.

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Raised before anything is written to the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing, empty or zero.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Foreign key points at a row that does not exist.
    ///
    /// ## When This Occurs
    /// - `supplier_id` not present in `suppliers`
    /// - `category_id` not present in `categories`
    #[error("{field} does not exist: {id}")]
    UnknownReference { field: String, id: i64 },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn unknown_reference(field: impl Into<String>, id: i64) -> Self {
        ValidationError::UnknownReference {
            field: field.into(),
            id,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::UnknownReference { field, .. } => field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # catalog-core: Pure Logic for the Northwind Catalog
//!
//! This crate holds the parts of the catalog that involve real decisions:
//! how list parameters become SQL, how pages are counted, and how the sales
//! report is laid out. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Northwind Catalog Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 catalog-cli (clap front end)                    │   │
//! │  │   products list/show/create, categories, suppliers, report     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   query   │  │ pagination │  │  report   │  │ validation│  │   │
//! │  │   │ Predicate │  │ clamp      │  │ widths    │  │ name/price│  │   │
//! │  │   │ SortSpec  │  │ offset     │  │ currency  │  │ ids       │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                catalog-db (SQLite repositories)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Read models and requests (ProductListItem, ProductDetail, ...)
//! - [`query`] - Predicate list, sort spec, statement rendering
//! - [`pagination`] - Limit clamping, offsets, page counts
//! - [`report`] - Sales report table and currency formatting
//! - [`error`] - Validation error type
//! - [`validation`] - Creation input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::query::{BindValue, ListParams, ProductQuery};
//!
//! let params = ListParams {
//!     category_id: Some(1),
//!     keyword: Some("chai".to_string()),
//!     page: 2,
//!     limit: 20,
//!     ..ListParams::default()
//! };
//!
//! let query = ProductQuery::new(&params);
//! let count = query.count_statement();
//! assert_eq!(count.binds.len(), 2);
//!
//! let page = query.page_statement();
//! assert_eq!(page.binds.last(), Some(&BindValue::Integer(20)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pagination;
pub mod query;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use pagination::PaginationMeta;
pub use query::{ListParams, ProductColumns, ProductQuery, Statement};
pub use types::*;

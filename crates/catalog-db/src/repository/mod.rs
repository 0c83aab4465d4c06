//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Statement Flow                                       │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │  db.products().list_page(&params)                              │
//! │       ▼                                                                 │
//! │  catalog-core: ProductQuery ──► Statement { sql, binds }               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository: bind_all(binds) ──► SqliteArguments                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  SQL text is decided in catalog-core; repositories only bind values,    │
//! │  execute, and decode rows.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product listing, detail, creation, lookups
//! - [`SalesReportRepository`](report::SalesReportRepository) - Top customers by sales

pub mod product;
pub mod report;

use catalog_core::query::BindValue;
use sqlx::sqlite::SqliteArguments;
use sqlx::Arguments;

use crate::error::{DbResult, QueryContext};

/// Converts ordered bind values into SQLite arguments.
pub(crate) fn bind_all<'q>(binds: &[BindValue]) -> DbResult<SqliteArguments<'q>> {
    let mut args = SqliteArguments::default();

    for value in binds {
        match value {
            BindValue::Integer(v) => args.add(*v),
            BindValue::Real(v) => args.add(*v),
            BindValue::Text(v) => args.add(v.clone()),
        }
        .map_err(sqlx::Error::Encode)
        .context("bind arguments")?;
    }

    Ok(args)
}

//! # Pagination Arithmetic
//!
//! Limit clamping, offset computation and page counting shared by the query
//! builder and the list response.
//!
//! ```text
//!   limit  = clamp(L, 1, 100)
//!   offset = max((page - 1) × limit, 0)
//!   pages  = 0                      when total = 0
//!          = ceil(total / limit)    otherwise
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Page used when the caller supplies none.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller supplies none.
pub const DEFAULT_LIMIT: i64 = 10;

/// Smallest accepted page size.
pub const MIN_LIMIT: i64 = 1;

/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;

/// Forces a caller-supplied page size into `[MIN_LIMIT, MAX_LIMIT]`.
///
/// Out-of-range values are clamped, never rejected.
#[inline]
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Row offset of a page, never negative.
///
/// Uses saturating math so absurd page numbers cannot overflow.
#[inline]
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit).max(0)
}

/// Number of pages needed for `total` rows.
#[inline]
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let limit = clamp_limit(limit);
    (total + limit - 1) / limit
}

/// Pagination block echoed back with a product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    /// Builds the metadata; `limit` is clamped the same way the query is.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = clamp_limit(limit);
        PaginationMeta {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

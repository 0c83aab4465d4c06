//! # Domain Types
//!
//! Read models and requests used throughout the catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductListItem │   │  ProductDetail  │   │  CustomerSale   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  list fields +  │   │  company_name   │       │
//! │  │  product_name   │   │  units_on_order │   │  country        │       │
//! │  │  unit_price     │   │  total_sold     │   │  total_purchases│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   NewProduct    │──►│  ProductRecord  │  Stored | Provisional       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Null Handling
//! Every nullable joined column is coalesced in SQL before it reaches these
//! types. None of the read models carry an `Option` for a scalar column.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pagination::PaginationMeta;

// =============================================================================
// Products
// =============================================================================

/// One row of the product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductListItem {
    pub product_id: i64,
    pub product_name: String,
    pub supplier_id: i64,
    pub category_id: i64,
    pub unit_price: f64,
    pub units_in_stock: i64,
    pub discontinued: bool,
    /// Resolved `categories.CategoryName`, empty when the join misses.
    pub category_name: String,
    /// Resolved `suppliers.CompanyName`, empty when the join misses.
    pub supplier_name: String,
}

/// Full product record returned by a detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductDetail {
    pub product_id: i64,
    pub product_name: String,
    pub supplier_id: i64,
    pub category_id: i64,
    pub quantity_per_unit: String,
    pub unit_price: f64,
    pub units_in_stock: i64,
    pub units_on_order: i64,
    pub reorder_level: i64,
    pub discontinued: bool,
    pub category_name: String,
    pub supplier_name: String,
    /// Sum of `order_details.Quantity` for this product, 0 when never sold.
    pub total_sold: i64,
}

/// Input for the single-row product insert.
///
/// Field checks (name length, positive ids, positive price) belong to the
/// caller; see [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub product_name: String,
    pub supplier_id: i64,
    pub category_id: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub units_in_stock: Option<i64>,
    #[serde(default)]
    pub discontinued: Option<bool>,
}

impl NewProduct {
    /// Initial stock written by the insert (defaults to 0).
    pub fn initial_stock(&self) -> i64 {
        self.units_in_stock.unwrap_or(0)
    }

    /// Discontinued flag written by the insert (defaults to false).
    pub fn is_discontinued(&self) -> bool {
        self.discontinued.unwrap_or(false)
    }

    /// Builds a best-effort detail from the request alone.
    ///
    /// Derived and joined fields (names, stock counters, total sold) are
    /// zeroed, matching what a client would see before the row is readable.
    pub fn provisional_detail(&self, product_id: i64) -> ProductDetail {
        ProductDetail {
            product_id,
            product_name: self.product_name.clone(),
            supplier_id: self.supplier_id,
            category_id: self.category_id,
            quantity_per_unit: String::new(),
            unit_price: self.unit_price,
            units_in_stock: 0,
            units_on_order: 0,
            reorder_level: 0,
            discontinued: false,
            category_name: String::new(),
            supplier_name: String::new(),
            total_sold: 0,
        }
    }
}

/// Result of a product creation.
///
/// `Provisional` is returned when the freshly inserted row could not be read
/// back; the caller still gets the assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "product", rename_all = "snake_case")]
#[ts(export)]
pub enum ProductRecord {
    Stored(ProductDetail),
    Provisional(ProductDetail),
}

impl ProductRecord {
    /// Chooses the record variant from the outcome of the post-insert read.
    pub fn from_refetch(
        product_id: i64,
        request: &NewProduct,
        fetched: Option<ProductDetail>,
    ) -> Self {
        match fetched {
            Some(detail) => ProductRecord::Stored(detail),
            None => ProductRecord::Provisional(request.provisional_detail(product_id)),
        }
    }

    pub fn detail(&self) -> &ProductDetail {
        match self {
            ProductRecord::Stored(detail) | ProductRecord::Provisional(detail) => detail,
        }
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, ProductRecord::Provisional(_))
    }
}

// =============================================================================
// Lookups
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CategoryItem {
    pub category_id: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SupplierItem {
    pub supplier_id: i64,
    pub company_name: String,
}

// =============================================================================
// Sales Report
// =============================================================================

/// Aggregated purchases of one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CustomerSale {
    pub company_name: String,
    pub country: String,
    /// Sum of `Quantity × UnitPrice` over every order line of the customer.
    pub total_purchases: f64,
}

// =============================================================================
// List Response
// =============================================================================

/// Metadata echoed with a product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
    pub keyword: String,
    pub sort: String,
}

/// A page of products together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPage {
    pub items: Vec<ProductListItem>,
    pub meta: ListMeta,
}

// =============================================================================
// Unit Tests
// =============================================================================

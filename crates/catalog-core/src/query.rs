//! # Product Query Builder
//!
//! Turns optional list parameters into a parameterized count statement and a
//! page statement. Nothing here touches a database: the output is SQL text
//! with `?` placeholders plus the ordered values to bind.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Product Query Pipeline                            │
//! │                                                                         │
//! │  ListParams { category_id, min_price, keyword, page, limit, sort }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  predicates()  ──► [ {p.CategoryID  =  ?  Integer(1)}                  │
//! │                      {p.UnitPrice   >= ?  Real(10.0)}                  │
//! │                      {p.ProductName LIKE ? Text("%cha%")} ]            │
//! │       │                                                                 │
//! │       ├──────────────────────────┬──────────────────────────┐          │
//! │       ▼                          ▼                          │          │
//! │  count_statement()          page_statement()                │          │
//! │  SELECT COUNT(*) ...        SELECT ... ORDER BY <sort>      │          │
//! │  WHERE <same predicates>    WHERE <same predicates>         │          │
//! │                             LIMIT ? OFFSET ?                │          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Only one sort key is applied. Rows that tie on it come back in whatever
//! order SQLite produces; no secondary key is added.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pagination::{clamp_limit, page_offset, DEFAULT_LIMIT, DEFAULT_PAGE};

/// Joins shared by the count and the page statement.
const PRODUCT_FROM: &str = "FROM products p \
     LEFT JOIN categories c ON p.CategoryID = c.CategoryID \
     LEFT JOIN suppliers s ON p.SupplierID = s.SupplierID";

/// Correlated total of units sold for the current product row.
const TOTAL_SOLD_SQL: &str =
    "COALESCE((SELECT SUM(od.Quantity) FROM order_details od WHERE od.ProductID = p.ProductID), 0)";

// =============================================================================
// Parameters
// =============================================================================

/// Filter, sort and pagination input for a product listing.
///
/// `keyword` is the single canonical search field; aliases are folded into it
/// before this struct is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListParams {
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub keyword: Option<String>,
    pub page: i64,
    pub limit: i64,
    /// `column[:direction]`, e.g. `unit_price:desc`.
    pub sort: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            category_id: None,
            supplier_id: None,
            min_price: None,
            max_price: None,
            keyword: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: None,
        }
    }
}

impl ListParams {
    /// Keyword filter, `None` when absent or empty.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }

    /// Raw sort token as supplied, empty when absent.
    pub fn sort_token(&self) -> &str {
        self.sort.as_deref().unwrap_or("")
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// Product columns the builder may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ProductId,
    ProductName,
    SupplierId,
    CategoryId,
    UnitPrice,
    UnitsInStock,
}

impl Column {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Column::ProductId => "p.ProductID",
            Column::ProductName => "p.ProductName",
            Column::SupplierId => "p.SupplierID",
            Column::CategoryId => "p.CategoryID",
            Column::UnitPrice => "p.UnitPrice",
            Column::UnitsInStock => "p.UnitsInStock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gte,
    Lte,
    Like,
}

impl Operator {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
        }
    }
}

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One `{column, operator, value}` condition of the WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Column,
    pub operator: Operator,
    pub value: BindValue,
}

impl Predicate {
    pub fn new(column: Column, operator: Operator, value: BindValue) -> Self {
        Predicate {
            column,
            operator,
            value,
        }
    }

    /// SQL fragment with a placeholder in place of the value.
    pub fn to_sql(&self) -> String {
        format!("{} {} ?", self.column.as_sql(), self.operator.as_sql())
    }
}

/// Builds the conjunctive predicate list for the supplied filters.
///
/// Order is fixed (category, supplier, min price, max price, keyword) so the
/// bind positions are deterministic.
pub fn predicates(params: &ListParams) -> Vec<Predicate> {
    let mut preds = Vec::with_capacity(5);

    if let Some(id) = params.category_id {
        preds.push(Predicate::new(
            Column::CategoryId,
            Operator::Eq,
            BindValue::Integer(id),
        ));
    }
    if let Some(id) = params.supplier_id {
        preds.push(Predicate::new(
            Column::SupplierId,
            Operator::Eq,
            BindValue::Integer(id),
        ));
    }
    if let Some(min) = params.min_price {
        preds.push(Predicate::new(
            Column::UnitPrice,
            Operator::Gte,
            BindValue::Real(min),
        ));
    }
    if let Some(max) = params.max_price {
        preds.push(Predicate::new(
            Column::UnitPrice,
            Operator::Lte,
            BindValue::Real(max),
        ));
    }
    if let Some(keyword) = params.keyword() {
        preds.push(Predicate::new(
            Column::ProductName,
            Operator::Like,
            BindValue::Text(format!("%{keyword}%")),
        ));
    }

    preds
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A single ORDER BY key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            column: Column::ProductId,
            direction: SortDirection::Asc,
        }
    }
}

impl SortSpec {
    /// Parses a `column[:direction]` token.
    ///
    /// Allowed columns: `product_name`, `unit_price`, `units_in_stock`.
    /// Anything else falls back to product id ascending, whatever direction
    /// was asked for.
    ///
    /// ```rust
    /// use catalog_core::query::{Column, SortDirection, SortSpec};
    ///
    /// let spec = SortSpec::parse("unit_price:DESC");
    /// assert_eq!(spec.column, Column::UnitPrice);
    /// assert_eq!(spec.direction, SortDirection::Desc);
    ///
    /// assert_eq!(SortSpec::parse("supplier_id:desc"), SortSpec::default());
    /// ```
    pub fn parse(token: &str) -> Self {
        let mut parts = token.splitn(2, ':');
        let column = parts.next().unwrap_or("").trim();
        let direction = match parts.next() {
            Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        let column = match column {
            "product_name" => Column::ProductName,
            "unit_price" => Column::UnitPrice,
            "units_in_stock" => Column::UnitsInStock,
            _ => return SortSpec::default(),
        };

        SortSpec { column, direction }
    }

    pub fn to_sql(&self) -> String {
        format!("{} {}", self.column.as_sql(), self.direction.as_sql())
    }
}

// =============================================================================
// Column Sets
// =============================================================================

/// Which optional product columns the target schema provides.
///
/// `Basic` targets a `products` table without `QuantityPerUnit`,
/// `UnitsOnOrder`, `ReorderLevel` and `Discontinued`; those fields are
/// selected as literal defaults instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumns {
    Extended,
    Basic,
}

impl ProductColumns {
    fn discontinued_sql(self) -> &'static str {
        match self {
            ProductColumns::Extended => "COALESCE(p.Discontinued, 0)",
            ProductColumns::Basic => "0",
        }
    }

    fn list_select(self) -> String {
        format!(
            "SELECT p.ProductID AS product_id, \
             COALESCE(p.ProductName, '') AS product_name, \
             COALESCE(p.SupplierID, 0) AS supplier_id, \
             COALESCE(p.CategoryID, 0) AS category_id, \
             CAST(COALESCE(p.UnitPrice, 0) AS REAL) AS unit_price, \
             COALESCE(p.UnitsInStock, 0) AS units_in_stock, \
             {} AS discontinued, \
             COALESCE(c.CategoryName, '') AS category_name, \
             COALESCE(s.CompanyName, '') AS supplier_name",
            self.discontinued_sql()
        )
    }

    fn detail_select(self) -> String {
        let (quantity_per_unit, units_on_order, reorder_level) = match self {
            ProductColumns::Extended => (
                "COALESCE(p.QuantityPerUnit, '')",
                "COALESCE(p.UnitsOnOrder, 0)",
                "COALESCE(p.ReorderLevel, 0)",
            ),
            ProductColumns::Basic => ("''", "0", "0"),
        };

        format!(
            "SELECT p.ProductID AS product_id, \
             COALESCE(p.ProductName, '') AS product_name, \
             COALESCE(p.SupplierID, 0) AS supplier_id, \
             COALESCE(p.CategoryID, 0) AS category_id, \
             {quantity_per_unit} AS quantity_per_unit, \
             CAST(COALESCE(p.UnitPrice, 0) AS REAL) AS unit_price, \
             COALESCE(p.UnitsInStock, 0) AS units_in_stock, \
             {units_on_order} AS units_on_order, \
             {reorder_level} AS reorder_level, \
             {discontinued} AS discontinued, \
             COALESCE(c.CategoryName, '') AS category_name, \
             COALESCE(s.CompanyName, '') AS supplier_name, \
             {TOTAL_SOLD_SQL} AS total_sold",
            discontinued = self.discontinued_sql(),
        )
    }
}

// =============================================================================
// Statements
// =============================================================================

/// SQL text plus the values for its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

/// Fully resolved product listing: predicates, sort and page window.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    predicates: Vec<Predicate>,
    sort: SortSpec,
    limit: i64,
    offset: i64,
    columns: ProductColumns,
}

impl ProductQuery {
    /// Resolves list parameters. The limit is clamped before the offset is
    /// computed from it.
    pub fn new(params: &ListParams) -> Self {
        let limit = clamp_limit(params.limit);
        ProductQuery {
            predicates: predicates(params),
            sort: SortSpec::parse(params.sort_token()),
            limit,
            offset: page_offset(params.page, limit),
            columns: ProductColumns::Extended,
        }
    }

    pub fn with_columns(mut self, columns: ProductColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// `WHERE a AND b ...`, or an empty string when no filter is set.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self.predicates.iter().map(Predicate::to_sql).collect();
        format!(" WHERE {}", conditions.join(" AND "))
    }

    fn filter_binds(&self) -> Vec<BindValue> {
        self.predicates.iter().map(|p| p.value.clone()).collect()
    }

    /// Total rows matching the filters, ignoring the page window.
    pub fn count_statement(&self) -> Statement {
        Statement {
            sql: format!("SELECT COUNT(*) {PRODUCT_FROM}{}", self.where_clause()),
            binds: self.filter_binds(),
        }
    }

    /// One page of rows; binds are the filter values followed by limit and offset.
    pub fn page_statement(&self) -> Statement {
        let mut binds = self.filter_binds();
        binds.push(BindValue::Integer(self.limit));
        binds.push(BindValue::Integer(self.offset));

        Statement {
            sql: format!(
                "{} {PRODUCT_FROM}{} ORDER BY {} LIMIT ? OFFSET ?",
                self.columns.list_select(),
                self.where_clause(),
                self.sort.to_sql()
            ),
            binds,
        }
    }
}

/// Single-product lookup including the correlated units-sold total.
pub fn detail_statement(product_id: i64, columns: ProductColumns) -> Statement {
    Statement {
        sql: format!(
            "{} {PRODUCT_FROM} WHERE p.ProductID = ?",
            columns.detail_select()
        ),
        binds: vec![BindValue::Integer(product_id)],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

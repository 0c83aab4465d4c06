//! # Sales Report Repository
//!
//! Aggregates order lines into per-customer purchase totals.
//!
//! Every customer is a candidate, including those who never ordered (total
//! 0). Totals are `Quantity × UnitPrice` summed over all order lines;
//! discounts are not applied. Rows come back in non-increasing total order,
//! at most [`TOP_CUSTOMER_LIMIT`] of them. The order among equal totals is
//! whatever SQLite returns.

use catalog_core::report::{format_top_customers_by_sales, TOP_CUSTOMER_LIMIT};
use catalog_core::CustomerSale;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbResult, QueryContext};

const TOP_CUSTOMERS_SQL: &str = "SELECT COALESCE(c.CompanyName, '') AS company_name, \
     COALESCE(c.Country, '') AS country, \
     CAST(COALESCE(SUM(od.Quantity * od.UnitPrice), 0) AS REAL) AS total_purchases \
     FROM customers c \
     LEFT JOIN orders o ON c.CustomerID = o.CustomerID \
     LEFT JOIN order_details od ON o.OrderID = od.OrderID \
     GROUP BY c.CustomerID, c.CompanyName, c.Country \
     ORDER BY total_purchases DESC \
     LIMIT ?";

/// Repository for the sales report.
#[derive(Debug, Clone)]
pub struct SalesReportRepository {
    pool: SqlitePool,
}

impl SalesReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SalesReportRepository { pool }
    }

    /// Top customers by total purchase value.
    pub async fn top_customers_by_sales(&self) -> DbResult<Vec<CustomerSale>> {
        let rows = sqlx::query_as::<_, CustomerSale>(TOP_CUSTOMERS_SQL)
            .bind(TOP_CUSTOMER_LIMIT)
            .fetch_all(&self.pool)
            .await
            .context("top customers by sales")?;

        debug!(rows = rows.len(), "Loaded top customers");
        Ok(rows)
    }

    /// Top customers rendered as the report table.
    pub async fn render_top_customers(&self) -> DbResult<String> {
        let rows = self.top_customers_by_sales().await?;
        Ok(format_top_customers_by_sales(&rows))
    }
}

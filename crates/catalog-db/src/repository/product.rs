//! # Product Repository
//!
//! Database operations for products and their reference data.
//!
//! ## Key Operations
//! - Filtered, sorted, paginated listing
//! - Detail lookup with units sold
//! - Single-row creation
//! - Supplier / category existence checks and listings
//!
//! ## Listing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Product Page Is Read                           │
//! │                                                                         │
//! │  ListParams { category_id: 2, keyword: "Chef", page: 1, limit: 10 }   │
//! │       │                                                                 │
//! │       ▼  ProductQuery::new                                             │
//! │  WHERE p.CategoryID = ? AND p.ProductName LIKE ?                       │
//! │       │                                                                 │
//! │       ├──► SELECT COUNT(*) ...           → total = 2                   │
//! │       │                                                                 │
//! │       └──► SELECT ... ORDER BY ... LIMIT ? OFFSET ?                    │
//! │                                          → [Cajun Seasoning, Gumbo Mix]│
//! │                                                                         │
//! │  Both statements share one predicate list, so the total always counts   │
//! │  exactly the rows the page was cut from.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::query::detail_statement;
use catalog_core::{
    CategoryItem, ListMeta, ListParams, NewProduct, PaginationMeta, ProductColumns,
    ProductDetail, ProductListItem, ProductPage, ProductQuery, SupplierItem,
};
use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, warn};

use super::bind_all;
use crate::error::{DbResult, QueryContext};
use crate::schema::SchemaProfile;

const INSERT_PRODUCT_SQL: &str = "INSERT INTO products \
     (ProductName, SupplierID, CategoryID, UnitPrice, UnitsInStock, Discontinued) \
     VALUES (?, ?, ?, ?, ?, ?)";

const INSERT_PRODUCT_BASIC_SQL: &str = "INSERT INTO products \
     (ProductName, SupplierID, CategoryID, UnitPrice, UnitsInStock) \
     VALUES (?, ?, ?, ?, ?)";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let (items, total) = repo.list(&ListParams::default()).await?;
/// let detail = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    schema: SchemaProfile,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool, schema: SchemaProfile) -> Self {
        ProductRepository { pool, schema }
    }

    /// Lists one page of products and the total number of matching rows.
    ///
    /// ## Behavior
    /// - Filters combine with AND; an empty keyword is no filter
    /// - Unknown sort tokens fall back to `ProductID ASC`
    /// - `limit` is clamped to 1..=100 before the offset is computed
    /// - A page past the end yields no items with the true total
    pub async fn list(&self, params: &ListParams) -> DbResult<(Vec<ProductListItem>, i64)> {
        let query = ProductQuery::new(params).with_columns(self.schema.list_columns());

        debug!(
            filters = query.predicates().len(),
            sort = %query.sort().to_sql(),
            limit = query.limit(),
            offset = query.offset(),
            "Listing products"
        );

        let count = query.count_statement();
        let total: i64 = sqlx::query_scalar_with::<Sqlite, i64, _>(
            &count.sql,
            bind_all(&count.binds)?,
        )
        .fetch_one(&self.pool)
        .await
        .context("count products")?;

        let page = query.page_statement();
        let items = sqlx::query_as_with::<Sqlite, ProductListItem, _>(
            &page.sql,
            bind_all(&page.binds)?,
        )
        .fetch_all(&self.pool)
        .await
        .context("list products")?;

        debug!(total, returned = items.len(), "Listed products");

        Ok((items, total))
    }

    /// Lists a page and wraps it with pagination metadata.
    ///
    /// The metadata echoes the keyword and raw sort token, and reports the
    /// clamped limit.
    pub async fn list_page(&self, params: &ListParams) -> DbResult<ProductPage> {
        let (items, total) = self.list(params).await?;

        Ok(ProductPage {
            items,
            meta: ListMeta {
                pagination: PaginationMeta::new(params.page, params.limit, total),
                keyword: params.keyword().unwrap_or_default().to_string(),
                sort: params.sort_token().to_string(),
            },
        })
    }

    /// Gets a product's full record, or `None` if no row has that id.
    ///
    /// ## Schema Fallback
    /// With [`SchemaProfile::Auto`], a failed extended lookup is retried once
    /// with the basic column set. A not-found result is final and never
    /// retried. When both attempts fail, the extended attempt's error is
    /// returned and the basic one is logged.
    pub async fn get_by_id(&self, product_id: i64) -> DbResult<Option<ProductDetail>> {
        debug!(product_id, schema = %self.schema, "Getting product");

        match self.schema {
            SchemaProfile::Extended => self.fetch_detail(product_id, ProductColumns::Extended).await,
            SchemaProfile::Basic => self.fetch_detail(product_id, ProductColumns::Basic).await,
            SchemaProfile::Auto => {
                let extended_err = match self
                    .fetch_detail(product_id, ProductColumns::Extended)
                    .await
                {
                    Ok(found) => return Ok(found),
                    Err(err) => err,
                };

                warn!(
                    product_id,
                    error = %extended_err,
                    "Extended product columns unavailable, retrying with basic columns"
                );

                self.fetch_detail(product_id, ProductColumns::Basic)
                    .await
                    .map_err(|basic_err| {
                        warn!(product_id, error = %basic_err, "Basic product columns failed too");
                        extended_err
                    })
            }
        }
    }

    async fn fetch_detail(
        &self,
        product_id: i64,
        columns: ProductColumns,
    ) -> DbResult<Option<ProductDetail>> {
        let statement = detail_statement(product_id, columns);
        let context = match columns {
            ProductColumns::Extended => "get product",
            ProductColumns::Basic => "get product (basic columns)",
        };

        sqlx::query_as_with::<Sqlite, ProductDetail, _>(
            &statement.sql,
            bind_all(&statement.binds)?,
        )
        .fetch_optional(&self.pool)
        .await
        .context(context)
    }

    /// Inserts one product and returns its generated id.
    ///
    /// Performs no validation; callers check fields and references first.
    /// Omitted stock defaults to 0 and omitted discontinued to false.
    pub async fn create(&self, product: &NewProduct) -> DbResult<i64> {
        debug!(
            product_name = %product.product_name,
            supplier_id = product.supplier_id,
            category_id = product.category_id,
            "Inserting product"
        );

        let insert = if self.schema.has_discontinued() {
            sqlx::query(INSERT_PRODUCT_SQL)
                .bind(&product.product_name)
                .bind(product.supplier_id)
                .bind(product.category_id)
                .bind(product.unit_price)
                .bind(product.initial_stock())
                .bind(product.is_discontinued())
        } else {
            sqlx::query(INSERT_PRODUCT_BASIC_SQL)
                .bind(&product.product_name)
                .bind(product.supplier_id)
                .bind(product.category_id)
                .bind(product.unit_price)
                .bind(product.initial_stock())
        };

        let result = insert
            .execute(&self.pool)
            .await
            .context("insert product")?;

        let product_id = result.last_insert_rowid();
        debug!(product_id, "Inserted product");

        Ok(product_id)
    }

    /// Whether a supplier row with this id exists.
    pub async fn exists_supplier(&self, supplier_id: i64) -> DbResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM suppliers WHERE SupplierID = ? LIMIT 1")
                .bind(supplier_id)
                .fetch_optional(&self.pool)
                .await
                .context("check supplier")?;

        Ok(found.is_some())
    }

    /// Whether a category row with this id exists.
    pub async fn exists_category(&self, category_id: i64) -> DbResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM categories WHERE CategoryID = ? LIMIT 1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await
                .context("check category")?;

        Ok(found.is_some())
    }

    /// All categories, ordered by name.
    pub async fn list_categories(&self) -> DbResult<Vec<CategoryItem>> {
        sqlx::query_as::<_, CategoryItem>(
            "SELECT CategoryID AS category_id, COALESCE(CategoryName, '') AS category_name \
             FROM categories ORDER BY CategoryName",
        )
        .fetch_all(&self.pool)
        .await
        .context("list categories")
    }

    /// All suppliers, ordered by company name.
    pub async fn list_suppliers(&self) -> DbResult<Vec<SupplierItem>> {
        sqlx::query_as::<_, SupplierItem>(
            "SELECT SupplierID AS supplier_id, COALESCE(CompanyName, '') AS company_name \
             FROM suppliers ORDER BY CompanyName",
        )
        .fetch_all(&self.pool)
        .await
        .context("list suppliers")
    }

    /// Counts all products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .context("count all products")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::seed::sample_database;

    fn params() -> ListParams {
        ListParams::default()
    }

    fn ids(items: &[ProductListItem]) -> Vec<i64> {
        items.iter().map(|p| p.product_id).collect()
    }

    // ---- list ----

    #[tokio::test]
    async fn test_list_defaults_to_id_order() {
        let db = sample_database().await;
        let (items, total) = db.products().list(&params()).await.unwrap();

        assert_eq!(total, 9);
        assert_eq!(ids(&items), vec![1, 2, 3, 4, 5, 6, 16, 18, 24]);

        let chai = &items[0];
        assert_eq!(chai.product_name, "Chai");
        assert_eq!(chai.category_name, "Beverages");
        assert_eq!(chai.supplier_name, "Exotic Liquids");
        assert!((chai.unit_price - 18.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_list_missing_joins_and_nulls_default() {
        let db = sample_database().await;
        let (items, _) = db.products().list(&params()).await.unwrap();

        let guarana = items.iter().find(|p| p.product_id == 24).unwrap();
        assert_eq!(guarana.supplier_id, 0);
        assert_eq!(guarana.supplier_name, "");
        assert_eq!(guarana.units_in_stock, 0);
        assert!(guarana.discontinued);
    }

    #[tokio::test]
    async fn test_list_filters_are_conjunctive() {
        let db = sample_database().await;
        let repo = db.products();

        let by_category = ListParams {
            category_id: Some(2),
            ..params()
        };
        let (items, total) = repo.list(&by_category).await.unwrap();
        assert_eq!(total, 4);
        assert_eq!(ids(&items), vec![3, 4, 5, 6]);

        let narrowed = ListParams {
            category_id: Some(2),
            min_price: Some(20.0),
            keyword: Some("Chef".to_string()),
            ..params()
        };
        let (items, total) = repo.list(&narrowed).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(ids(&items), vec![4, 5]);
    }

    #[tokio::test]
    async fn test_list_price_bounds_are_inclusive() {
        let db = sample_database().await;
        let filter = ListParams {
            min_price: Some(18.0),
            max_price: Some(21.35),
            ..params()
        };

        let (items, total) = db.products().list(&filter).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(ids(&items), vec![1, 2, 5]);
    }

    #[tokio::test]
    async fn test_list_supplier_filter_and_unknown_supplier() {
        let db = sample_database().await;
        let repo = db.products();

        let (items, total) = repo
            .list(&ListParams {
                supplier_id: Some(7),
                ..params()
            })
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(ids(&items), vec![16, 18]);

        let (items, total) = repo
            .list(&ListParams {
                supplier_id: Some(99),
                ..params()
            })
            .await
            .unwrap();
        assert_eq!(total, 0);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_sort_by_price_desc() {
        let db = sample_database().await;
        let sorted = ListParams {
            sort: Some("unit_price:desc".to_string()),
            ..params()
        };

        let (items, _) = db.products().list(&sorted).await.unwrap();
        assert_eq!(items[0].product_id, 18);
        assert_eq!(items[1].product_id, 6);
        assert!(items
            .windows(2)
            .all(|pair| pair[0].unit_price >= pair[1].unit_price));
    }

    #[tokio::test]
    async fn test_list_unknown_sort_falls_back_to_id() {
        let db = sample_database().await;
        let sorted = ListParams {
            sort: Some("ProductID; DROP TABLE products".to_string()),
            ..params()
        };

        let (items, total) = db.products().list(&sorted).await.unwrap();
        assert_eq!(total, 9);
        assert_eq!(items[0].product_id, 1);
        assert_eq!(db.products().count().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_list_pages() {
        let db = sample_database().await;
        let repo = db.products();

        let last = ListParams {
            page: 3,
            limit: 4,
            ..params()
        };
        let (items, total) = repo.list(&last).await.unwrap();
        assert_eq!(total, 9);
        assert_eq!(ids(&items), vec![24]);

        let beyond = ListParams {
            page: 5,
            limit: 4,
            ..params()
        };
        let (items, total) = repo.list(&beyond).await.unwrap();
        assert_eq!(total, 9);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_oversized_limit_is_clamped() {
        let db = sample_database().await;
        let huge = ListParams {
            limit: 1_000,
            ..params()
        };

        let page = db.products().list_page(&huge).await.unwrap();
        assert_eq!(page.items.len(), 9);
        assert_eq!(page.meta.pagination.limit, 100);
        assert_eq!(page.meta.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_page_meta_echoes_inputs() {
        let db = sample_database().await;
        let request = ListParams {
            keyword: Some("an".to_string()),
            sort: Some("product_name".to_string()),
            page: 1,
            limit: 2,
            ..params()
        };

        let page = db.products().list_page(&request).await.unwrap();
        assert_eq!(page.meta.keyword, "an");
        assert_eq!(page.meta.sort, "product_name");
        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.meta.pagination.total_pages,
            (page.meta.pagination.total + 1) / 2
        );
    }

    // ---- detail ----

    #[tokio::test]
    async fn test_get_by_id_includes_units_sold() {
        let db = sample_database().await;
        let chai = db.products().get_by_id(1).await.unwrap().unwrap();

        assert_eq!(chai.product_name, "Chai");
        assert_eq!(chai.quantity_per_unit, "10 boxes x 20 bags");
        assert_eq!(chai.reorder_level, 10);
        assert_eq!(chai.total_sold, 62);

        let pavlova = db.products().get_by_id(16).await.unwrap().unwrap();
        assert_eq!(pavlova.total_sold, 103);
        assert_eq!(pavlova.supplier_name, "Pavlova, Ltd.");
    }

    #[tokio::test]
    async fn test_get_by_id_unsold_product() {
        let db = sample_database().await;
        let gumbo = db.products().get_by_id(5).await.unwrap().unwrap();

        assert_eq!(gumbo.total_sold, 0);
        assert!(gumbo.discontinued);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = sample_database().await;
        assert!(db.products().get_by_id(999).await.unwrap().is_none());
    }

    // ---- create ----

    #[tokio::test]
    async fn test_create_then_read_back() {
        let db = sample_database().await;
        let repo = db.products();

        let new_product = NewProduct {
            product_name: "Ikura".to_string(),
            supplier_id: 7,
            category_id: 8,
            unit_price: 31.0,
            units_in_stock: None,
            discontinued: None,
        };

        let id = repo.create(&new_product).await.unwrap();
        assert_eq!(id, 25);

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.product_name, "Ikura");
        assert_eq!(stored.category_name, "Seafood");
        assert_eq!(stored.units_in_stock, 0);
        assert!(!stored.discontinued);
        assert_eq!(stored.total_sold, 0);
        assert_eq!(repo.count().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_create_writes_stock_and_flag() {
        let db = sample_database().await;
        let repo = db.products();

        let id = repo
            .create(&NewProduct {
                product_name: "Konbu".to_string(),
                supplier_id: 1,
                category_id: 8,
                unit_price: 6.0,
                units_in_stock: Some(24),
                discontinued: Some(true),
            })
            .await
            .unwrap();

        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.units_in_stock, 24);
        assert!(stored.discontinued);
    }

    // ---- reference lookups ----

    #[tokio::test]
    async fn test_existence_checks() {
        let db = sample_database().await;
        let repo = db.products();

        assert!(repo.exists_supplier(1).await.unwrap());
        assert!(!repo.exists_supplier(99).await.unwrap());
        assert!(repo.exists_category(8).await.unwrap());
        assert!(!repo.exists_category(5).await.unwrap());
    }

    #[tokio::test]
    async fn test_reference_listings_are_name_ordered() {
        let db = sample_database().await;
        let repo = db.products();

        let categories: Vec<String> = repo
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.category_name)
            .collect();
        assert_eq!(
            categories,
            vec!["Beverages", "Condiments", "Confections", "Dairy Products", "Seafood"]
        );

        let suppliers = repo.list_suppliers().await.unwrap();
        assert_eq!(suppliers.len(), 4);
        assert_eq!(suppliers[0].company_name, "Exotic Liquids");
        assert_eq!(suppliers[3].supplier_id, 7);
    }

    // ---- schema profiles ----

    const BASIC_SCHEMA_SQL: &str = r#"
        CREATE TABLE categories (CategoryID INTEGER PRIMARY KEY, CategoryName TEXT);
        CREATE TABLE suppliers (SupplierID INTEGER PRIMARY KEY, CompanyName TEXT);
        CREATE TABLE products (
            ProductID INTEGER PRIMARY KEY,
            ProductName TEXT,
            SupplierID INTEGER,
            CategoryID INTEGER,
            UnitPrice REAL,
            UnitsInStock INTEGER
        );
        CREATE TABLE order_details (OrderID INTEGER, ProductID INTEGER, UnitPrice REAL, Quantity INTEGER);

        INSERT INTO categories VALUES (1, 'Beverages');
        INSERT INTO suppliers VALUES (1, 'Exotic Liquids');
        INSERT INTO products VALUES (1, 'Chai', 1, 1, 18.0, 39);
        INSERT INTO order_details VALUES (10248, 1, 18.0, 12);
    "#;

    async fn basic_schema_database(profile: SchemaProfile) -> Database {
        let config = DbConfig::in_memory()
            .run_migrations(false)
            .schema_profile(profile);
        let db = Database::new(config).await.unwrap();
        sqlx::raw_sql(BASIC_SCHEMA_SQL)
            .execute(db.pool())
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_auto_profile_falls_back_to_basic_columns() {
        let db = basic_schema_database(SchemaProfile::Auto).await;
        let chai = db.products().get_by_id(1).await.unwrap().unwrap();

        assert_eq!(chai.product_name, "Chai");
        assert_eq!(chai.category_name, "Beverages");
        assert_eq!(chai.quantity_per_unit, "");
        assert_eq!(chai.units_on_order, 0);
        assert_eq!(chai.reorder_level, 0);
        assert!(!chai.discontinued);
        assert_eq!(chai.total_sold, 12);

        assert!(db.products().get_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_extended_profile_does_not_fall_back() {
        let db = basic_schema_database(SchemaProfile::Extended).await;
        let err = db.products().get_by_id(1).await.unwrap_err();

        assert_eq!(err.context(), Some("get product"));
    }

    #[tokio::test]
    async fn test_fallback_returns_first_error() {
        // Neither column set can be read without a products table.
        let config = DbConfig::in_memory().run_migrations(false);
        let db = Database::new(config).await.unwrap();

        let err = db.products().get_by_id(1).await.unwrap_err();
        assert_eq!(err.context(), Some("get product"));
    }

    // ---- failures ----

    #[tokio::test]
    async fn test_list_fails_when_page_query_fails() {
        // The count succeeds, the page select needs the missing Discontinued column.
        let db = basic_schema_database(SchemaProfile::Extended).await;

        let err = db.products().list(&params()).await.unwrap_err();
        assert_eq!(err.context(), Some("list products"));

        let err = db.products().list_page(&params()).await.unwrap_err();
        assert_eq!(err.context(), Some("list products"));
    }

    #[tokio::test]
    async fn test_list_fails_without_tables() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let err = db.products().list(&params()).await.unwrap_err();
        assert_eq!(err.context(), Some("count products"));
    }

    #[tokio::test]
    async fn test_existence_checks_fail_without_tables() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        let repo = db.products();

        let err = repo.exists_supplier(1).await.unwrap_err();
        assert_eq!(err.context(), Some("check supplier"));

        let err = repo.exists_category(1).await.unwrap_err();
        assert_eq!(err.context(), Some("check category"));
    }

    #[tokio::test]
    async fn test_basic_profile_lists_and_creates() {
        let db = basic_schema_database(SchemaProfile::Basic).await;
        let repo = db.products();

        let id = repo
            .create(&NewProduct {
                product_name: "Chang".to_string(),
                supplier_id: 1,
                category_id: 1,
                unit_price: 19.0,
                units_in_stock: Some(17),
                discontinued: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(id, 2);

        let (items, total) = repo.list(&params()).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[1].product_name, "Chang");
        assert_eq!(items[1].units_in_stock, 17);
        assert!(!items[1].discontinued);
    }
}

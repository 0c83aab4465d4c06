//! # Product Commands
//!
//! Listing, detail lookup and creation of products, plus the category and
//! supplier lookups used to pick references.
//!
//! ## Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    products create                                      │
//! │                                                                         │
//! │  1. product_name ≥ 3 chars ──────────┐                                 │
//! │  2. supplier_id > 0                  │  VALIDATION_ERROR on the first  │
//! │  3. category_id > 0                  │  failed check; nothing written  │
//! │  4. supplier exists  (SELECT 1)      │                                 │
//! │  5. category exists  (SELECT 1)      │                                 │
//! │  6. unit_price > 0 ──────────────────┘                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  7. INSERT ─────────────► DATABASE_ERROR on failure                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  8. read back by id                                                    │
//! │       ├── found ─────────► {"kind": "stored", "product": {...}}        │
//! │       └── missing/error ─► {"kind": "provisional", "product": {...}}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use catalog_core::validation::{
    validate_product_id, validate_product_name, validate_reference_id, validate_unit_price,
};
use catalog_core::{
    CategoryItem, ListParams, NewProduct, ProductDetail, ProductPage, ProductRecord,
    SupplierItem, ValidationError,
};
use catalog_db::Database;
use tracing::{debug, info, warn};

use crate::error::ApiError;

/// Lists one page of products.
pub async fn list_products(db: &Database, params: ListParams) -> Result<ProductPage, ApiError> {
    let start = Instant::now();
    debug!(?params, "list_products command");

    let page = db.products().list_page(&params).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = page.items.len(),
        total = page.meta.pagination.total,
        "list_products complete"
    );

    Ok(page)
}

/// Gets one product by id.
///
/// ## Returns
/// The product if found, or a `NOT_FOUND` error
pub async fn get_product(db: &Database, product_id: i64) -> Result<ProductDetail, ApiError> {
    debug!(product_id, "get_product command");
    validate_product_id(product_id)?;

    db.products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

/// Validates and inserts a product, then reads it back.
///
/// A failed read-back is not an error: the insert already happened, so the
/// caller gets a provisional record carrying the new id.
pub async fn create_product(
    db: &Database,
    mut request: NewProduct,
) -> Result<ProductRecord, ApiError> {
    debug!(product_name = %request.product_name, "create_product command");

    let products = db.products();

    validate_product_name(&request.product_name)?;
    validate_reference_id("supplier_id", request.supplier_id)?;
    validate_reference_id("category_id", request.category_id)?;

    if !products.exists_supplier(request.supplier_id).await? {
        return Err(ValidationError::unknown_reference("supplier_id", request.supplier_id).into());
    }
    if !products.exists_category(request.category_id).await? {
        return Err(ValidationError::unknown_reference("category_id", request.category_id).into());
    }

    validate_unit_price(request.unit_price)?;

    request.product_name = request.product_name.trim().to_string();
    let product_id = products.create(&request).await?;

    let fetched = match products.get_by_id(product_id).await {
        Ok(found) => found,
        Err(err) => {
            warn!(product_id, error = %err, "Read-back after insert failed");
            None
        }
    };

    let record = ProductRecord::from_refetch(product_id, &request, fetched);
    if record.is_provisional() {
        warn!(product_id, "Returning provisional product record");
    }

    info!(product_id, "Product created");
    Ok(record)
}

pub async fn list_categories(db: &Database) -> Result<Vec<CategoryItem>, ApiError> {
    Ok(db.products().list_categories().await?)
}

pub async fn list_suppliers(db: &Database) -> Result<Vec<SupplierItem>, ApiError> {
    Ok(db.products().list_suppliers().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use catalog_db::seed::load_sample_data;
    use catalog_db::{DbConfig, SchemaProfile};

    async fn sample_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        load_sample_data(&db).await.unwrap();
        db
    }

    fn request(name: &str, supplier_id: i64, category_id: i64, unit_price: f64) -> NewProduct {
        NewProduct {
            product_name: name.to_string(),
            supplier_id,
            category_id,
            unit_price,
            units_in_stock: None,
            discontinued: None,
        }
    }

    async fn assert_rejected(db: &Database, req: NewProduct, field_message: &str) {
        let before = db.products().count().await.unwrap();
        let err = create_product(db, req).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, field_message);
        assert_eq!(db.products().count().await.unwrap(), before);
    }

    // ---- list / show ----

    #[tokio::test]
    async fn test_list_products_returns_meta() {
        let db = sample_db().await;
        let params = ListParams {
            category_id: Some(1),
            ..ListParams::default()
        };

        let page = list_products(&db, params).await.unwrap();
        assert_eq!(page.meta.pagination.total, 3);
        assert_eq!(page.meta.pagination.total_pages, 1);
        assert_eq!(page.meta.pagination.limit, 10);
        assert_eq!(page.meta.keyword, "");
    }

    #[tokio::test]
    async fn test_get_product() {
        let db = sample_db().await;

        let chang = get_product(&db, 2).await.unwrap();
        assert_eq!(chang.product_name, "Chang");
        assert_eq!(chang.total_sold, 16);

        let missing = get_product(&db, 404).await.unwrap_err();
        assert_eq!(missing.code, ErrorCode::NotFound);
        assert_eq!(missing.message, "Product not found: 404");

        let invalid = get_product(&db, 0).await.unwrap_err();
        assert_eq!(invalid.code, ErrorCode::ValidationError);
    }

    // ---- create: validation order ----

    #[tokio::test]
    async fn test_create_rejects_short_name_first() {
        let db = sample_db().await;
        assert_rejected(
            &db,
            request("ab", 0, 0, 0.0),
            "product_name must be at least 3 characters",
        )
        .await;
    }

    #[tokio::test]
    async fn test_create_checks_ids_before_lookups() {
        let db = sample_db().await;
        assert_rejected(&db, request("Ikura", 0, 99, 0.0), "supplier_id is required").await;
        assert_rejected(&db, request("Ikura", 99, 0, 0.0), "category_id is required").await;
    }

    #[tokio::test]
    async fn test_create_checks_supplier_before_category() {
        let db = sample_db().await;
        assert_rejected(
            &db,
            request("Ikura", 99, 99, 31.0),
            "supplier_id does not exist: 99",
        )
        .await;
        assert_rejected(
            &db,
            request("Ikura", 7, 99, 31.0),
            "category_id does not exist: 99",
        )
        .await;
    }

    #[tokio::test]
    async fn test_create_checks_price_last() {
        let db = sample_db().await;
        assert_rejected(
            &db,
            request("Ikura", 7, 8, 0.0),
            "unit_price must be greater than 0",
        )
        .await;
        assert_rejected(
            &db,
            request("Ikura", 7, 8, -1.0),
            "unit_price must be greater than 0",
        )
        .await;
    }

    // ---- create: success ----

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let db = sample_db().await;
        let record = create_product(&db, request("  Ikura ", 7, 8, 31.0))
            .await
            .unwrap();

        assert!(!record.is_provisional());
        let detail = record.detail();
        assert_eq!(detail.product_id, 25);
        assert_eq!(detail.product_name, "Ikura");
        assert_eq!(detail.category_name, "Seafood");
        assert_eq!(detail.supplier_name, "Pavlova, Ltd.");
        assert_eq!(detail.units_in_stock, 0);
        assert!(!detail.discontinued);
    }

    #[tokio::test]
    async fn test_create_returns_provisional_record_when_read_back_fails() {
        // Discontinued exists, so the insert succeeds, but the extended
        // detail columns do not, and the profile forbids falling back.
        let config = DbConfig::in_memory()
            .run_migrations(false)
            .schema_profile(SchemaProfile::Extended);
        let db = Database::new(config).await.unwrap();
        create_partial_schema(&db).await;

        let record = create_product(&db, request("Ikura", 1, 1, 31.0))
            .await
            .unwrap();

        assert!(record.is_provisional());
        let detail = record.detail();
        assert_eq!(detail.product_id, 1);
        assert_eq!(detail.product_name, "Ikura");
        assert_eq!(detail.category_name, "");
        assert_eq!(detail.total_sold, 0);
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    async fn create_partial_schema(db: &Database) {
        db.execute_script(
            "CREATE TABLE categories (CategoryID INTEGER PRIMARY KEY, CategoryName TEXT); \
             CREATE TABLE suppliers (SupplierID INTEGER PRIMARY KEY, CompanyName TEXT); \
             CREATE TABLE products (ProductID INTEGER PRIMARY KEY, ProductName TEXT, \
                 SupplierID INTEGER, CategoryID INTEGER, UnitPrice REAL, \
                 UnitsInStock INTEGER, Discontinued INTEGER); \
             INSERT INTO categories VALUES (1, 'Seafood'); \
             INSERT INTO suppliers VALUES (1, 'Tokyo Traders');",
        )
        .await
        .unwrap();
    }

    // ---- lookups ----

    #[tokio::test]
    async fn test_reference_lookups() {
        let db = sample_db().await;

        let categories = list_categories(&db).await.unwrap();
        assert_eq!(categories.len(), 5);

        let suppliers = list_suppliers(&db).await.unwrap();
        assert_eq!(suppliers[1].company_name, "Grandma Kelly's Homestead");
    }
}

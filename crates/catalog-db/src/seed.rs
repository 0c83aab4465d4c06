//! # Sample Data
//!
//! A small slice of the Northwind dataset, used by the `seed` binary and by
//! the repository tests.
//!
//! ## Contents
//! - 5 categories, 4 suppliers, 9 products
//! - 12 customers, 10 of them with orders
//! - Product 24 has no supplier and no stock value, exercising the
//!   empty-name and zero defaults
//!
//! ## Expected Totals
//! ```text
//! Customer                               Total
//! ──────────────────────────────────  ─────────
//! Ernst Handel                          3185.00
//! QUICK-Stop                            1900.00
//! Save-a-lot Markets                     660.00
//! Folk och fä HB                         216.00
//! Alfreds Futterkiste                    155.00
//! Ana Trujillo Emparedados y helados     125.00
//! Blondesddsl père et fils               100.00
//! Berglunds snabbköp                      52.35
//! Bottom-Dollar Markets                   20.00
//! Bon app'                                19.00
//! Chop-suey Chinese, Paris spécialités     0.00
//! ```

use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;

/// Insert statements for the sample dataset.
pub const SAMPLE_DATA_SQL: &str = r#"
INSERT INTO categories (CategoryID, CategoryName, Description) VALUES
    (1, 'Beverages', 'Soft drinks, coffees, teas, beers, and ales'),
    (2, 'Condiments', 'Sweet and savory sauces, relishes, spreads, and seasonings'),
    (3, 'Confections', 'Desserts, candies, and sweet breads'),
    (4, 'Dairy Products', 'Cheeses'),
    (8, 'Seafood', 'Seaweed and fish');

INSERT INTO suppliers (SupplierID, CompanyName, ContactName, City, Country) VALUES
    (1, 'Exotic Liquids', 'Charlotte Cooper', 'London', 'UK'),
    (2, 'New Orleans Cajun Delights', 'Shelley Burke', 'New Orleans', 'USA'),
    (3, 'Grandma Kelly''s Homestead', 'Regina Murphy', 'Ann Arbor', 'USA'),
    (7, 'Pavlova, Ltd.', 'Ian Devling', 'Melbourne', 'Australia');

INSERT INTO products (ProductID, ProductName, SupplierID, CategoryID, QuantityPerUnit,
                      UnitPrice, UnitsInStock, UnitsOnOrder, ReorderLevel, Discontinued) VALUES
    (1, 'Chai', 1, 1, '10 boxes x 20 bags', 18.00, 39, 0, 10, 0),
    (2, 'Chang', 1, 1, '24 - 12 oz bottles', 19.00, 17, 40, 25, 0),
    (3, 'Aniseed Syrup', 1, 2, '12 - 550 ml bottles', 10.00, 13, 70, 25, 0),
    (4, 'Chef Anton''s Cajun Seasoning', 2, 2, '48 - 6 oz jars', 22.00, 53, 0, 0, 0),
    (5, 'Chef Anton''s Gumbo Mix', 2, 2, '36 boxes', 21.35, 0, 0, 0, 1),
    (6, 'Grandma''s Boysenberry Spread', 3, 2, '12 - 8 oz jars', 25.00, 120, 0, 25, 0),
    (16, 'Pavlova', 7, 3, '32 - 500 g boxes', 17.45, 29, 0, 10, 0),
    (18, 'Carnarvon Tigers', 7, 8, '16 kg pkg.', 62.50, 42, 0, 0, 0),
    (24, 'Guaraná Fantástica', NULL, 1, '12 - 355 ml cans', 4.50, NULL, 0, 0, 1);

INSERT INTO customers (CustomerID, CompanyName, ContactName, City, Country) VALUES
    ('ALFKI', 'Alfreds Futterkiste', 'Maria Anders', 'Berlin', 'Germany'),
    ('ANATR', 'Ana Trujillo Emparedados y helados', 'Ana Trujillo', 'México D.F.', 'Mexico'),
    ('BERGS', 'Berglunds snabbköp', 'Christina Berglund', 'Luleå', 'Sweden'),
    ('BLONP', 'Blondesddsl père et fils', 'Frédérique Citeaux', 'Strasbourg', 'France'),
    ('BONAP', 'Bon app''', 'Laurence Lebihan', 'Marseille', 'France'),
    ('BOTTM', 'Bottom-Dollar Markets', 'Elizabeth Lincoln', 'Tsawassen', 'Canada'),
    ('CHOPS', 'Chop-suey Chinese', 'Yang Wang', 'Bern', 'Switzerland'),
    ('ERNSH', 'Ernst Handel', 'Roland Mendel', 'Graz', 'Austria'),
    ('FOLKO', 'Folk och fä HB', 'Maria Larsson', 'Bräcke', 'Sweden'),
    ('PARIS', 'Paris spécialités', 'Marie Bertrand', 'Paris', 'France'),
    ('QUICK', 'QUICK-Stop', 'Horst Kloss', 'Cunewalde', 'Germany'),
    ('SAVEA', 'Save-a-lot Markets', 'Jose Pavarotti', 'Boise', 'USA');

INSERT INTO orders (OrderID, CustomerID, OrderDate) VALUES
    (10248, 'ERNSH', '1996-07-04'),
    (10249, 'QUICK', '1996-07-05'),
    (10250, 'SAVEA', '1996-07-08'),
    (10251, 'ALFKI', '1996-07-08'),
    (10252, 'ANATR', '1996-07-09'),
    (10253, 'FOLKO', '1996-07-10'),
    (10254, 'BERGS', '1996-07-11'),
    (10255, 'ERNSH', '1996-07-12'),
    (10256, 'BLONP', '1996-07-15'),
    (10257, 'BONAP', '1996-07-16'),
    (10258, 'BOTTM', '1996-07-17');

INSERT INTO order_details (OrderID, ProductID, UnitPrice, Quantity, Discount) VALUES
    (10248, 18, 62.50, 20, 0),
    (10248, 2, 19.00, 10, 0),
    (10249, 1, 18.00, 50, 0),
    (10249, 6, 25.00, 40, 0),
    (10250, 4, 22.00, 30, 0),
    (10251, 3, 10.00, 6, 0),
    (10251, 2, 19.00, 5, 0),
    (10252, 18, 62.50, 2, 0),
    (10253, 1, 18.00, 12, 0),
    (10254, 16, 17.45, 3, 0),
    (10255, 16, 17.45, 100, 0),
    (10256, 6, 25.00, 4, 0),
    (10257, 2, 19.00, 1, 0),
    (10258, 3, 10.00, 2, 0);
"#;

/// Loads the sample dataset.
///
/// Expects empty tables; a second run fails on duplicate primary keys.
pub async fn load_sample_data(db: &Database) -> DbResult<()> {
    info!("Loading Northwind sample data");

    db.execute_script(SAMPLE_DATA_SQL).await
}

/// In-memory database with migrations applied and sample data loaded.
#[cfg(test)]
pub(crate) async fn sample_database() -> Database {
    use crate::pool::DbConfig;

    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    load_sample_data(&db).await.expect("sample data");
    db
}

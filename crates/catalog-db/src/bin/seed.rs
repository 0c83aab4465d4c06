//! # Seed Data Loader
//!
//! Creates a database with the Northwind schema and sample rows for
//! development.
//!
//! ## Usage
//! ```bash
//! cargo run -p catalog-db --bin seed
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/northwind.db
//! ```

use catalog_db::migrations::migration_status;
use catalog_db::seed::load_sample_data;
use catalog_db::{Database, DbConfig};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Northwind catalog sample data loader")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./northwind.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Northwind Catalog Seed");
    println!("=========================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");

    let status = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", status.applied, status.total);

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    load_sample_data(&db).await?;

    let products = db.products().count().await?;
    let categories = db.products().list_categories().await?.len();
    let suppliers = db.products().list_suppliers().await?.len();

    println!();
    println!("✓ Loaded {} products", products);
    println!("  {} categories, {} suppliers", categories, suppliers);
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

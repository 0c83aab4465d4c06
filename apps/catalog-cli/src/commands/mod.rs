//! # Catalog Commands
//!
//! One function per CLI command. Each takes the database handle plus typed
//! arguments and returns a typed result, so the same functions back the
//! binary and the tests.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch)
//! ├── product.rs  ◄─── list / show / create, categories, suppliers
//! └── report.rs   ◄─── sales report
//! ```

pub mod product;
pub mod report;

use catalog_db::Database;
use serde::Serialize;

use crate::cli::{Command, ProductCommand};
use crate::error::ApiError;

/// Runs one parsed command and returns the text to print on stdout.
pub async fn dispatch(db: &Database, command: Command) -> Result<String, ApiError> {
    match command {
        Command::Products(ProductCommand::List(args)) => {
            to_json(&product::list_products(db, args.into_params()).await?)
        }
        Command::Products(ProductCommand::Show { id }) => {
            to_json(&product::get_product(db, id).await?)
        }
        Command::Products(ProductCommand::Create(args)) => {
            to_json(&product::create_product(db, args.into()).await?)
        }
        Command::Categories => to_json(&product::list_categories(db).await?),
        Command::Suppliers => to_json(&product::list_suppliers(db).await?),
        Command::Report => report::sales_report(db).await,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use catalog_db::seed::load_sample_data;
    use catalog_db::DbConfig;
    use clap::Parser;

    async fn sample_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        load_sample_data(&db).await.unwrap();
        db
    }

    async fn run(db: &Database, args: &[&str]) -> Result<String, ApiError> {
        let cli = Cli::try_parse_from(std::iter::once("catalog").chain(args.iter().copied()))
            .unwrap();
        dispatch(db, cli.command).await
    }

    #[tokio::test]
    async fn test_list_prints_page_json() {
        let db = sample_db().await;
        let out = run(&db, &["products", "list", "--search", "Chef", "--limit", "1"])
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["items"].as_array().unwrap().len(), 1);
        assert_eq!(json["meta"]["pagination"]["total"], 2);
        assert_eq!(json["meta"]["pagination"]["total_pages"], 2);
        assert_eq!(json["meta"]["keyword"], "Chef");
    }

    #[tokio::test]
    async fn test_show_missing_product_is_not_found() {
        let db = sample_db().await;
        let err = run(&db, &["products", "show", "999"]).await.unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_report_prints_table() {
        let db = sample_db().await;
        let out = run(&db, &["report"]).await.unwrap();

        assert!(out.starts_with("Laporan Penjualan"));
        assert!(out.contains("$3,185.00"));
    }

    #[tokio::test]
    async fn test_categories_json() {
        let db = sample_db().await;
        let out = run(&db, &["categories"]).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json[0]["category_name"], "Beverages");
        assert_eq!(json.as_array().unwrap().len(), 5);
    }
}

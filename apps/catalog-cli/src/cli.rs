//! Command-line arguments.

use std::path::PathBuf;

use catalog_core::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use catalog_core::{ListParams, NewProduct};
use clap::{Args, Parser, Subcommand};

use crate::settings::DEFAULT_SETTINGS_FILE;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Northwind product catalog")]
pub struct Cli {
    /// SQLite database path (overrides settings)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse, inspect and add products
    #[command(subcommand)]
    Products(ProductCommand),

    /// List categories
    Categories,

    /// List suppliers
    Suppliers,

    /// Print the top customers by sales
    Report,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products with filters, sorting and pagination
    List(ListArgs),

    /// Show one product with its units sold
    Show {
        /// Product id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Add a product
    Create(CreateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub category_id: Option<i64>,

    #[arg(long)]
    pub supplier_id: Option<i64>,

    /// Inclusive lower price bound
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Substring of the product name
    #[arg(long)]
    pub keyword: Option<String>,

    /// Alias of --keyword
    #[arg(long)]
    pub search: Option<String>,

    /// Alias of --keyword, takes precedence over --search and --keyword
    #[arg(long)]
    pub product_name: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE, value_parser = clap::value_parser!(i64).range(1..))]
    pub page: i64,

    /// Page size, clamped to 1..=100
    #[arg(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// product_name | unit_price | units_in_stock, optionally suffixed :asc or :desc
    #[arg(long)]
    pub sort: Option<String>,
}

impl ListArgs {
    /// First non-empty keyword in alias precedence order.
    pub fn keyword(&self) -> Option<String> {
        [&self.product_name, &self.search, &self.keyword]
            .into_iter()
            .flatten()
            .find(|k| !k.is_empty())
            .cloned()
    }

    pub fn into_params(self) -> ListParams {
        ListParams {
            keyword: self.keyword(),
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            min_price: self.min_price,
            max_price: self.max_price,
            page: self.page,
            limit: self.limit,
            sort: self.sort,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Product name (at least 3 characters)
    #[arg(long)]
    pub name: String,

    #[arg(long, allow_negative_numbers = true)]
    pub supplier_id: i64,

    #[arg(long, allow_negative_numbers = true)]
    pub category_id: i64,

    #[arg(long, allow_negative_numbers = true)]
    pub unit_price: f64,

    #[arg(long)]
    pub units_in_stock: Option<i64>,

    #[arg(long)]
    pub discontinued: bool,
}

impl From<CreateArgs> for NewProduct {
    fn from(args: CreateArgs) -> Self {
        NewProduct {
            product_name: args.name,
            supplier_id: args.supplier_id,
            category_id: args.category_id,
            unit_price: args.unit_price,
            units_in_stock: args.units_in_stock,
            discontinued: args.discontinued.then_some(true),
        }
    }
}

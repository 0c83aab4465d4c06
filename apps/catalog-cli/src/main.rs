//! # Catalog CLI Entry Point
//!
//! Binary entry point. All logic lives in the library crate.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    catalog_cli::run().await
}

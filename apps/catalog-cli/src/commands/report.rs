//! Sales report command.

use catalog_db::Database;
use tracing::{error, info};

use crate::error::ApiError;

/// Renders the top-customers table.
pub async fn sales_report(db: &Database) -> Result<String, ApiError> {
    Ok(db.sales_report().render_top_customers().await?)
}

/// Renders the report into the log once at startup.
///
/// Failures are logged and otherwise ignored; the requested command still
/// runs.
pub async fn log_startup_report(db: &Database) {
    match db.sales_report().render_top_customers().await {
        Ok(table) => info!("Startup sales report\n{}", table),
        Err(err) => error!(error = %err, "Startup sales report failed"),
    }
}

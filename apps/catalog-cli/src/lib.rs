//! # Catalog CLI Library
//!
//! Startup and command dispatch for the `catalog` binary.
//!
//! ## Module Organization
//! ```text
//! catalog_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── settings.rs     ◄─── Layered settings (defaults, file, env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch
//! │   ├── product.rs  ◄─── Product list/show/create, lookups
//! │   └── report.rs   ◄─── Sales report
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod settings;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_db::Database;
use cli::Cli;
use settings::Settings;

/// Runs the catalog CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse arguments (clap)                                              │
/// │  2. Initialize logging (tracing-subscriber, RUST_LOG)                   │
/// │  3. Load settings (defaults → catalog.toml → CATALOG_*, then --db)      │
/// │  4. Connect to database (WAL, migrations)                               │
/// │  5. Optional startup sales report (logged)                              │
/// │  6. Dispatch the command                                                │
/// │       ├── Ok  → stdout, exit 0                                          │
/// │       └── Err → ApiError JSON on stderr, exit 1                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Bootstrap failures (settings, connection, migrations) are returned as
/// `anyhow::Error`; command failures become an exit status.
pub async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing();

    info!("Starting Northwind catalog");

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?
        .with_database_override(cli.db.clone());

    let db = Database::new(settings.db_config())
        .await
        .with_context(|| format!("opening {}", settings.database_path.display()))?;

    if settings.report_on_startup {
        commands::report::log_startup_report(&db).await;
    }

    let outcome = commands::dispatch(&db, cli.command).await;
    db.close().await;

    match outcome {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", err.to_json());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=catalog_db=trace` - Trace one crate only
/// - Default: `info,catalog=debug,sqlx=warn`
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # Application Settings
//!
//! Layered settings for the catalog CLI.
//!
//! ## Sources (later wins)
//! ```text
//! 1. Built-in defaults
//! 2. catalog.toml (optional; path set by --config)
//! 3. CATALOG_* environment variables
//!      CATALOG_DATABASE_PATH      ./northwind.db
//!      CATALOG_MAX_CONNECTIONS    5
//!      CATALOG_SCHEMA_PROFILE     auto | extended | basic
//!      CATALOG_REPORT_ON_STARTUP  false
//! 4. --db on the command line (database path only)
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use catalog_db::{DbConfig, SchemaProfile};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_DATABASE_PATH: &str = "./northwind.db";
pub const DEFAULT_SETTINGS_FILE: &str = "catalog.toml";
const ENV_PREFIX: &str = "CATALOG";

/// Settings errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub schema_profile: SchemaProfile,
    /// Render the sales report into the log once the database is open.
    pub report_on_startup: bool,
}

impl Settings {
    /// Loads settings from defaults, the optional file, and the process
    /// environment.
    pub fn load(file: &Path) -> Result<Self, SettingsError> {
        Self::load_with_env(file, None)
    }

    /// Same as [`Settings::load`] with an explicit environment map in place
    /// of the process environment.
    pub fn load_with_env(
        file: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let builder = Self::defaults()?
            .add_source(File::from(file).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            );

        Self::build(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("max_connections", 5_i64)?
            .set_default("schema_profile", SchemaProfile::Auto.as_str())?
            .set_default("report_on_startup", false)?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.max_connections == 0 {
            return Err(SettingsError::InvalidValue {
                field: "max_connections",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue {
                field: "database_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Replaces the database path when one was given on the command line.
    pub fn with_database_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database_path = path;
        }
        self
    }

    /// Pool configuration for these settings.
    pub fn db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.database_path);
        let config = if config.is_in_memory() {
            DbConfig::in_memory()
        } else {
            config.max_connections(self.max_connections)
        };
        config.schema_profile(self.schema_profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Settings, SettingsError> {
        Settings::build(
            Settings::defaults()
                .unwrap()
                .add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_file() {
        let settings =
            Settings::load_with_env(Path::new("does-not-exist.toml"), env(&[])).unwrap();

        assert_eq!(settings.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.schema_profile, SchemaProfile::Auto);
        assert!(!settings.report_on_startup);
    }

    #[test]
    fn test_file_values() {
        let settings = from_toml(
            r#"
            database_path = "/var/lib/catalog/northwind.db"
            max_connections = 8
            schema_profile = "basic"
            report_on_startup = true
            "#,
        )
        .unwrap();

        assert_eq!(
            settings.database_path,
            PathBuf::from("/var/lib/catalog/northwind.db")
        );
        assert_eq!(settings.max_connections, 8);
        assert_eq!(settings.schema_profile, SchemaProfile::Basic);
        assert!(settings.report_on_startup);
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::load_with_env(
            Path::new("does-not-exist.toml"),
            env(&[
                ("CATALOG_SCHEMA_PROFILE", "extended"),
                ("CATALOG_MAX_CONNECTIONS", "2"),
                ("CATALOG_REPORT_ON_STARTUP", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.schema_profile, SchemaProfile::Extended);
        assert_eq!(settings.max_connections, 2);
        assert!(settings.report_on_startup);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            from_toml("max_connections = 0"),
            Err(SettingsError::InvalidValue {
                field: "max_connections",
                ..
            })
        ));
        assert!(matches!(
            from_toml(r#"schema_profile = "everything""#),
            Err(SettingsError::Load(_))
        ));
    }

    #[test]
    fn test_cli_override_and_db_config() {
        let settings = from_toml("max_connections = 3")
            .unwrap()
            .with_database_override(Some(PathBuf::from(":memory:")));

        let config = settings.db_config();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);

        let file = from_toml("max_connections = 3").unwrap().db_config();
        assert_eq!(file.max_connections, 3);
        assert_eq!(file.schema_profile, SchemaProfile::Auto);
    }
}

//! # Schema Profile
//!
//! Declares which optional `products` columns the target database has.
//!
//! Legacy copies of the Northwind schema sometimes lack `QuantityPerUnit`,
//! `UnitsOnOrder`, `ReorderLevel` and `Discontinued`. The profile selects the
//! column set used by list, detail and insert statements.
//!
//! | Profile    | List      | Detail                          | Insert                  |
//! |------------|-----------|---------------------------------|-------------------------|
//! | `auto`     | extended  | extended, then basic on error   | with `Discontinued`     |
//! | `extended` | extended  | extended only                   | with `Discontinued`     |
//! | `basic`    | basic     | basic only                      | without `Discontinued`  |
//!
//! `auto` cannot tell "column missing" from any other failure of the extended
//! detail query; both trigger the single basic retry. Set the profile
//! explicitly when the schema is known.

use std::fmt;
use std::str::FromStr;

use catalog_core::ProductColumns;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaProfile {
    #[default]
    Auto,
    Extended,
    Basic,
}

impl SchemaProfile {
    /// Column set for list queries.
    pub fn list_columns(self) -> ProductColumns {
        match self {
            SchemaProfile::Basic => ProductColumns::Basic,
            SchemaProfile::Auto | SchemaProfile::Extended => ProductColumns::Extended,
        }
    }

    /// Whether the insert may write the `Discontinued` column.
    pub fn has_discontinued(self) -> bool {
        !matches!(self, SchemaProfile::Basic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaProfile::Auto => "auto",
            SchemaProfile::Extended => "extended",
            SchemaProfile::Basic => "basic",
        }
    }
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown profile name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schema profile '{0}' (expected auto, extended or basic)")]
pub struct ParseSchemaProfileError(String);

impl FromStr for SchemaProfile {
    type Err = ParseSchemaProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SchemaProfile::Auto),
            "extended" => Ok(SchemaProfile::Extended),
            "basic" => Ok(SchemaProfile::Basic),
            other => Err(ParseSchemaProfileError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        assert_eq!("AUTO".parse::<SchemaProfile>(), Ok(SchemaProfile::Auto));
        assert_eq!(" basic ".parse::<SchemaProfile>(), Ok(SchemaProfile::Basic));
        assert!("full".parse::<SchemaProfile>().is_err());
    }

    #[test]
    fn test_profile_columns() {
        assert_eq!(SchemaProfile::Auto.list_columns(), ProductColumns::Extended);
        assert_eq!(SchemaProfile::Basic.list_columns(), ProductColumns::Basic);
        assert!(SchemaProfile::Extended.has_discontinued());
        assert!(!SchemaProfile::Basic.has_discontinued());
    }
}

//! # Validation Module
//!
//! Input checks applied by callers before they reach the store.
//!
//! ## Creation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Creation Checks                              │
//! │                                                                         │
//! │  1. validate_product_name      (≥ 3 characters)                        │
//! │  2. validate_reference_id      (supplier_id > 0, category_id > 0)      │
//! │  3. exists_supplier / exists_category   ← catalog-db lookups           │
//! │  4. validate_unit_price        (> 0)                                   │
//! │  5. INSERT                                                              │
//! │                                                                         │
//! │  Each step stops the workflow on failure; nothing is written until      │
//! │  every check passed.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum number of characters in a product name.
pub const MIN_PRODUCT_NAME_LEN: usize = 3;

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must contain at least 3 characters (after trimming)
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Chai").is_ok());
/// assert!(validate_product_name("Ch").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("product_name"));
    }

    if name.chars().count() < MIN_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "product_name".to_string(),
            min: MIN_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates that an identifier was supplied (strictly positive).
pub fn validate_reference_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a product id used for a detail lookup.
pub fn validate_product_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "product_id".to_string(),
        });
    }
    Ok(())
}

/// Validates a unit price.
///
/// NaN and infinities are rejected along with zero and negative values.
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Tofu").is_ok());
        assert!(validate_product_name("Ikura").is_ok());
        assert!(validate_product_name("abc").is_ok());

        assert_eq!(
            validate_product_name("   "),
            Err(ValidationError::required("product_name"))
        );
        assert!(matches!(
            validate_product_name(" ab "),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
    }

    #[test]
    fn test_validate_reference_id() {
        assert!(validate_reference_id("supplier_id", 1).is_ok());
        assert_eq!(
            validate_reference_id("supplier_id", 0),
            Err(ValidationError::required("supplier_id"))
        );
        assert!(validate_reference_id("category_id", -3).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(77).is_ok());
        assert!(validate_product_id(0).is_err());
        assert!(validate_product_id(-1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.01).is_ok());
        assert!(validate_unit_price(263.5).is_ok());

        assert!(validate_unit_price(0.0).is_err());
        assert!(validate_unit_price(-4.5).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
        assert!(validate_unit_price(f64::INFINITY).is_err());
    }
}

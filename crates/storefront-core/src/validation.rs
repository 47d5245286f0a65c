//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog boundary (storefront-catalog)                        │
//! │  ├── Wire record → typed Product                                       │
//! │  └── THIS MODULE: id / name / price rules                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Configuration (apps/terminal)                                │
//! │  └── THIS MODULE: fee and tax rate rules                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartStore                                                    │
//! │  └── THIS MODULE: price cap and cart size bounds                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::{Money, MINOR_PER_UNIT};
use crate::{MAX_AMOUNT_UNITS, MAX_CART_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product ID.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
/// - No control characters (the name becomes one line of the order text)
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Masala Chai").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// assert!(validate_product_name("Chai\nTOTAL: 0").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if trimmed.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price given as a JSON number and converts it to Money.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is allowed: free items)
/// - At most [`MAX_AMOUNT_UNITS`]
/// - At most two decimal places
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_price;
///
/// assert_eq!(validate_price(100.0).unwrap(), Money::from_units(100));
/// assert_eq!(validate_price(49.5).unwrap(), Money::from_minor(4950));
/// assert!(validate_price(9.999).is_err());
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<Money> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if price > MAX_AMOUNT_UNITS as f64 {
        return Err(price_out_of_range());
    }

    let minor = price * MINOR_PER_UNIT as f64;
    let rounded = minor.round();
    if (minor - rounded).abs() > 1e-6 {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must have at most two decimal places".to_string(),
        });
    }

    Ok(Money::from_minor(rounded as i64))
}

/// Validates a unit price that is already Money.
///
/// Products built in code skip the catalog boundary; the cart calls this
/// before freezing a price into a line.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if price > Money::from_units(MAX_AMOUNT_UNITS) {
        return Err(price_out_of_range());
    }

    Ok(())
}

fn price_out_of_range() -> ValidationError {
    ValidationError::OutOfRange {
        field: "price".to_string(),
        min: 0,
        max: MAX_AMOUNT_UNITS,
    }
}

/// Validates a flat fee amount in whole units.
///
/// ## Rules
/// - Must be non-negative
/// - At most [`MAX_AMOUNT_UNITS`]
pub fn validate_fee(field: &str, units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if units > MAX_AMOUNT_UNITS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_UNITS,
        });
    }

    Ok(())
}

/// Validates a tax rate given as a fraction.
///
/// ## Rules
/// - Must be finite
/// - Must be between 0.0 and 1.0 (0% to 100%)
/// - Must be a whole number of basis points (0.0825 is fine, 0.18125 is not)
pub fn validate_tax_fraction(fraction: f64) -> ValidationResult<()> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 1,
        });
    }

    let bps = fraction * 10_000.0;
    if (bps - bps.round()).abs() > 1e-6 {
        return Err(ValidationError::InvalidFormat {
            field: "tax_rate".to_string(),
            reason: "must be a whole number of basis points (0.01%)".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct line fits in the cart.
///
/// ## Rules
/// - Current line count must be below MAX_CART_LINES (100)
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
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
    fn test_validate_product_id() {
        assert!(validate_product_id("1").is_ok());
        assert!(validate_product_id("sku-42").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(&"9".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Filter Coffee").is_ok());
        assert!(validate_product_name("Café Crème").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_product_name_rejects_control_characters() {
        for name in ["Chai\nTOTAL: 0", "Chai\r", "Tab\tbed", "Bell\u{7}", "Next\u{85}line"] {
            assert!(
                matches!(
                    validate_product_name(name),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(0.0).unwrap(), Money::zero());
        assert_eq!(validate_price(100.0).unwrap(), Money::from_units(100));
        assert_eq!(validate_price(49.5).unwrap(), Money::from_minor(4950));
        assert_eq!(validate_price(0.07).unwrap(), Money::from_minor(7));
        assert_eq!(validate_price(19.99).unwrap(), Money::from_minor(1999));

        assert!(matches!(
            validate_price(-5.0),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(matches!(
            validate_price(10.255),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_price(f64::INFINITY).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_price_cap() {
        assert_eq!(
            validate_price(MAX_AMOUNT_UNITS as f64).unwrap(),
            Money::from_units(MAX_AMOUNT_UNITS)
        );
        assert!(matches!(
            validate_price(1.0e16),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(9.2e18).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_units(MAX_AMOUNT_UNITS)).is_ok());

        assert!(validate_unit_price(Money::from_minor(-1)).is_err());
        assert!(validate_unit_price(Money::from_minor(i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_fee() {
        assert!(validate_fee("delivery_fee", 0).is_ok());
        assert!(validate_fee("delivery_fee", 50).is_ok());
        assert!(validate_fee("delivery_fee", -1).is_err());
        assert!(validate_fee("delivery_fee", MAX_AMOUNT_UNITS + 1).is_err());
        assert!(validate_fee("delivery_fee", i64::MAX).is_err());
    }

    #[test]
    fn test_validate_tax_fraction() {
        assert!(validate_tax_fraction(0.0).is_ok());
        assert!(validate_tax_fraction(0.18).is_ok());
        assert!(validate_tax_fraction(0.0825).is_ok());
        assert!(validate_tax_fraction(1.0).is_ok());
        assert!(validate_tax_fraction(-0.01).is_err());
        assert!(validate_tax_fraction(1.01).is_err());
    }

    #[test]
    fn test_validate_tax_fraction_rejects_sub_basis_points() {
        assert!(matches!(
            validate_tax_fraction(0.18125),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_tax_fraction(0.000_01).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(99).is_ok());
        assert!(validate_cart_size(100).is_err());
    }
}

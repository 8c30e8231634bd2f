//! # Validation Module
//!
//! Input validation for catalog fields.
//!
//! ## Why validate at all?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  What the catalog file can hold                         │
//! │                                                                         │
//! │  name,barcode,price,discount,stock                                      │
//! │                                                                         │
//! │  • No escaping: lines are split from the right, so only the name may   │
//! │    contain commas; a comma in a barcode would shift every field        │
//! │  • One product per line: a newline would split the record              │
//! │  • The barcode is typed as a single whitespace-delimited token         │
//! │                                                                         │
//! │  Anything that passes these checks survives a save and reload intact.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_barcode, validate_discount_percent};
//!
//! assert!(validate_barcode("W1").is_ok());
//! assert_eq!(validate_discount_percent(10).unwrap().percent(), 10);
//! assert!(validate_discount_percent(101).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Discount;
use crate::{FIELD_SEPARATOR, MAX_DISCOUNT_PERCENT, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted barcode.
pub const MAX_BARCODE_LEN: usize = 50;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No whitespace and no commas
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if barcode
        .chars()
        .any(|c| c.is_whitespace() || c == FIELD_SEPARATOR)
    {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must not contain spaces or commas".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or only whitespace
/// - At most 200 characters
/// - No line breaks (commas are fine)
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    if name.contains(['\n', '\r']) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not contain line breaks".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// Zero is allowed (free items). Negative prices and prices above
/// [`MAX_PRICE_CENTS`] are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: Money::from_cents(MAX_PRICE_CENTS).dollars(),
        });
    }

    Ok(())
}

/// Validates a discount typed as a whole percentage and converts it.
pub fn validate_discount_percent(percent: i64) -> ValidationResult<Discount> {
    let max = i64::from(MAX_DISCOUNT_PERCENT);
    if !(0..=max).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max,
        });
    }

    Ok(Discount::from_percent(percent as u8))
}

/// Validates a stock count and converts it.
pub fn validate_stock(stock: i64) -> ValidationResult<u32> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    u32::try_from(stock).map_err(|_| ValidationError::OutOfRange {
        field: "stock".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("W1").is_ok());
        assert!(validate_barcode("5449000000996").is_ok());
        assert!(validate_barcode("COKE-330_a").is_ok());

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("has space").is_err());
        assert!(validate_barcode("a,b").is_err());
        assert!(validate_barcode(&"9".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coca-Cola 330ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name("Milk, whole").is_ok());
        assert!(validate_product_name("two\nlines").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());

        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        let err = validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)).unwrap_err();
        assert_eq!(err.to_string(), "price must be between 0 and 10000000");
    }

    #[test]
    fn test_validate_discount_percent() {
        assert_eq!(validate_discount_percent(0).unwrap(), Discount::none());
        assert_eq!(validate_discount_percent(100).unwrap().percent(), 100);
        assert!(validate_discount_percent(-1).is_err());
        assert!(validate_discount_percent(101).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert_eq!(validate_stock(0).unwrap(), 0);
        assert_eq!(validate_stock(42).unwrap(), 42);
        assert!(validate_stock(-3).is_err());
        assert!(validate_stock(i64::from(u32::MAX) + 1).is_err());
    }
}

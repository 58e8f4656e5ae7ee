//! # Validation Module
//!
//! Input validation utilities for Vendo POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (serde)                                         │
//! │  ├── Shape and type checks (typed request DTOs)                         │
//! │  └── Malformed payloads rejected before business logic                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - Business rule validation                        │
//! │  ├── Item codes, names, mobile numbers                                  │
//! │  └── Quantities, prices, discount values                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL and CHECK constraints                                     │
//! │  ├── UNIQUE item code (COLLATE NOCASE)                                  │
//! │  └── Guarded stock decrement (quantity >= requested)                    │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_CODE_LEN, MAX_LINE_QUANTITY, MAX_MONEY_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an inventory item code.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 5 characters
/// - Must contain only alphanumeric characters
///
/// Case-insensitive uniqueness is enforced by the store at write time,
/// not here.
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_item_code;
///
/// assert!(validate_item_code("A1").is_ok());
/// assert!(validate_item_code("COKE5").is_ok());
/// assert!(validate_item_code("").is_err());
/// assert!(validate_item_code("TOOLONG").is_err());
/// assert!(validate_item_code("A-1").is_err());
/// ```
pub fn validate_item_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "itemCode".to_string(),
        });
    }

    if code.len() > MAX_ITEM_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "itemCode".to_string(),
            max: MAX_ITEM_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "itemCode".to_string(),
            reason: "must contain only letters and numbers".to_string(),
        });
    }

    Ok(())
}

/// Validates an item name or description.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a customer mobile number.
///
/// ## Rules
/// - Exactly 10 digits, e.g. `0771234567`
/// - Or `+` followed by exactly 11 digits, e.g. `+94771234567`
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_mobile;
///
/// assert!(validate_mobile("0771234567").is_ok());
/// assert!(validate_mobile("+94771234567").is_ok());
/// assert!(validate_mobile("12345").is_err());
/// assert!(validate_mobile("077-123456").is_err());
/// ```
pub fn validate_mobile(mobile: &str) -> ValidationResult<()> {
    let mobile = mobile.trim();

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    let valid = match mobile.strip_prefix('+') {
        Some(rest) => rest.len() == 11 && all_digits(rest),
        None => mobile.len() == 10 && all_digits(mobile),
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "customerMobile".to_string(),
            reason: "must be 10 digits, or + followed by 11 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a stock level for direct inventory edits.
///
/// ## Rules
/// - Must be non-negative (zero means out of stock, which is allowed)
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Parses a decimal monetary amount from the API boundary into [`Money`].
///
/// ## Rules
/// - Must be a finite number (rejects NaN/Infinity from arithmetic upstream)
/// - Must be non-negative
/// - Must not exceed [`MAX_MONEY_CENTS`]; this bound is what keeps the
///   integer line math (`price * quantity`, subtotal sums) inside i64
///
/// The half-up rounding to cents happens here, exactly once.
pub fn parse_money(field: &str, value: f64) -> ValidationResult<Money> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    if value > (MAX_MONEY_CENTS / 100) as f64 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_MONEY_CENTS / 100,
        });
    }

    Ok(Money::from_decimal(value))
}

/// Parses a percentage value (e.g. `12.5` for 12.5%) into basis points.
///
/// ## Rules
/// - Must be a finite, non-negative number
///
/// Values above 100% are accepted here; the pricing step clamps them to
/// 100% rather than rejecting, so billing staff are never blocked by an
/// over-generous discount entry.
pub fn parse_percentage(field: &str, value: f64) -> ValidationResult<u32> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    // Cap before the u32 cast; the pricing clamp to 10000 bps follows anyway.
    let bps = (value * 100.0).round().min(u32::MAX as f64);
    Ok(bps as u32)
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_code() {
        // Valid codes
        assert!(validate_item_code("A1").is_ok());
        assert!(validate_item_code("COKE5").is_ok());
        assert!(validate_item_code("9").is_ok());

        // Invalid codes
        assert!(validate_item_code("").is_err());
        assert!(validate_item_code("   ").is_err());
        assert!(validate_item_code("TOOLONG").is_err());
        assert!(validate_item_code("A-1").is_err());
        assert!(validate_item_code("A 1").is_err());
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("name", "Coca-Cola 330ml").is_ok());
        assert!(validate_text("name", "").is_err());
        assert!(validate_text("name", "   ").is_err());
        assert!(validate_text("description", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("0771234567").is_ok());
        assert!(validate_mobile("+94771234567").is_ok());

        assert!(validate_mobile("").is_err());
        assert!(validate_mobile("12345").is_err());
        assert!(validate_mobile("07712345678").is_err()); // 11 digits, no +
        assert!(validate_mobile("+9477123456").is_err()); // 10 digits after +
        assert!(validate_mobile("077-123456").is_err());
        assert!(validate_mobile("+94 7712345").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(100).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("price", 10.99).unwrap().cents(), 1099);
        assert_eq!(parse_money("price", 0.0).unwrap().cents(), 0);

        assert!(parse_money("price", -1.0).is_err());
        assert!(parse_money("price", f64::NAN).is_err());
        assert!(parse_money("price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_parse_money_upper_bound() {
        // The largest accepted amount converts exactly
        let max_units = (MAX_MONEY_CENTS / 100) as f64;
        assert_eq!(parse_money("price", max_units).unwrap().cents(), MAX_MONEY_CENTS);

        // Amounts that would overflow line math downstream are rejected
        // outright rather than wrapping or saturating
        assert!(parse_money("price", 1e15).is_err());
        assert!(parse_money("price", 1e18).is_err());
        assert!(parse_money("price", max_units + 1.0).is_err());
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("discountValue", 12.5).unwrap(), 1250);
        assert_eq!(parse_percentage("discountValue", 100.0).unwrap(), 10000);
        // Over-100 values pass through; pricing clamps them
        assert_eq!(parse_percentage("discountValue", 150.0).unwrap(), 15000);

        assert!(parse_percentage("discountValue", -5.0).is_err());
        assert!(parse_percentage("discountValue", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}

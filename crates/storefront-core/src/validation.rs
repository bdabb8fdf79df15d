//! # Validation Module
//!
//! Input validation for data crossing into the pricing core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty code field, quantity steppers)         │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Business rule validation before any money math runs               │
//! │                                                                         │
//! │  The engine never trusts the cart store: a sync bug upstream must      │
//! │  surface as a typed error here, not as a negative grand total.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_quantity, validate_price_cents};
//!
//! validate_quantity(2).unwrap();
//! validate_price_cents(2599).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::LineItem;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS, MAX_PROMO_CODE_LENGTH};

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed MAX_PRICE_CENTS ($1,000,000.00) - anything higher is
///   corrupt cart data, and the cap keeps line totals and subtotals inside
///   i64 range
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(2599).is_ok()); // $25.99
/// assert!(validate_price_cents(0).is_ok());    // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// assert!(validate_price_cents(i64::MAX).is_err()); // Corrupt
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a promotion discount rate in basis points.
///
/// ## Rules
/// - Must be strictly below 10000: a discount rate is a fraction in [0, 1),
///   a 100% code would make the grand-total clamp load-bearing
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps >= 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discount_rate".to_string(),
            min: 0,
            max: 9999,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a promotion code's format (not its existence in the registry).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 32 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_promotion_code;
///
/// assert!(validate_promotion_code("SAVE10").is_ok());
/// assert!(validate_promotion_code("save10").is_ok()); // case handled at lookup
/// assert!(validate_promotion_code("").is_err());
/// assert!(validate_promotion_code("HAS SPACE").is_err());
/// ```
pub fn validate_promotion_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_PROMO_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_PROMO_CODE_LENGTH,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product ID string format.
///
/// ## Rules
/// - Must be a valid UUID: 36 characters with hyphens
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "product_id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a full line item before it enters any pricing math.
///
/// ## Checks
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  validate_line_item(item)                                               │
/// │       │                                                                 │
/// │       ├── product_id a UUID?       → InvalidFormat                      │
/// │       ├── quantity in 1..=999?     → MustBePositive / OutOfRange        │
/// │       ├── list price in 0..=cap?   → OutOfRange                         │
/// │       ├── sale price in 0..=cap?   → OutOfRange (if present)            │
/// │       │                                                                 │
/// │       └── OK → line enters the fold                                     │
/// │                                                                         │
/// │  NOTE: sale price ABOVE list is deliberately not an error - that is    │
/// │        the "not on sale" normalization, handled in LineItem.            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_product_id(&item.product_id)?;
    validate_quantity(item.quantity)?;
    validate_price_cents(item.list_price_cents)?;
    if let Some(sale) = item.sale_price_cents {
        validate_price_cents(sale)?;
    }
    Ok(())
}

/// Validates cart size (number of line items).
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(item_count: usize) -> ValidationResult<()> {
    if item_count > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

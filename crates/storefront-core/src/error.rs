//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── PricingError     - Pricing request failures                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError ──► PricingError ──► UI layer decides how to    │
//! │        present it (inline field error, toast, etc.)                    │
//! │                                                                         │
//! │  There is no retry path: pricing is pure local computation, nothing    │
//! │  transient can fail.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, line index, the code entered)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Failures of a pricing request.
///
/// Exactly two things can go wrong when computing a breakdown, and they have
/// very different severities for the caller.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A line item carried malformed data (negative price, zero or
    /// over-limit quantity, bad product ID).
    ///
    /// Fatal to the call: the engine aborts before aggregating anything, so
    /// a partially-computed breakdown can never leak out. The index and SKU
    /// identify the offending item for the cart store to repair.
    #[error("Invalid line item '{sku}' at position {index}: {reason}")]
    InvalidLineItem {
        index: usize,
        sku: String,
        #[source]
        reason: ValidationError,
    },

    /// The cart exceeded the maximum allowed number of line items.
    ///
    /// Fatal to the call, like `InvalidLineItem`: the cart store enforces
    /// the same limit upstream, so hitting this means the input is corrupt,
    /// not merely large.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// The supplied promotion code matched no active promotion.
    ///
    /// Recoverable: the caller keeps its previous breakdown and surfaces the
    /// rejection next to the code field. Distinct from supplying no code at
    /// all, which always succeeds with a zero discount.
    #[error("Unknown promotion code: {code}")]
    UnknownPromotionCode { code: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when data arriving from the cart store or the promotion-code
/// field doesn't meet requirements. Used for early validation before any
/// pricing math runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, disallowed characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_line_item_message() {
        let err = PricingError::InvalidLineItem {
            index: 2,
            sku: "MUG-01".to_string(),
            reason: ValidationError::MustBePositive {
                field: "quantity".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid line item 'MUG-01' at position 2: quantity must be positive"
        );
    }

    #[test]
    fn test_cart_too_large_message() {
        let err = PricingError::CartTooLarge { max: 100 };
        assert_eq!(err.to_string(), "Cart cannot have more than 100 items");
    }

    #[test]
    fn test_unknown_promotion_code_message() {
        let err = PricingError::UnknownPromotionCode {
            code: "BOGUS".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown promotion code: BOGUS");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_invalid_line_item_exposes_source() {
        use std::error::Error as _;

        let err = PricingError::InvalidLineItem {
            index: 0,
            sku: "SKU".to_string(),
            reason: ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: i64::MAX,
            },
        };
        assert!(err.source().is_some());
    }
}

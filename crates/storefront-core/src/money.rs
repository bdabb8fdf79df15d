//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The checkout page shows the customer a total; the payment layer        │
//! │  charges that total. If the two disagree by a cent, someone files a     │
//! │  support ticket.                                                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    $25.99 is 2599. $8.99 shipping is 899. Sums are exact.              │
//! │    Rounding happens exactly once, at the rate multiplication.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(2599); // $25.99
//!
//! // Arithmetic operations
//! let pair = price * 2;                        // $51.98
//! let with_fee = pair + Money::from_cents(899); // $60.97
//!
//! // NEVER do this:
//! // let bad = Money::from_float(25.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate results of `subtotal − discount` may dip
///   below zero before clamping; the type must represent that
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON payloads to the UI layer
///
/// ## Where Money Flows
/// ```text
/// LineItem.list_price_cents ──► effective price ──► line total
///                                                        │
///                          subtotal ◄────────────────────┘
///                             │
///        shipping ── tax ── discount ──► grand total ──► amount to charge
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(2599); // Represents $25.99
    /// assert_eq!(price.cents(), 2599);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -$5.50, not -$4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Clamps negative values to zero, leaving non-negative values untouched.
    ///
    /// The grand total must never be negative: if some future discount policy
    /// could exceed subtotal + shipping + tax, the total floors at $0.00
    /// rather than turning the checkout into a payout.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-150).clamp_non_negative().cents(), 0);
    /// assert_eq!(Money::from_cents(150).clamp_non_negative().cents(), 150);
    /// ```
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Calculates tax on this amount at the given rate.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`,
    /// widened to i128 so large carts cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(11198); // $111.98
    /// let rate = TaxRate::from_bps(800);       // 8%
    ///
    /// let tax = subtotal.calculate_tax(rate);
    /// // $111.98 × 8% = $8.9584 → rounds to $8.96 (896 cents)
    /// assert_eq!(tax.cents(), 896);
    /// ```
    ///
    /// ## Checkout Workflow
    /// ```text
    /// Subtotal: $111.98
    ///      │
    ///      ▼
    /// calculate_tax(8%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $8.96 ──► added into the grand total
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Returns the given basis-point fraction of this amount.
    ///
    /// Used for promotion discounts: a 10% code is 1000 bps, so the discount
    /// on the subtotal is `subtotal.percentage(1000)`. Same half-up rounding
    /// as [`calculate_tax`](Money::calculate_tax).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    /// let discount = subtotal.percentage(1000); // 10%
    /// assert_eq!(discount.cents(), 1000); // $10.00
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2599); // $25.99
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 5198); // $51.98
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. The storefront formats prices client-side
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over an iterator of Money (for subtotal/savings folds).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

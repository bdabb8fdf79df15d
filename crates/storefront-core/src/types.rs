//! # Domain Types
//!
//! Core domain types exchanged with the external cart store and UI layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                                   │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────┐                     │
//! │  │      LineItem       │   │   PricingBreakdown  │                     │
//! │  │  ─────────────────  │   │  ─────────────────  │                     │
//! │  │  product_id (UUID)  │   │  subtotal_cents     │                     │
//! │  │  list_price_cents   │──►│  savings_cents      │                     │
//! │  │  sale_price_cents?  │   │  shipping_cents     │                     │
//! │  │  quantity           │   │  tax_cents          │                     │
//! │  │  in_stock           │   │  discount_cents     │                     │
//! │  └─────────────────────┘   │  grand_total_cents  │                     │
//! │                            │  lines: LinePricing │                     │
//! │  ┌─────────────────────┐   └─────────────────────┘                     │
//! │  │      TaxRate        │                                               │
//! │  │  bps (u32)          │   INPUT (cart store)  ──►  OUTPUT (checkout)  │
//! │  │  800 = 8.00%        │                                               │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `LineItem` is owned by the cart store; this crate treats it as read-only
//! input. `PricingBreakdown` is computed fresh on every request and never
//! mutated in place.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8.00% (the storefront's flat sales-tax rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in a cart, as supplied by the external cart store.
///
/// Prices are snapshots frozen at add-to-cart time: if the catalog price
/// changes afterwards, the cart keeps what the customer saw.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product ID (UUID v4) - reference back into the catalog.
    pub product_id: String,

    /// SKU at time of adding (frozen).
    pub sku: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Regular price in cents at time of adding (frozen).
    pub list_price_cents: i64,

    /// Sale price in cents, when the product was on promotion in the catalog.
    /// Only honored when strictly below the list price; see
    /// [`effective_price`](LineItem::effective_price).
    pub sale_price_cents: Option<i64>,

    /// Quantity in cart (must be >= 1).
    pub quantity: i64,

    /// Stock flag. Out-of-stock items still price normally; blocking
    /// checkout on them is the cart store's policy, not this crate's.
    pub in_stock: bool,
}

impl LineItem {
    /// Returns the list price as Money.
    #[inline]
    pub fn list_price(&self) -> Money {
        Money::from_cents(self.list_price_cents)
    }

    /// Returns the sale price as Money, if one was supplied.
    #[inline]
    pub fn sale_price(&self) -> Option<Money> {
        self.sale_price_cents.map(Money::from_cents)
    }

    /// Whether this item is actually on sale.
    ///
    /// A sale price that is present but not strictly below the list price is
    /// stale catalog data, not a sale; it is silently ignored (the product
    /// page applies the same rule when deciding whether to strike through
    /// the list price).
    #[inline]
    pub fn is_on_sale(&self) -> bool {
        matches!(self.sale_price_cents, Some(sale) if sale < self.list_price_cents)
    }

    /// The price the customer actually pays per unit.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::types::LineItem;
    ///
    /// let mut item = LineItem {
    ///     product_id: "550e8400-e29b-41d4-a716-446655440000".into(),
    ///     sku: "MUG-01".into(),
    ///     name: "Mug".into(),
    ///     list_price_cents: 2000,
    ///     sale_price_cents: Some(1500),
    ///     quantity: 1,
    ///     in_stock: true,
    /// };
    /// assert_eq!(item.effective_price().cents(), 1500);
    ///
    /// // "Sale" above list price falls back to list
    /// item.sale_price_cents = Some(2500);
    /// assert_eq!(item.effective_price().cents(), 2000);
    /// ```
    #[inline]
    pub fn effective_price(&self) -> Money {
        if self.is_on_sale() {
            // is_on_sale guarantees the Option is Some
            Money::from_cents(self.sale_price_cents.unwrap_or(self.list_price_cents))
        } else {
            self.list_price()
        }
    }

    /// Line total at the effective price (unit price × quantity).
    #[inline]
    pub fn line_subtotal(&self) -> Money {
        self.effective_price().multiply_quantity(self.quantity)
    }

    /// Amount saved on this line versus paying list price.
    /// Zero when the item is not on sale.
    #[inline]
    pub fn line_savings(&self) -> Money {
        if self.is_on_sale() {
            (self.list_price() - self.effective_price()).multiply_quantity(self.quantity)
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// Per-item pricing row computed alongside the breakdown, for display.
/// Rows appear in the same order as the input line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinePricing {
    pub product_id: String,
    pub sku: String,
    /// Effective unit price in cents (sale price when on sale).
    pub unit_price_cents: i64,
    /// unit_price × quantity.
    pub line_total_cents: i64,
    /// (list − sale) × quantity; 0 when not on sale.
    pub savings_cents: i64,
    pub on_sale: bool,
}

impl LinePricing {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// The full computed set of pricing fields shown to the customer before
/// checkout. Immutable output: recomputed fresh on every pricing request,
/// never persisted, never mutated in place.
///
/// ## Field Relationships
/// ```text
/// subtotal    = Σ effective_price × quantity
/// savings     = Σ (list − sale) × quantity        (display only, not
///                                                  subtracted again)
/// shipping    = 0 if subtotal ≥ threshold, else flat fee
/// tax         = subtotal × tax rate               (pre-discount, no
///                                                  shipping in the base)
/// discount    = subtotal × promotion rate
/// grand_total = subtotal + shipping + tax − discount   (floored at 0)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingBreakdown {
    pub subtotal_cents: i64,
    pub savings_cents: i64,
    pub shipping_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub grand_total_cents: i64,

    /// Normalized (upper-cased) code of the promotion that produced
    /// `discount_cents`, when one was applied.
    pub applied_promotion: Option<String>,

    /// Per-item rows in input order, for the cart/checkout display.
    pub lines: Vec<LinePricing>,
}

impl PricingBreakdown {
    /// An all-zero breakdown with no lines (the empty-cart result).
    pub fn empty() -> Self {
        PricingBreakdown {
            subtotal_cents: 0,
            savings_cents: 0,
            shipping_cents: 0,
            tax_cents: 0,
            discount_cents: 0,
            grand_total_cents: 0,
            applied_promotion: None,
            lines: Vec::new(),
        }
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the aggregate sale savings as Money.
    #[inline]
    pub fn savings(&self) -> Money {
        Money::from_cents(self.savings_cents)
    }

    /// Returns the shipping fee as Money.
    #[inline]
    pub fn shipping(&self) -> Money {
        Money::from_cents(self.shipping_cents)
    }

    /// Returns the tax as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the promotion discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the grand total as Money. This is the amount the checkout
    /// flow hands to the payment layer.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

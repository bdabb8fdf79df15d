//! # storefront-core: Pure Pricing Logic for the Storefront
//!
//! This crate is the **pricing heart** of the storefront. Every number the
//! customer sees between the cart page and the charge — subtotal, sale
//! savings, shipping, tax, promotion discount, grand total — is derived
//! here, as a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (TypeScript SPA)                       │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Confirmation     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ consumes generated TS bindings         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           Cart store / Checkout flow (external)                 │   │
//! │  │    owns LineItems, stock gating, payment initiation             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐     │   │
//! │  │   │   types   │ │   money   │ │ promotion │ │  pricing  │     │   │
//! │  │   │ LineItem  │ │   Money   │ │ Registry  │ │  Engine   │     │   │
//! │  │   │ Breakdown │ │  TaxCalc  │ │  SAVE10   │ │ breakdown │     │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘ └───────────┘     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK • PURE          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, PricingBreakdown, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`promotion`] - Promotion codes and the swap-on-refresh registry
//! - [`pricing`] - The PricingEngine itself
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every computation is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system, and clock access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_core::pricing::PricingEngine;
//! use storefront_core::promotion::PromotionRegistry;
//! use storefront_core::types::LineItem;
//!
//! let engine = PricingEngine::new(Arc::new(PromotionRegistry::with_defaults()));
//!
//! let cart = vec![LineItem {
//!     product_id: "550e8400-e29b-41d4-a716-446655440000".into(),
//!     sku: "TEE-01".into(),
//!     name: "T-Shirt".into(),
//!     list_price_cents: 2599, // $25.99 - never a float
//!     sale_price_cents: None,
//!     quantity: 2,
//!     in_stock: true,
//! }];
//!
//! let breakdown = engine.compute_breakdown(&cart, Some("SAVE10")).unwrap();
//! assert_eq!(breakdown.subtotal_cents, 5198);
//! assert_eq!(breakdown.discount_cents, 520); // 10% of $51.98
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use error::{PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use pricing::PricingEngine;
pub use promotion::{Promotion, PromotionRegistry, SharedPromotionRegistry};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax rate in basis points (800 = 8%).
///
/// ## Scope
/// Applied to the pre-discount subtotal only; shipping is never taxed. A
/// single flat rate is the current policy; per-region rates would arrive
/// through [`pricing::PricingEngine::with_policy`].
pub const TAX_RATE_BPS: u32 = 800;

/// Orders at or above this subtotal ship free ($50.00).
///
/// ## Boundary
/// Inclusive: a cart of exactly $50.00 qualifies.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5000;

/// Flat shipping fee below the free-shipping threshold ($8.99).
pub const FLAT_SHIPPING_FEE_CENTS: i64 = 899;

/// Maximum line items allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps pricing previews snappy.
/// Enforced by the cart store; mirrored here for validation.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price in cents ($1,000,000.00).
///
/// ## Business Reason
/// Nothing in the catalog costs a million dollars; a price beyond this is
/// corrupt cart data. The cap also keeps every line total
/// (`MAX_PRICE_CENTS × MAX_ITEM_QUANTITY`) and every cart subtotal
/// (`× MAX_CART_ITEMS`) far inside i64 range, so the pricing fold can use
/// plain integer arithmetic without overflow.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Maximum length of a promotion code.
pub const MAX_PROMO_CODE_LENGTH: usize = 32;

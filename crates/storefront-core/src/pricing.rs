//! # Pricing Engine
//!
//! The single pure transform of this crate: cart lines in, priced breakdown
//! out.
//!
//! ## Position in the Storefront
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pricing Data Flow                                  │
//! │                                                                         │
//! │  Cart Store (external) ──► LineItem[]  ─┐                               │
//! │                                         │                               │
//! │  Promo field (external) ──► code ───────┤                               │
//! │                                         ▼                               │
//! │                            ★ PricingEngine.compute_breakdown ★          │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                               PricingBreakdown                          │
//! │                                  │         │                            │
//! │            Cart/checkout UI ◄────┘         └────► Payment initiator     │
//! │            (renders fields)                       (charges grand_total) │
//! │                                                                         │
//! │  Historically this math lived inline in the cart and checkout views    │
//! │  and was recomputed on every render. It is now one function the views  │
//! │  call, so the pricing rules exist exactly once.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - **Pure**: no I/O, no clock, no mutation of anything external
//! - **Deterministic**: identical inputs yield identical breakdowns
//! - **All-or-nothing**: an invalid line item aborts the call before any
//!   aggregation; no partial breakdown can escape
//! - **Non-negative**: every output field, grand total included, is >= 0

use std::sync::Arc;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::promotion::{Promotion, PromotionRegistry};
use crate::types::{LineItem, LinePricing, PricingBreakdown, TaxRate};
use crate::{FLAT_SHIPPING_FEE_CENTS, FREE_SHIPPING_THRESHOLD_CENTS, TAX_RATE_BPS};

// =============================================================================
// Pricing Engine
// =============================================================================

/// Stateless pricing computation over a snapshot of cart lines.
///
/// "Stateless" in the operational sense: the engine owns only read-only
/// policy (rates, thresholds, the promotion registry snapshot) and no
/// per-request mutable state, so any number of callers may share one engine
/// concurrently without coordination.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    registry: Arc<PromotionRegistry>,
    tax_rate: TaxRate,
    free_shipping_threshold: Money,
    shipping_fee: Money,
}

impl PricingEngine {
    /// Creates an engine with the storefront's reference policy:
    /// 8% tax, free shipping at $50.00, $8.99 flat fee below it.
    pub fn new(registry: Arc<PromotionRegistry>) -> Self {
        PricingEngine {
            registry,
            tax_rate: TaxRate::from_bps(TAX_RATE_BPS),
            free_shipping_threshold: Money::from_cents(FREE_SHIPPING_THRESHOLD_CENTS),
            shipping_fee: Money::from_cents(FLAT_SHIPPING_FEE_CENTS),
        }
    }

    /// Creates an engine with explicit policy values (regional storefronts,
    /// tests).
    pub fn with_policy(
        registry: Arc<PromotionRegistry>,
        tax_rate: TaxRate,
        free_shipping_threshold: Money,
        shipping_fee: Money,
    ) -> Self {
        PricingEngine {
            registry,
            tax_rate,
            free_shipping_threshold,
            shipping_fee,
        }
    }

    /// Computes the full pricing breakdown for a cart.
    ///
    /// ## Arguments
    /// - `items`: the cart lines, in display order. Order never affects the
    ///   totals, but the per-line rows in the result preserve it. Empty is
    ///   valid and yields the all-zero breakdown.
    /// - `promotion_code`: the raw contents of the promo-code field. `None`
    ///   (or a blank string, which is the same thing arriving from a text
    ///   input) means no code entered and always succeeds with a zero
    ///   discount.
    ///
    /// ## Errors
    /// - [`PricingError::CartTooLarge`] when the cart exceeds
    ///   [`MAX_CART_ITEMS`](crate::MAX_CART_ITEMS).
    /// - [`PricingError::InvalidLineItem`] when any line carries a negative
    ///   or over-cap price, a non-positive or over-limit quantity, or a
    ///   malformed product ID. Returned before any aggregation happens.
    /// - [`PricingError::UnknownPromotionCode`] when a non-blank code
    ///   matches no active promotion. The caller keeps its previous
    ///   breakdown and surfaces the rejection inline.
    ///
    /// ## Computation
    /// ```text
    /// subtotal    = Σ effective_price × quantity
    /// savings     = Σ (list − sale) × quantity   over lines on sale
    /// shipping    = 0 if cart empty or subtotal ≥ $50.00, else $8.99
    /// tax         = subtotal × 8%                (pre-discount; shipping
    ///                                             is not taxed)
    /// discount    = subtotal × promotion rate
    /// grand_total = max(0, subtotal + shipping + tax − discount)
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use storefront_core::pricing::PricingEngine;
    /// use storefront_core::promotion::PromotionRegistry;
    /// use storefront_core::types::LineItem;
    ///
    /// let engine = PricingEngine::new(Arc::new(PromotionRegistry::with_defaults()));
    ///
    /// let items = vec![LineItem {
    ///     product_id: "550e8400-e29b-41d4-a716-446655440000".into(),
    ///     sku: "TEE-01".into(),
    ///     name: "T-Shirt".into(),
    ///     list_price_cents: 2599,
    ///     sale_price_cents: None,
    ///     quantity: 2,
    ///     in_stock: true,
    /// }];
    ///
    /// let breakdown = engine.compute_breakdown(&items, None).unwrap();
    /// assert_eq!(breakdown.subtotal_cents, 5198);
    /// assert_eq!(breakdown.shipping_cents, 0); // $51.98 ships free
    /// ```
    pub fn compute_breakdown(
        &self,
        items: &[LineItem],
        promotion_code: Option<&str>,
    ) -> PricingResult<PricingBreakdown> {
        // Validate everything up front so no partial breakdown can form.
        if crate::validation::validate_cart_size(items.len()).is_err() {
            return Err(PricingError::CartTooLarge {
                max: crate::MAX_CART_ITEMS,
            });
        }

        for (index, item) in items.iter().enumerate() {
            if let Err(reason) = crate::validation::validate_line_item(item) {
                return Err(PricingError::InvalidLineItem {
                    index,
                    sku: item.sku.clone(),
                    reason,
                });
            }
        }

        // Resolve the promotion before aggregating: a rejected code must
        // leave the caller's previous breakdown untouched, so it cannot
        // depend on anything computed below.
        let promotion = self.resolve_promotion(promotion_code)?;

        let mut subtotal = Money::zero();
        let mut savings = Money::zero();
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            let line_total = item.line_subtotal();
            let line_savings = item.line_savings();

            subtotal += line_total;
            savings += line_savings;

            lines.push(LinePricing {
                product_id: item.product_id.clone(),
                sku: item.sku.clone(),
                unit_price_cents: item.effective_price().cents(),
                line_total_cents: line_total.cents(),
                savings_cents: line_savings.cents(),
                on_sale: item.is_on_sale(),
            });
        }

        let shipping = self.shipping_for(items, subtotal);
        let tax = subtotal.calculate_tax(self.tax_rate);
        let discount = match promotion {
            Some(promo) => subtotal.percentage(promo.discount_bps),
            None => Money::zero(),
        };

        let grand_total = (subtotal + shipping + tax - discount).clamp_non_negative();

        Ok(PricingBreakdown {
            subtotal_cents: subtotal.cents(),
            savings_cents: savings.cents(),
            shipping_cents: shipping.cents(),
            tax_cents: tax.cents(),
            discount_cents: discount.cents(),
            grand_total_cents: grand_total.cents(),
            applied_promotion: promotion.map(|p| p.code.clone()),
            lines,
        })
    }

    /// Maps the raw promo-field contents to an applicable promotion.
    ///
    /// Blank input is "no code entered", never a rejection. A non-blank code
    /// that is absent from the registry or present but inactive rejects with
    /// `UnknownPromotionCode`; the two cases are deliberately
    /// indistinguishable to the caller.
    fn resolve_promotion(&self, code: Option<&str>) -> PricingResult<Option<&Promotion>> {
        let Some(raw) = code else {
            return Ok(None);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match self.registry.lookup(trimmed) {
            Some(promo) if promo.is_active => Ok(Some(promo)),
            _ => Err(PricingError::UnknownPromotionCode {
                code: trimmed.to_string(),
            }),
        }
    }

    /// Shipping policy: nothing to ship costs nothing; at or above the
    /// threshold ships free (exactly $50.00 qualifies); otherwise flat fee.
    fn shipping_for(&self, items: &[LineItem], subtotal: Money) -> Money {
        if items.is_empty() || subtotal >= self.free_shipping_threshold {
            Money::zero()
        } else {
            self.shipping_fee
        }
    }
}

impl Default for PricingEngine {
    /// Reference policy over the default promotion registry.
    fn default() -> Self {
        PricingEngine::new(Arc::new(PromotionRegistry::with_defaults()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PricingEngine {
        PricingEngine::default()
    }

    fn item(sku: &str, list: i64, sale: Option<i64>, qty: i64) -> LineItem {
        LineItem {
            product_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            sku: sku.to_string(),
            name: format!("Product {}", sku),
            list_price_cents: list,
            sale_price_cents: sale,
            quantity: qty,
            in_stock: true,
        }
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let breakdown = engine().compute_breakdown(&[], None).unwrap();
        assert_eq!(breakdown, PricingBreakdown::empty());
    }

    #[test]
    fn test_reference_cart_breakdown() {
        // Two T-shirts at $25.99 plus one $75.00 hoodie marked down to $60.00
        let items = vec![
            item("TEE-01", 2599, None, 2),
            item("HOOD-01", 7500, Some(6000), 1),
        ];

        let breakdown = engine().compute_breakdown(&items, None).unwrap();

        assert_eq!(breakdown.subtotal_cents, 11198); // 25.99×2 + 60.00
        assert_eq!(breakdown.savings_cents, 1500); // 75.00 − 60.00
        assert_eq!(breakdown.shipping_cents, 0); // $111.98 ships free
        assert_eq!(breakdown.tax_cents, 896); // 8% of 111.98 = 8.9584 → 8.96
        assert_eq!(breakdown.discount_cents, 0);
        assert_eq!(breakdown.grand_total_cents, 12094);
        assert!(breakdown.applied_promotion.is_none());
    }

    #[test]
    fn test_line_rows_preserve_input_order() {
        let items = vec![
            item("B-SECOND", 1000, None, 1),
            item("A-FIRST", 2000, Some(1500), 2),
        ];

        let breakdown = engine().compute_breakdown(&items, None).unwrap();

        assert_eq!(breakdown.lines.len(), 2);
        assert_eq!(breakdown.lines[0].sku, "B-SECOND");
        assert_eq!(breakdown.lines[1].sku, "A-FIRST");
        assert_eq!(breakdown.lines[1].unit_price_cents, 1500);
        assert_eq!(breakdown.lines[1].line_total_cents, 3000);
        assert_eq!(breakdown.lines[1].savings_cents, 1000);
        assert!(breakdown.lines[1].on_sale);
    }

    #[test]
    fn test_free_shipping_threshold_boundary() {
        // Exactly $50.00 ships free
        let at = vec![item("A", 5000, None, 1)];
        let breakdown = engine().compute_breakdown(&at, None).unwrap();
        assert_eq!(breakdown.shipping_cents, 0);

        // One cent under pays the flat fee
        let under = vec![item("A", 4999, None, 1)];
        let breakdown = engine().compute_breakdown(&under, None).unwrap();
        assert_eq!(breakdown.shipping_cents, 899);
        // 49.99 + 8.99 shipping + 4.00 tax (8% of 49.99 = 3.9992 → 4.00)
        assert_eq!(breakdown.tax_cents, 400);
        assert_eq!(breakdown.grand_total_cents, 4999 + 899 + 400);
    }

    #[test]
    fn test_save10_on_hundred_dollar_cart() {
        let items = vec![item("A", 10000, None, 1)];
        let breakdown = engine().compute_breakdown(&items, Some("SAVE10")).unwrap();

        assert_eq!(breakdown.discount_cents, 1000); // $10.00 off
        assert_eq!(breakdown.tax_cents, 800); // tax on pre-discount subtotal
        assert_eq!(breakdown.shipping_cents, 0);
        assert_eq!(breakdown.grand_total_cents, 10000 + 800 - 1000);
        assert_eq!(breakdown.applied_promotion.as_deref(), Some("SAVE10"));
    }

    #[test]
    fn test_promotion_code_is_case_insensitive() {
        let items = vec![item("A", 10000, None, 1)];
        let breakdown = engine()
            .compute_breakdown(&items, Some("  save10 "))
            .unwrap();
        assert_eq!(breakdown.discount_cents, 1000);
        assert_eq!(breakdown.applied_promotion.as_deref(), Some("SAVE10"));
    }

    #[test]
    fn test_unknown_code_rejects_without_breakdown() {
        let items = vec![item("A", 10000, None, 1)];
        let err = engine()
            .compute_breakdown(&items, Some("BOGUS"))
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::UnknownPromotionCode { ref code } if code == "BOGUS"
        ));
    }

    #[test]
    fn test_inactive_code_rejects_like_unknown() {
        let mut registry = PromotionRegistry::new();
        registry
            .insert(crate::promotion::Promotion {
                code: "EXPIRED".to_string(),
                discount_bps: 2000,
                description: None,
                is_active: false,
                starts_at: None,
                ends_at: None,
            })
            .unwrap();
        let engine = PricingEngine::new(Arc::new(registry));

        let items = vec![item("A", 10000, None, 1)];
        let err = engine.compute_breakdown(&items, Some("EXPIRED")).unwrap_err();
        assert!(matches!(err, PricingError::UnknownPromotionCode { .. }));
    }

    #[test]
    fn test_blank_code_means_no_code() {
        let items = vec![item("A", 10000, None, 1)];

        let none = engine().compute_breakdown(&items, None).unwrap();
        let blank = engine().compute_breakdown(&items, Some("   ")).unwrap();

        assert_eq!(none, blank);
        assert_eq!(none.discount_cents, 0);
    }

    #[test]
    fn test_invalid_line_item_aborts_with_position() {
        let items = vec![
            item("GOOD", 1000, None, 1),
            item("BAD-QTY", 1000, None, 0),
        ];

        let err = engine().compute_breakdown(&items, None).unwrap_err();
        match err {
            PricingError::InvalidLineItem { index, sku, .. } => {
                assert_eq!(index, 1);
                assert_eq!(sku, "BAD-QTY");
            }
            other => panic!("expected InvalidLineItem, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let items = vec![item("NEG", -100, None, 1)];
        assert!(matches!(
            engine().compute_breakdown(&items, None),
            Err(PricingError::InvalidLineItem { index: 0, .. })
        ));

        let items = vec![item("NEG-SALE", 1000, Some(-1), 1)];
        assert!(engine().compute_breakdown(&items, None).is_err());
    }

    #[test]
    fn test_extreme_price_is_rejected_not_overflowed() {
        // A corrupt price near i64::MAX must fail validation; if it were
        // admitted, the line fold would wrap and a negative subtotal could
        // escape.
        let items = vec![item("CORRUPT", i64::MAX, None, 2)];
        assert!(matches!(
            engine().compute_breakdown(&items, None),
            Err(PricingError::InvalidLineItem { index: 0, .. })
        ));

        let items = vec![item("CORRUPT-SALE", 1000, Some(i64::MAX), 1)];
        assert!(engine().compute_breakdown(&items, None).is_err());
    }

    #[test]
    fn test_largest_admissible_cart_stays_in_range() {
        // 100 lines at the price and quantity caps: the worst case the
        // validators allow through must fold without wrapping.
        let items: Vec<LineItem> = (0..crate::MAX_CART_ITEMS)
            .map(|i| item(&format!("MAX-{i}"), crate::MAX_PRICE_CENTS, None, crate::MAX_ITEM_QUANTITY))
            .collect();

        let breakdown = engine().compute_breakdown(&items, Some("SAVE10")).unwrap();
        assert!(breakdown.subtotal_cents > 0);
        assert_eq!(
            breakdown.subtotal_cents,
            crate::MAX_PRICE_CENTS * crate::MAX_ITEM_QUANTITY * crate::MAX_CART_ITEMS as i64
        );
        assert!(breakdown.tax_cents > 0);
        assert!(breakdown.grand_total_cents > 0);
    }

    #[test]
    fn test_oversized_cart_is_rejected() {
        let items: Vec<LineItem> = (0..crate::MAX_CART_ITEMS + 1)
            .map(|i| item(&format!("SKU-{i}"), 100, None, 1))
            .collect();

        let err = engine().compute_breakdown(&items, None).unwrap_err();
        assert!(matches!(
            err,
            PricingError::CartTooLarge { max } if max == crate::MAX_CART_ITEMS
        ));

        // Exactly at the limit is fine
        let items: Vec<LineItem> = (0..crate::MAX_CART_ITEMS)
            .map(|i| item(&format!("SKU-{i}"), 100, None, 1))
            .collect();
        assert!(engine().compute_breakdown(&items, None).is_ok());
    }

    #[test]
    fn test_sale_above_list_contributes_list_price() {
        let items = vec![item("STALE", 2000, Some(2500), 3)];
        let breakdown = engine().compute_breakdown(&items, None).unwrap();

        assert_eq!(breakdown.subtotal_cents, 6000); // 20.00 × 3
        assert_eq!(breakdown.savings_cents, 0);
        assert!(!breakdown.lines[0].on_sale);
    }

    #[test]
    fn test_out_of_stock_items_still_price() {
        let mut unavailable = item("OOS", 4000, None, 1);
        unavailable.in_stock = false;

        let breakdown = engine().compute_breakdown(&[unavailable], None).unwrap();
        assert_eq!(breakdown.subtotal_cents, 4000);
        assert_eq!(breakdown.shipping_cents, 899);
    }

    #[test]
    fn test_determinism() {
        let items = vec![
            item("TEE-01", 2599, None, 2),
            item("HOOD-01", 7500, Some(6000), 1),
        ];
        let engine = engine();

        let first = engine.compute_breakdown(&items, Some("SAVE10")).unwrap();
        let second = engine.compute_breakdown(&items, Some("SAVE10")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_grand_total_monotonic_in_quantity() {
        let engine = engine();
        let mut previous = 0;

        for qty in 1..=20 {
            let items = vec![item("A", 1234, None, qty)];
            let breakdown = engine.compute_breakdown(&items, Some("SAVE10")).unwrap();
            assert!(
                breakdown.grand_total_cents >= previous,
                "total decreased at qty {qty}"
            );
            previous = breakdown.grand_total_cents;
        }
    }

    #[test]
    fn test_grand_total_never_negative() {
        // A 99.99% code pushes the discount as high as policy allows
        let mut registry = PromotionRegistry::new();
        registry
            .insert(crate::promotion::Promotion {
                code: "ALMOST-FREE".to_string(),
                discount_bps: 9999,
                description: None,
                is_active: true,
                starts_at: None,
                ends_at: None,
            })
            .unwrap();
        let engine = PricingEngine::new(Arc::new(registry));

        for cents in [1, 49, 4999, 5000, 12345] {
            let items = vec![item("A", cents, None, 1)];
            let breakdown = engine
                .compute_breakdown(&items, Some("ALMOST-FREE"))
                .unwrap();
            assert!(breakdown.grand_total_cents >= 0, "negative at {cents}");
        }
    }

    #[test]
    fn test_custom_policy() {
        // Zero tax, free shipping from $10.00, $2.00 fee below it
        let engine = PricingEngine::with_policy(
            Arc::new(PromotionRegistry::new()),
            TaxRate::zero(),
            Money::from_cents(1000),
            Money::from_cents(200),
        );

        let items = vec![item("A", 999, None, 1)];
        let breakdown = engine.compute_breakdown(&items, None).unwrap();
        assert_eq!(breakdown.tax_cents, 0);
        assert_eq!(breakdown.shipping_cents, 200);
        assert_eq!(breakdown.grand_total_cents, 1199);
    }
}

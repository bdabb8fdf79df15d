//! # Promotion Registry
//!
//! Promotion codes and the registry the pricing engine looks them up in.
//!
//! ## Why a Registry?
//! The storefront launched with a single hardcoded `SAVE10` branch in the
//! checkout UI. Magic-string branching doesn't survive a second code, so the
//! core models promotions as data: a map from normalized code to discount
//! rate, seeded with the known production code and extended by whatever
//! back-office tooling feeds the refresh path.
//!
//! ## Lookup Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer types a code into the promo field                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trim + uppercase ("  save10 " → "SAVE10")                              │
//! │       │                                                                 │
//! │       ├── present and active ──► Promotion { discount_bps: 1000 }       │
//! │       │                                                                 │
//! │       └── absent or inactive ──► UnknownPromotionCode                   │
//! │                                                                         │
//! │  Inactive and absent are deliberately indistinguishable: expired        │
//! │  codes must not leak their existence to code-guessers.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::validation::{validate_discount_bps, validate_promotion_code};

// =============================================================================
// Promotion
// =============================================================================

/// A registered promotion code.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Promotion {
    /// Normalized (upper-cased) code the customer types in.
    pub code: String,

    /// Discount rate in basis points (1000 = 10% off the subtotal).
    /// Always below 10000: a promotion is a fraction of the subtotal,
    /// never the whole of it.
    pub discount_bps: u32,

    /// Optional marketing copy ("10% off your first order").
    pub description: Option<String>,

    /// Whether the promotion currently applies. The refresh layer derives
    /// this from the validity window; the engine only ever reads the flag,
    /// never the clock.
    pub is_active: bool,

    /// Start of the validity window, if bounded.
    #[ts(as = "Option<String>")]
    pub starts_at: Option<DateTime<Utc>>,

    /// End of the validity window, if bounded.
    #[ts(as = "Option<String>")]
    pub ends_at: Option<DateTime<Utc>>,
}

impl Promotion {
    /// The discount rate as a fraction (for display only; all money math
    /// stays in basis points).
    #[inline]
    pub fn discount_rate(&self) -> f64 {
        self.discount_bps as f64 / 10000.0
    }

    /// Whether the validity window contains `now`.
    ///
    /// Called by the refresh layer when it rebuilds the registry, passing
    /// its own clock reading. Keeping the clock out of this crate keeps
    /// pricing deterministic.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        let started = self.starts_at.is_none_or(|start| now >= start);
        let not_ended = self.ends_at.is_none_or(|end| now < end);
        started && not_ended
    }
}

// =============================================================================
// Promotion Registry
// =============================================================================

/// Case-insensitive map from promotion code to promotion.
///
/// The registry is an immutable value at pricing time: the engine holds an
/// `Arc` to one and never mutates it. Refreshes build a whole new registry
/// and swap the reference (see [`SharedPromotionRegistry`]).
#[derive(Debug, Clone, Default)]
pub struct PromotionRegistry {
    promotions: HashMap<String, Promotion>,
}

impl PromotionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        PromotionRegistry {
            promotions: HashMap::new(),
        }
    }

    /// Creates the registry seeded with the storefront's standing codes.
    ///
    /// `SAVE10` (10% off, no expiry) is the one code observed in production.
    pub fn with_defaults() -> Self {
        let mut registry = PromotionRegistry::new();
        registry
            .insert(Promotion {
                code: "SAVE10".to_string(),
                discount_bps: 1000,
                description: Some("10% off your order".to_string()),
                is_active: true,
                starts_at: None,
                ends_at: None,
            })
            .expect("default promotion is well-formed");
        registry
    }

    /// Inserts a promotion, normalizing its code to upper case.
    ///
    /// Rejects codes with invalid format and rates outside [0, 10000).
    /// Re-inserting an existing code replaces it.
    pub fn insert(&mut self, mut promotion: Promotion) -> ValidationResult<()> {
        validate_promotion_code(&promotion.code)?;
        validate_discount_bps(promotion.discount_bps)?;

        promotion.code = promotion.code.trim().to_uppercase();
        self.promotions.insert(promotion.code.clone(), promotion);
        Ok(())
    }

    /// Looks up a code case-insensitively, ignoring surrounding whitespace.
    ///
    /// Returns the promotion whether or not it is active; the engine applies
    /// the activity check so the two rejection cases stay in one place.
    pub fn lookup(&self, code: &str) -> Option<&Promotion> {
        self.promotions.get(&code.trim().to_uppercase())
    }

    /// Number of registered promotions.
    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    /// Whether the registry holds no promotions.
    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }
}

// =============================================================================
// Shared Registry Handle
// =============================================================================

/// A registry handle shared between the pricing engine's callers and the
/// refresh path that periodically reloads promotions from the back office.
///
/// ## Atomic Swap
/// Refreshing replaces the whole `Arc`, never edits the map in place, so an
/// in-flight pricing computation that already loaded the registry keeps its
/// consistent snapshot and can never observe a half-updated map.
///
/// ## Why RwLock?
/// Every pricing request loads; refreshes are rare. The inverse of a cart's
/// access pattern, where writes dominate and a plain `Mutex` suffices.
#[derive(Debug, Default)]
pub struct SharedPromotionRegistry {
    inner: RwLock<Arc<PromotionRegistry>>,
}

impl SharedPromotionRegistry {
    /// Creates a shared handle over the given registry.
    pub fn new(registry: PromotionRegistry) -> Self {
        SharedPromotionRegistry {
            inner: RwLock::new(Arc::new(registry)),
        }
    }

    /// Returns the current registry snapshot. Cheap: clones an `Arc`.
    pub fn load(&self) -> Arc<PromotionRegistry> {
        self.inner
            .read()
            .expect("promotion registry lock poisoned")
            .clone()
    }

    /// Replaces the registry wholesale with a freshly built one.
    pub fn replace(&self, registry: PromotionRegistry) {
        let mut guard = self
            .inner
            .write()
            .expect("promotion registry lock poisoned");
        *guard = Arc::new(registry);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

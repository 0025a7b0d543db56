//! # Cart Pricing Engine
//!
//! The single source of truth for every money amount the storefront shows.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pricing Data Flow                                  │
//! │                                                                         │
//! │  Cart items ──┐                                                         │
//! │               │                                                         │
//! │  Shipping ────┼──► compute_totals() ──► CartTotals ──► cart page        │
//! │  cost         │    (pure, idempotent)       │          cart drawer      │
//! │               │                             │          checkout summary │
//! │  Discount ────┘                             │                           │
//! │                                             ▼                           │
//! │  Every view reads the SAME derivation. No view does its own math.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `subtotal = Σ(price × quantity)`, `item_count = Σ(quantity)`
//! - Effective shipping is 0 at or above the free-shipping threshold
//! - `total` never goes negative: it is clamped at zero when the discount
//!   exceeds subtotal + shipping

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CartItem;

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived money amounts for the current cart + shipping + discount state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of `price × quantity` over all lines.
    pub subtotal: Money,

    /// Sum of quantities over all lines.
    pub item_count: i64,

    /// The resolved shipping cost for the destination (before the
    /// free-shipping waiver is applied).
    pub shipping_cost: Money,

    /// Whether the subtotal reached the free-shipping threshold.
    pub is_free_shipping: bool,

    /// Discount granted by the applied coupon (zero when none).
    pub discount: Money,

    /// Amount still needed to reach free shipping (zero once reached).
    pub remaining_for_free_shipping: Money,

    /// `subtotal + effective shipping - discount`, clamped at zero.
    pub total: Money,
}

impl CartTotals {
    /// The shipping amount that actually enters the total.
    #[inline]
    pub fn effective_shipping(&self) -> Money {
        if self.is_free_shipping {
            Money::zero()
        } else {
            self.shipping_cost
        }
    }
}

// =============================================================================
// Totals Derivation
// =============================================================================

/// Derives all displayed totals from the current cart and pricing state.
///
/// Pure and referentially transparent: no hidden state, same inputs always
/// produce the same output, callable as often as the UI re-renders. A cart
/// of zero items yields zeroed totals; treating that cart as "empty" (and
/// not offering checkout) is the caller's concern.
///
/// ## Example
/// ```rust
/// use tienda_core::money::Money;
/// use tienda_core::pricing::compute_totals;
///
/// let totals = compute_totals(&[], Money::new(250), Money::zero(), Money::new(3000));
/// assert_eq!(totals.total, Money::new(250));
/// assert!(!totals.is_free_shipping);
/// ```
pub fn compute_totals(
    items: &[CartItem],
    shipping_cost: Money,
    discount: Money,
    free_shipping_threshold: Money,
) -> CartTotals {
    let subtotal = items
        .iter()
        .fold(Money::zero(), |acc, i| acc + i.line_total());
    let item_count = items.iter().map(|i| i.quantity).sum();

    let is_free_shipping = subtotal >= free_shipping_threshold;
    let effective_shipping = if is_free_shipping {
        Money::zero()
    } else {
        shipping_cost
    };

    CartTotals {
        subtotal,
        item_count,
        shipping_cost,
        is_free_shipping,
        discount,
        remaining_for_free_shipping: (free_shipping_threshold - subtotal).clamp_zero(),
        total: (subtotal + effective_shipping - discount).clamp_zero(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

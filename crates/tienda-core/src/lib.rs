//! # tienda-core: Pure Checkout Logic for the Tienda Storefront
//!
//! This crate is the **heart** of the storefront checkout. It contains all
//! pricing and checkout business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tienda Checkout Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront Frontend (TypeScript)                │   │
//! │  │    Cart page ──► Drawer ──► Checkout steps ──► Pay redirect    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tienda-checkout (session & orchestration)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ checkout  │  │   │
//! │  │   │ CartItem  │  │   Money   │  │  totals   │  │   flow    │  │   │
//! │  │   │ Department│  │  display  │  │ threshold │  │   gates   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tienda-api (REST backend client)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartItem, Department, PaymentProvider, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - The totals derivation every view reads
//! - [`checkout`] - The three-step checkout state machine
//! - [`coupon`] - Applied-coupon state and rejection kinds
//! - [`validation`] - Field validation and the field-keyed error map
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every derivation is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::money::Money;
//! use tienda_core::pricing::compute_totals;
//! use tienda_core::FREE_SHIPPING_THRESHOLD;
//!
//! // An empty cart below the threshold pays shipping
//! let totals = compute_totals(&[], Money::new(250), Money::zero(), FREE_SHIPPING_THRESHOLD);
//! assert!(!totals.is_free_shipping);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tienda_core::Money` instead of
// `use tienda_core::money::Money`

pub use checkout::{
    AddressDraft, CheckoutDraft, CheckoutFlow, CheckoutRequest, CheckoutState, CheckoutStep,
    PersonalData, SubmitError,
};
pub use coupon::{AppliedCoupon, CouponRejection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_totals, CartTotals};
pub use types::*;
pub use validation::FieldErrors;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotal at or above which shipping is waived.
///
/// ## Why a constant?
/// The threshold is a flat amount in the storefront currency and changes by
/// marketing decision, not per request. The session config can override it;
/// this is the storewide default.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::new(3000);

/// Static shipping cost used when rate resolution fails.
///
/// ## Why a constant?
/// Checkout must not block on the rate table being reachable; a stale
/// estimate beats a dead flow. The final rate is resolved again before
/// submission.
pub const DEFAULT_SHIPPING_COST: Money = Money::new(250);

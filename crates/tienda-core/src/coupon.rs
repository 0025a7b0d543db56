//! # Coupon Types
//!
//! The client never computes discount arithmetic: the backend is
//! authoritative for eligibility, percentage vs. fixed amounts and caps.
//! This module only models what the backend answered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Applied Coupon
// =============================================================================

/// A coupon the backend accepted, bound to one subtotal snapshot.
///
/// Either no coupon is applied (no value at all) or exactly one is; applying
/// a new coupon atomically replaces the previous one, and removal is a pure
/// local reset that never calls the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    /// The validated code, as the backend normalized it.
    pub code: String,

    /// Discount granted by the backend (≥ 0; zero is legal).
    pub discount: Money,

    /// The subtotal the validation was answered against.
    pub subtotal_snapshot: Money,

    /// When the coupon was applied in this session.
    #[ts(as = "String")]
    pub applied_at: DateTime<Utc>,
}

// =============================================================================
// Rejection Kinds
// =============================================================================

/// Why the backend (or the transport) rejected a coupon.
///
/// A closed set of kinds, never raw backend strings: each kind carries its
/// own distinct user-facing message via `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponRejection {
    /// No coupon exists under that code.
    #[error("We couldn't find a coupon with that code")]
    NotFound,

    /// The coupon exists but its validity window is over.
    #[error("That coupon has expired")]
    Expired,

    /// The order subtotal is below the coupon's minimum purchase.
    #[error("Your order doesn't reach the minimum purchase for that coupon")]
    MinimumNotMet,

    /// The coupon's global usage limit has been exhausted.
    #[error("That coupon has reached its usage limit")]
    UsageLimitReached,

    /// This account already redeemed the coupon.
    #[error("You already used that coupon")]
    AlreadyUsed,

    /// Anything else: malformed response, transport failure, unknown code.
    #[error("We couldn't validate the coupon, please try again")]
    GenericError,
}

impl CouponRejection {
    /// Maps a backend rejection code to its kind.
    ///
    /// Unknown codes return `None`; callers fall back to
    /// [`CouponRejection::GenericError`].
    pub fn from_code(code: &str) -> Option<CouponRejection> {
        match code {
            "NOT_FOUND" => Some(CouponRejection::NotFound),
            "EXPIRED" => Some(CouponRejection::Expired),
            "MINIMUM_NOT_MET" => Some(CouponRejection::MinimumNotMet),
            "USAGE_LIMIT_REACHED" => Some(CouponRejection::UsageLimitReached),
            "ALREADY_USED" => Some(CouponRejection::AlreadyUsed),
            "GENERIC_ERROR" => Some(CouponRejection::GenericError),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Coupon State
//!
//! Holds the applied coupon (at most one) and runs backend validation.
//!
//! The backend is authoritative: no discount arithmetic happens here, only
//! bookkeeping of what it answered. Applying replaces atomically; removing
//! is a pure local reset.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use tienda_api::types::CouponValidationRequest;
use tienda_api::{ApiError, StoreApi};
use tienda_core::coupon::{AppliedCoupon, CouponRejection};
use tienda_core::error::ValidationError;
use tienda_core::money::Money;
use tienda_core::validation::validate_coupon_code;

/// Why a coupon did not end up applied.
#[derive(Debug, Error)]
pub enum CouponError {
    /// Local input problem (empty/oversized code); no network round-trip
    /// was made.
    #[error(transparent)]
    Invalid(ValidationError),

    /// The backend (or the transport) said no; a typed kind with its own
    /// user-facing message.
    #[error(transparent)]
    Rejected(CouponRejection),
}

/// The session's coupon slot.
pub struct CouponState {
    api: Arc<dyn StoreApi>,
    applied: Mutex<Option<AppliedCoupon>>,
}

impl CouponState {
    pub fn new(api: Arc<dyn StoreApi>) -> Self {
        CouponState {
            api,
            applied: Mutex::new(None),
        }
    }

    /// Validates a code against the given subtotal and applies the result.
    ///
    /// The code is trimmed first; empty input is rejected locally. On
    /// success the new coupon atomically replaces any previous one; there
    /// is no intermediate state where both discounts exist.
    pub async fn apply(&self, code: &str, subtotal: Money) -> Result<AppliedCoupon, CouponError> {
        let code = validate_coupon_code(code).map_err(CouponError::Invalid)?;

        match self
            .api
            .validate_coupon(&CouponValidationRequest {
                code,
                subtotal,
            })
            .await
        {
            Ok(grant) => {
                let coupon = AppliedCoupon {
                    code: grant.code,
                    discount: grant.discount,
                    subtotal_snapshot: subtotal,
                    applied_at: Utc::now(),
                };

                let mut applied = self.applied.lock().expect("coupon mutex poisoned");
                *applied = Some(coupon.clone());
                info!(code = %coupon.code, discount = %coupon.discount, "coupon applied");
                Ok(coupon)
            }
            Err(err) => {
                let rejection = rejection_for(&err);
                debug!(error = %err, ?rejection, "coupon rejected");
                Err(CouponError::Rejected(rejection))
            }
        }
    }

    /// Removes the applied coupon.
    ///
    /// Pure local state reset: always succeeds, never calls the backend.
    pub fn remove(&self) {
        let mut applied = self.applied.lock().expect("coupon mutex poisoned");
        if applied.take().is_some() {
            info!("coupon removed");
        }
    }

    /// The currently applied coupon, if any.
    pub fn applied(&self) -> Option<AppliedCoupon> {
        self.applied.lock().expect("coupon mutex poisoned").clone()
    }

    /// The discount entering the totals (zero when no coupon is applied).
    pub fn discount(&self) -> Money {
        self.applied().map(|c| c.discount).unwrap_or_default()
    }
}

/// Maps a backend error to its typed rejection kind.
///
/// Unknown codes, transport failures and malformed responses all collapse
/// to [`CouponRejection::GenericError`].
fn rejection_for(err: &ApiError) -> CouponRejection {
    if let Some(kind) = err.code().and_then(CouponRejection::from_code) {
        return kind;
    }
    if err.is_not_found() {
        return CouponRejection::NotFound;
    }
    CouponRejection::GenericError
}

// =============================================================================
// Unit Tests
// =============================================================================

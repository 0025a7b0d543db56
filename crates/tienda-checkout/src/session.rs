//! # Checkout Session
//!
//! The façade the storefront shell drives: one `CheckoutSession` owns the
//! flow state machine, the cart cache, the shipping and coupon state, and
//! the submission pipeline. Tests instantiate isolated sessions with a mock
//! backend; nothing here is process-global.
//!
//! ## Submission Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit()                                                               │
//! │    1. cart must be non-empty (callers shouldn't even offer checkout)    │
//! │    2. fetch FRESH payment-method enablement (a method disabled since    │
//! │       it was selected must fail validation now)                         │
//! │    3. flow.begin_submit() - full-form gate + re-entrancy guard          │
//! │    4. re-resolve shipping for the committed department and log the      │
//! │       final totals (the cost shown at submission is never stale)        │
//! │    5. orchestrator pipeline → Navigator hard-redirect → Completed       │
//! │       └─ on failure: flow returns to the payment step with a message    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use tienda_api::StoreApi;
use tienda_core::checkout::CheckoutFlow;
use tienda_core::coupon::{AppliedCoupon, CouponRejection};
use tienda_core::error::CoreError;
use tienda_core::money::Money;
use tienda_core::pricing::{compute_totals, CartTotals};
use tienda_core::types::{Department, UserProfile};

use crate::error::CheckoutError;
use crate::orchestrator::{Navigator, OrderOrchestrator, SubmittedOrder};
use crate::state::cart::CartService;
use crate::state::coupon::{CouponError, CouponState};
use crate::state::shipping::ShippingResolver;
use crate::state::StoreConfig;

/// One user's checkout, from first step to redirect.
pub struct CheckoutSession {
    id: Uuid,
    api: Arc<dyn StoreApi>,
    config: StoreConfig,
    flow: CheckoutFlow,
    cart: CartService,
    shipping: ShippingResolver,
    coupon: CouponState,
    orchestrator: OrderOrchestrator,
}

impl CheckoutSession {
    /// Starts an empty session.
    pub fn new(api: Arc<dyn StoreApi>, config: StoreConfig) -> Self {
        Self::build(api, config, CheckoutFlow::new())
    }

    /// Starts a session pre-filled from the authenticated user's profile.
    pub fn with_profile(api: Arc<dyn StoreApi>, config: StoreConfig, profile: &UserProfile) -> Self {
        Self::build(api, config, CheckoutFlow::with_profile(profile))
    }

    fn build(api: Arc<dyn StoreApi>, config: StoreConfig, flow: CheckoutFlow) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, store = %config.store_name, "checkout session started");

        CheckoutSession {
            id,
            cart: CartService::new(api.clone()),
            shipping: ShippingResolver::new(api.clone(), config.default_shipping_cost),
            coupon: CouponState::new(api.clone()),
            orchestrator: OrderOrchestrator::new(api.clone(), config.environment),
            api,
            config,
            flow,
        }
    }

    // ---- accessors ----------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    /// Mutable access to the state machine (field setters, step moves).
    pub fn flow_mut(&mut self) -> &mut CheckoutFlow {
        &mut self.flow
    }

    pub fn cart(&self) -> &CartService {
        &self.cart
    }

    pub fn shipping(&self) -> &ShippingResolver {
        &self.shipping
    }

    pub fn coupon(&self) -> &CouponState {
        &self.coupon
    }

    // ---- pricing ------------------------------------------------------------

    /// Recomputes the displayed totals from current cart + shipping +
    /// coupon state. Safe to call on every render.
    pub async fn totals(&self) -> Result<CartTotals, CheckoutError> {
        let cart = self.cart.cart().await?;
        Ok(compute_totals(
            &cart.items,
            self.shipping.effective_cost(),
            self.coupon.discount(),
            self.config.free_shipping_threshold,
        ))
    }

    // ---- side-channels ------------------------------------------------------

    /// Commits a department on step 2 and, when it actually changed,
    /// resolves its shipping rate.
    ///
    /// The resolution is a refinement, not a gate: the address step may be
    /// validated and advanced while a lookup is still in flight, because
    /// the final rate is resolved again inside [`Self::submit`].
    pub async fn commit_department(&mut self, department: Department) -> Option<Money> {
        if !self.flow.set_department(department) {
            return None;
        }
        Some(self.shipping.department_changed(department).await)
    }

    /// Validates a coupon against the current subtotal and applies it.
    pub async fn apply_coupon(&self, code: &str) -> Result<AppliedCoupon, CouponError> {
        let subtotal = match self.cart.cart().await {
            Ok(cart) => cart.subtotal(),
            Err(err) => {
                debug!(session = %self.id, error = %err, "cart fetch failed during coupon validation");
                return Err(CouponError::Rejected(CouponRejection::GenericError));
            }
        };
        self.coupon.apply(code, subtotal).await
    }

    /// Removes the applied coupon (local-only, always succeeds).
    pub fn remove_coupon(&self) {
        self.coupon.remove();
    }

    // ---- submission ---------------------------------------------------------

    /// The terminal action: validate, orchestrate, redirect.
    ///
    /// On failure the flow lands back on the payment step carrying
    /// [`CheckoutError::user_message`]; the caller may let the user retry,
    /// which creates fresh backend records.
    pub async fn submit(&mut self, navigator: &dyn Navigator) -> Result<SubmittedOrder, CheckoutError> {
        let cart = self.cart.cart().await?;
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        // fresh enablement snapshot: selections can go stale server-side
        let settings = self.api.store_settings().await?;
        let enabled = settings.enabled_methods();

        let request = self.flow.begin_submit(&enabled)?;

        // final shipping refinement before the totals are shown/logged
        let shipping_cost = self.shipping.department_changed(request.department).await;
        let totals = compute_totals(
            &cart.items,
            shipping_cost,
            self.coupon.discount(),
            self.config.free_shipping_threshold,
        );
        info!(
            session = %self.id,
            subtotal = %totals.subtotal,
            shipping = %totals.effective_shipping(),
            discount = %totals.discount,
            total = %totals.total,
            "submitting order"
        );

        match self.orchestrator.submit(&request).await {
            Ok(submitted) => {
                navigator.navigate(&submitted.redirect_url);
                self.flow.complete();
                info!(session = %self.id, order_id = %submitted.order_id, "redirect initiated");
                Ok(submitted)
            }
            Err(err) => {
                let message = err.user_message();
                warn!(session = %self.id, error = %err, "order submission failed");
                self.flow.fail(message);
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

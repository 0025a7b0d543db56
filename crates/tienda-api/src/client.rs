//! # Store API Client
//!
//! The [`StoreApi`] trait is the seam between the checkout session and the
//! network: the session layer holds an `Arc<dyn StoreApi>`, production wires
//! in [`StoreClient`], and tests wire in hand-rolled mocks with call
//! counters.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_cart              GET    api/cart                                │
//! │  update_cart_item        PUT    api/cart/items/{id}                     │
//! │  remove_cart_item        DELETE api/cart/items/{id}                     │
//! │  clear_cart              DELETE api/cart                                │
//! │  validate_coupon         POST   api/coupons/validate                    │
//! │  shipping_cost           GET    api/shipping/cost?department=...        │
//! │  store_settings          GET    api/settings/payment-methods            │
//! │  create_address          POST   api/addresses                           │
//! │  create_order            POST   api/orders                              │
//! │  create_payment_session  POST   api/payments                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use tracing::debug;

use tienda_core::money::Money;
use tienda_core::types::{Department, StoreSettings};

use crate::error::ApiResult;
use crate::http::{ClientConfig, HttpClient};
use crate::types::{
    CartPayload, CouponGrant, CouponValidationRequest, CreateAddressRequest, CreateOrderRequest,
    CreatePaymentRequest, CreatedResponse, PaymentSessionResponse, ShippingCostResponse,
    UpdateQuantityRequest,
};

// =============================================================================
// The Seam
// =============================================================================

/// Everything the checkout core needs from the store backend.
///
/// One method per endpoint, no business logic: eligibility, stock truth and
/// discount arithmetic all live server-side.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetches the current cart (a full resynchronization).
    async fn fetch_cart(&self) -> ApiResult<CartPayload>;

    /// Sets one line's quantity.
    async fn update_cart_item(&self, item_id: &str, quantity: i64) -> ApiResult<()>;

    /// Removes one line.
    async fn remove_cart_item(&self, item_id: &str) -> ApiResult<()>;

    /// Removes every line.
    async fn clear_cart(&self) -> ApiResult<()>;

    /// Asks the backend whether a coupon applies to the given subtotal.
    async fn validate_coupon(&self, request: &CouponValidationRequest) -> ApiResult<CouponGrant>;

    /// Looks up the shipping rate for a destination department.
    async fn shipping_cost(&self, department: Department) -> ApiResult<Money>;

    /// Fetches which payment methods are currently enabled.
    async fn store_settings(&self) -> ApiResult<StoreSettings>;

    /// Persists a shipping address; returns its id.
    async fn create_address(&self, request: &CreateAddressRequest) -> ApiResult<String>;

    /// Creates an order for a persisted address; returns the order id.
    async fn create_order(&self, request: &CreateOrderRequest) -> ApiResult<String>;

    /// Creates a payment-provider session for an order.
    async fn create_payment_session(
        &self,
        request: &CreatePaymentRequest,
    ) -> ApiResult<PaymentSessionResponse>;
}

// =============================================================================
// Production Implementation
// =============================================================================

/// The real backend client.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: HttpClient,
}

impl StoreClient {
    /// Creates a client from configuration.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Ok(StoreClient {
            http: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl StoreApi for StoreClient {
    async fn fetch_cart(&self) -> ApiResult<CartPayload> {
        self.http.get("api/cart").await
    }

    async fn update_cart_item(&self, item_id: &str, quantity: i64) -> ApiResult<()> {
        self.http
            .put_unit(
                &format!("api/cart/items/{}", item_id),
                &UpdateQuantityRequest { quantity },
            )
            .await
    }

    async fn remove_cart_item(&self, item_id: &str) -> ApiResult<()> {
        self.http
            .delete_unit(&format!("api/cart/items/{}", item_id))
            .await
    }

    async fn clear_cart(&self) -> ApiResult<()> {
        self.http.delete_unit("api/cart").await
    }

    async fn validate_coupon(&self, request: &CouponValidationRequest) -> ApiResult<CouponGrant> {
        debug!(code = %request.code, "validating coupon");
        self.http.post("api/coupons/validate", request).await
    }

    async fn shipping_cost(&self, department: Department) -> ApiResult<Money> {
        let response: ShippingCostResponse = self
            .http
            .get_with_query("api/shipping/cost", &[("department", department.as_str())])
            .await?;
        Ok(response.cost)
    }

    async fn store_settings(&self) -> ApiResult<StoreSettings> {
        self.http.get("api/settings/payment-methods").await
    }

    async fn create_address(&self, request: &CreateAddressRequest) -> ApiResult<String> {
        let response: CreatedResponse = self.http.post("api/addresses", request).await?;
        Ok(response.id)
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> ApiResult<String> {
        let response: CreatedResponse = self.http.post("api/orders", request).await?;
        Ok(response.id)
    }

    async fn create_payment_session(
        &self,
        request: &CreatePaymentRequest,
    ) -> ApiResult<PaymentSessionResponse> {
        self.http.post("api/payments", request).await
    }
}

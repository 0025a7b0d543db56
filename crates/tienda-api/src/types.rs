//! # Wire DTOs
//!
//! Request and response shapes for the store backend's REST endpoints.
//!
//! ## Contract Notes
//! - JSON field names are camelCase on both directions.
//! - The only bit-exact contract is the payment provider identifier
//!   (`"MERCADOPAGO"`, `"DLOCAL_GO"`, `"SIMULATION"`), serialized by
//!   [`PaymentProvider`] itself.
//! - The cart payload carries backend-computed aggregates; the client
//!   re-derives them (see [`CartPayload::into_cart`]) so that one pricing
//!   engine owns every displayed number.

use serde::{Deserialize, Serialize};

use tienda_core::money::Money;
use tienda_core::types::{Cart, CartItem, Department, Environment, PaymentProvider};

// =============================================================================
// Cart
// =============================================================================

/// `GET api/cart` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    pub items: Vec<CartItem>,

    /// Backend-computed aggregate; informational only.
    #[serde(default)]
    pub subtotal: Money,

    /// Backend-computed aggregate; informational only.
    #[serde(default)]
    pub item_count: i64,
}

impl CartPayload {
    /// Converts the payload into the client cart snapshot.
    ///
    /// The baked-in aggregates are dropped: subtotal and item count are
    /// always re-derived client-side so the cart page, the drawer and the
    /// checkout summary can never disagree.
    pub fn into_cart(self) -> Cart {
        Cart { items: self.items }
    }
}

/// `PUT api/cart/items/{id}` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

// =============================================================================
// Coupons
// =============================================================================

/// `POST api/coupons/validate` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidationRequest {
    pub code: String,
    pub subtotal: Money,
}

/// Successful coupon validation answer.
///
/// The discount is whatever the backend decided; percentage vs. fixed,
/// caps and minimums are all resolved server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponGrant {
    pub code: String,
    pub discount: Money,
}

// =============================================================================
// Shipping
// =============================================================================

/// `GET api/shipping/cost` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingCostResponse {
    pub cost: Money,
}

// =============================================================================
// Orders & Payment
// =============================================================================

/// `POST api/addresses` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub recipient_name: String,
    pub phone: Option<String>,
    pub street: String,
    pub number: String,
    pub apartment: Option<String>,
    pub city: String,
    pub department: Department,
    pub postal_code: String,
    pub note: Option<String>,
}

/// `POST api/orders` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub address_id: String,
    pub provider: PaymentProvider,
}

/// `POST api/payments` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub order_id: String,
    pub provider: PaymentProvider,
}

/// Generic created-resource response (addresses, orders).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub id: String,
}

/// Payment session creation response.
///
/// Field availability is provider-specific: MercadoPago-shaped providers
/// answer `initPoint`/`sandboxInitPoint`, others answer a single
/// `redirectUrl`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSessionResponse {
    #[serde(default)]
    pub init_point: Option<String>,

    #[serde(default)]
    pub sandbox_init_point: Option<String>,

    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl PaymentSessionResponse {
    /// Picks the URL the browser must be hard-navigated to.
    ///
    /// Outside production the sandbox URL takes priority when present;
    /// in production it is never used.
    pub fn redirect_url_for(&self, environment: Environment) -> Option<&str> {
        if !environment.is_production() {
            if let Some(url) = self.sandbox_init_point.as_deref() {
                return Some(url);
            }
        }
        self.init_point
            .as_deref()
            .or(self.redirect_url.as_deref())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// The backend's error payload shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Test support: a configurable in-memory `StoreApi` with call counters.
//!
//! Every async test in this crate drives the real session code against this
//! mock; the atomic counters back the call-count assertions (e.g. "address
//! creation failed → order creation never attempted").

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use tienda_api::error::{ApiError, ApiResult};
use tienda_api::types::{
    CartPayload, CouponGrant, CouponValidationRequest, CreateAddressRequest, CreateOrderRequest,
    CreatePaymentRequest, PaymentSessionResponse,
};
use tienda_api::StoreApi;
use tienda_core::money::Money;
use tienda_core::types::{CartItem, Department, StoreSettings};

use crate::orchestrator::Navigator;

/// Builds a cart line for tests.
pub(crate) fn cart_item(id: &str, price: i64, quantity: i64, stock: i64) -> CartItem {
    CartItem {
        item_id: id.to_string(),
        product_id: format!("prod-{}", id),
        variant_id: None,
        name: format!("Item {}", id),
        slug: format!("item-{}", id),
        unit_price: Money::new(price),
        compare_at_price: None,
        quantity,
        stock,
        image_url: None,
    }
}

fn backend_error(status: u16, code: Option<&str>, message: Option<&str>) -> ApiError {
    ApiError::Backend {
        status,
        code: code.map(String::from),
        message: message.map(String::from),
    }
}

/// In-memory backend double. Configure the public fields, wrap in an `Arc`,
/// then assert on the counters.
pub(crate) struct MockApi {
    pub items: Mutex<Vec<CartItem>>,
    pub settings: StoreSettings,
    pub shipping_rates: HashMap<Department, Money>,
    pub fail_shipping: bool,
    /// Park this department's rate lookup until the `Notify` fires, to
    /// simulate a slow in-flight request being superseded.
    pub hold_shipping: Option<(Department, Arc<Notify>)>,
    pub coupons: HashMap<String, Money>,
    /// Rejection code answered for unknown coupon codes (404 NOT_FOUND
    /// when unset).
    pub coupon_rejection: Option<String>,
    pub fail_address: bool,
    pub fail_order: bool,
    pub fail_payment: bool,
    /// Error payload message attached to forced order failures.
    pub order_error_message: Option<String>,
    pub payment_session: PaymentSessionResponse,

    pub fetch_cart_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
    pub coupon_calls: AtomicUsize,
    pub shipping_calls: AtomicUsize,
    pub settings_calls: AtomicUsize,
    pub address_calls: AtomicUsize,
    pub order_calls: AtomicUsize,
    pub payment_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            items: Mutex::new(Vec::new()),
            settings: StoreSettings {
                mercadopago_enabled: true,
                dlocal_enabled: true,
                simulation_enabled: true,
            },
            shipping_rates: HashMap::new(),
            fail_shipping: false,
            hold_shipping: None,
            coupons: HashMap::new(),
            coupon_rejection: None,
            fail_address: false,
            fail_order: false,
            fail_payment: false,
            order_error_message: None,
            payment_session: PaymentSessionResponse {
                init_point: None,
                sandbox_init_point: None,
                redirect_url: Some("https://pay.example/session".to_string()),
            },
            fetch_cart_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
            coupon_calls: AtomicUsize::new(0),
            shipping_calls: AtomicUsize::new(0),
            settings_calls: AtomicUsize::new(0),
            address_calls: AtomicUsize::new(0),
            order_calls: AtomicUsize::new(0),
            payment_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_items(items: Vec<CartItem>) -> Self {
        let mock = MockApi::new();
        *mock.items.lock().expect("items mutex poisoned") = items;
        mock
    }

    fn snapshot(&self) -> Vec<CartItem> {
        self.items.lock().expect("items mutex poisoned").clone()
    }
}

#[async_trait]
impl StoreApi for MockApi {
    async fn fetch_cart(&self) -> ApiResult<CartPayload> {
        self.fetch_cart_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.snapshot();
        Ok(CartPayload {
            subtotal: items.iter().fold(Money::zero(), |acc, i| acc + i.line_total()),
            item_count: items.iter().map(|i| i.quantity).sum(),
            items,
        })
    }

    async fn update_cart_item(&self, item_id: &str, quantity: i64) -> ApiResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.lock().expect("items mutex poisoned");
        match items.iter_mut().find(|i| i.item_id == item_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(backend_error(404, None, Some("Item not found"))),
        }
    }

    async fn remove_cart_item(&self, item_id: &str) -> ApiResult<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.lock().expect("items mutex poisoned");
        items.retain(|i| i.item_id != item_id);
        Ok(())
    }

    async fn clear_cart(&self) -> ApiResult<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.items.lock().expect("items mutex poisoned").clear();
        Ok(())
    }

    async fn validate_coupon(&self, request: &CouponValidationRequest) -> ApiResult<CouponGrant> {
        self.coupon_calls.fetch_add(1, Ordering::SeqCst);
        match self.coupons.get(&request.code) {
            Some(discount) => Ok(CouponGrant {
                code: request.code.clone(),
                discount: *discount,
            }),
            None => match &self.coupon_rejection {
                Some(code) => Err(backend_error(422, Some(code), None)),
                None => Err(backend_error(404, Some("NOT_FOUND"), None)),
            },
        }
    }

    async fn shipping_cost(&self, department: Department) -> ApiResult<Money> {
        self.shipping_calls.fetch_add(1, Ordering::SeqCst);

        if let Some((held, gate)) = &self.hold_shipping {
            if *held == department {
                gate.notified().await;
            }
        }

        if self.fail_shipping {
            return Err(backend_error(500, None, None));
        }

        self.shipping_rates
            .get(&department)
            .copied()
            .ok_or_else(|| backend_error(422, Some("UNKNOWN_DEPARTMENT"), None))
    }

    async fn store_settings(&self) -> ApiResult<StoreSettings> {
        self.settings_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.settings)
    }

    async fn create_address(&self, _request: &CreateAddressRequest) -> ApiResult<String> {
        let n = self.address_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_address {
            return Err(backend_error(500, None, None));
        }
        Ok(format!("addr-{}", n))
    }

    async fn create_order(&self, _request: &CreateOrderRequest) -> ApiResult<String> {
        let n = self.order_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_order {
            return Err(backend_error(
                500,
                None,
                self.order_error_message.as_deref(),
            ));
        }
        Ok(format!("order-{}", n))
    }

    async fn create_payment_session(
        &self,
        _request: &CreatePaymentRequest,
    ) -> ApiResult<PaymentSessionResponse> {
        self.payment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_payment {
            return Err(backend_error(500, None, None));
        }
        Ok(self.payment_session.clone())
    }
}

/// Navigator that records hard navigations instead of performing them.
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub urls: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        RecordingNavigator::default()
    }

    pub fn last(&self) -> Option<String> {
        self.urls.lock().expect("urls mutex poisoned").last().cloned()
    }

    pub fn count(&self) -> usize {
        self.urls.lock().expect("urls mutex poisoned").len()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.urls
            .lock()
            .expect("urls mutex poisoned")
            .push(url.to_string());
    }
}

//! # Order/Payment Orchestrator
//!
//! The one write path of the checkout: three strictly ordered backend
//! calls, then a hard browser navigation out of the application.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Submission Pipeline                           │
//! │                                                                         │
//! │  CheckoutRequest (validated snapshot)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. POST api/addresses ──► address id        ── fail? abort, nothing    │
//! │       │                                         was created            │
//! │       ▼                                                                 │
//! │  2. POST api/orders ─────► order id          ── fail? abort, address    │
//! │       │                                         stays (orphaned, warn!) │
//! │       ▼                                                                 │
//! │  3. POST api/payments ───► redirect URLs     ── fail? abort, address +  │
//! │       │                                         order stay (warn!)      │
//! │       ▼                                                                 │
//! │  4. Navigator::navigate(url)  - control leaves the application; the     │
//! │     provider's return URL / webhook resumes it elsewhere.               │
//! │                                                                         │
//! │  Steps never overlap: 2 waits for 1's id, 3 waits for 2's id.           │
//! │  There is NO rollback: a retry creates a fresh address and order.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use tienda_api::types::{CreateAddressRequest, CreateOrderRequest, CreatePaymentRequest};
use tienda_api::StoreApi;
use tienda_core::checkout::CheckoutRequest;
use tienda_core::types::Environment;

use crate::error::CheckoutError;

// =============================================================================
// Navigator Seam
// =============================================================================

/// Performs the hard browser navigation to the payment provider.
///
/// Not an in-app route change: after this fires, control has left the
/// application entirely. The storefront shell provides the real
/// implementation; tests record instead of navigating.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

// =============================================================================
// Result
// =============================================================================

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedOrder {
    pub address_id: String,
    pub order_id: String,
    pub redirect_url: String,
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Sequences address → order → payment-session creation.
pub struct OrderOrchestrator {
    api: Arc<dyn StoreApi>,
    environment: Environment,
}

impl OrderOrchestrator {
    pub fn new(api: Arc<dyn StoreApi>, environment: Environment) -> Self {
        OrderOrchestrator { api, environment }
    }

    /// Runs the pipeline. Any failure aborts the remaining steps.
    ///
    /// Already-created records are NOT rolled back; they remain as valid,
    /// orphaned rows tied to the user, and a later retry creates fresh
    /// ones. Each partial failure logs the orphan so the gap is
    /// observable.
    pub async fn submit(&self, request: &CheckoutRequest) -> Result<SubmittedOrder, CheckoutError> {
        debug!(provider = %request.provider, department = %request.department, "starting order submission");

        // 1. persist the shipping address
        let address_id = self.api.create_address(&address_request(request)).await?;
        debug!(%address_id, "address created");

        // 2. create the order against that address
        let order_id = self
            .api
            .create_order(&CreateOrderRequest {
                address_id: address_id.clone(),
                provider: request.provider,
            })
            .await
            .map_err(|err| {
                warn!(%address_id, "order creation failed; address remains orphaned");
                err
            })?;
        debug!(%order_id, "order created");

        // 3. open the payment session
        let session = self
            .api
            .create_payment_session(&CreatePaymentRequest {
                order_id: order_id.clone(),
                provider: request.provider,
            })
            .await
            .map_err(|err| {
                warn!(%address_id, %order_id, "payment session failed; order remains orphaned");
                err
            })?;

        let redirect_url = session
            .redirect_url_for(self.environment)
            .ok_or(CheckoutError::MissingRedirectUrl)?
            .to_string();

        info!(%order_id, provider = %request.provider, "order submitted, redirecting to payment");

        Ok(SubmittedOrder {
            address_id,
            order_id,
            redirect_url,
        })
    }
}

/// Builds the address payload from the validated checkout snapshot.
///
/// The recipient's full name and phone travel with the address, which is
/// what couriers print.
fn address_request(request: &CheckoutRequest) -> CreateAddressRequest {
    CreateAddressRequest {
        recipient_name: request.recipient_name.clone(),
        phone: Some(request.phone.clone()),
        street: request.street.clone(),
        number: request.number.clone(),
        apartment: request.apartment.clone(),
        city: request.city.clone(),
        department: request.department,
        postal_code: request.postal_code.clone(),
        note: request.note.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::MockApi;
    use tienda_api::types::PaymentSessionResponse;
    use tienda_core::types::{Department, PaymentMethod, PaymentProvider};

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            recipient_name: "Ana Pérez".to_string(),
            email: "ana@example.com".to_string(),
            phone: "099123456".to_string(),
            street: "Av. 18 de Julio".to_string(),
            number: "1234".to_string(),
            apartment: None,
            city: "Montevideo".to_string(),
            department: Department::Montevideo,
            postal_code: "11200".to_string(),
            note: None,
            method: PaymentMethod::MercadoPago,
            provider: PaymentProvider::MercadoPago,
        }
    }

    fn orchestrator_with(
        mock: MockApi,
        environment: Environment,
    ) -> (Arc<MockApi>, OrderOrchestrator) {
        let api = Arc::new(mock);
        let orchestrator = OrderOrchestrator::new(api.clone(), environment);
        (api, orchestrator)
    }

    #[tokio::test]
    async fn test_happy_path_runs_each_step_once_in_order() {
        let (api, orchestrator) = orchestrator_with(MockApi::new(), Environment::Sandbox);

        let submitted = orchestrator.submit(&request()).await.unwrap();
        assert_eq!(submitted.address_id, "addr-1");
        assert_eq!(submitted.order_id, "order-1");
        assert_eq!(submitted.redirect_url, "https://pay.example/session");

        assert_eq!(api.address_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.order_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.payment_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_address_failure_short_circuits_everything() {
        let mut mock = MockApi::new();
        mock.fail_address = true;
        let (api, orchestrator) = orchestrator_with(mock, Environment::Sandbox);

        assert!(orchestrator.submit(&request()).await.is_err());

        assert_eq!(api.address_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.order_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.payment_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_order_failure_skips_payment() {
        let mut mock = MockApi::new();
        mock.fail_order = true;
        let (api, orchestrator) = orchestrator_with(mock, Environment::Sandbox);

        assert!(orchestrator.submit(&request()).await.is_err());

        assert_eq!(api.address_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.order_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.payment_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_retry_after_failure_creates_fresh_records() {
        let mut mock = MockApi::new();
        mock.fail_order = true;
        let (api, orchestrator) = orchestrator_with(mock, Environment::Sandbox);

        assert!(orchestrator.submit(&request()).await.is_err());
        assert!(orchestrator.submit(&request()).await.is_err());

        // no reuse of the first orphaned address
        assert_eq!(api.address_calls.load(Ordering::SeqCst), 2);
        assert_eq!(api.order_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sandbox_url_preferred_when_not_production() {
        let mut mock = MockApi::new();
        mock.payment_session = PaymentSessionResponse {
            init_point: Some("https://mp.example/prod".to_string()),
            sandbox_init_point: Some("https://mp.example/sandbox".to_string()),
            redirect_url: None,
        };
        let (_, orchestrator) = orchestrator_with(mock, Environment::Sandbox);

        let submitted = orchestrator.submit(&request()).await.unwrap();
        assert_eq!(submitted.redirect_url, "https://mp.example/sandbox");
    }

    #[tokio::test]
    async fn test_production_ignores_sandbox_url() {
        let mut mock = MockApi::new();
        mock.payment_session = PaymentSessionResponse {
            init_point: Some("https://mp.example/prod".to_string()),
            sandbox_init_point: Some("https://mp.example/sandbox".to_string()),
            redirect_url: None,
        };
        let (_, orchestrator) = orchestrator_with(mock, Environment::Production);

        let submitted = orchestrator.submit(&request()).await.unwrap();
        assert_eq!(submitted.redirect_url, "https://mp.example/prod");
    }

    #[tokio::test]
    async fn test_session_without_urls_is_an_error() {
        let mut mock = MockApi::new();
        mock.payment_session = PaymentSessionResponse::default();
        let (_, orchestrator) = orchestrator_with(mock, Environment::Sandbox);

        let err = orchestrator.submit(&request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::MissingRedirectUrl));
    }
}

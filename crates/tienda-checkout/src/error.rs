//! # Checkout Error Type
//!
//! Unified error type for the session layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Error Flow in the Checkout Session                      │
//! │                                                                         │
//! │  CoreError ──────┐                                                      │
//! │  (domain rules)  │                                                      │
//! │                  ├──► CheckoutError ──► user_message() ──► toast /      │
//! │  ApiError ───────┤        │                                form message │
//! │  (backend)       │        │                                             │
//! │                  │        └── backend payload message when available,   │
//! │  SubmitError ────┘            one generic line otherwise. Transport     │
//! │  (state machine)              noise is never shown to users.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Network errors never crash the state machine: the session maps every
//! orchestration failure back to the payment step with a message.

use thiserror::Error;

use tienda_api::ApiError;
use tienda_core::checkout::SubmitError;
use tienda_core::error::CoreError;

/// The single message shown when the backend gave us nothing usable.
pub const GENERIC_ORDER_ERROR: &str = "We couldn't process your order. Please try again.";

/// Errors surfaced by the checkout session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A backend round-trip failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A domain rule was violated (stock, empty cart, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The state machine refused to enter `Submitting`.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The payment session answered without any redirect URL.
    #[error("payment session returned no redirect url")]
    MissingRedirectUrl,
}

impl CheckoutError {
    /// The line the storefront shows for this failure.
    ///
    /// Backend payload messages win when present; everything else collapses
    /// to one generic, retryable message. Domain errors speak for
    /// themselves.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Api(err) => err
                .backend_message()
                .unwrap_or(GENERIC_ORDER_ERROR)
                .to_string(),
            CheckoutError::Core(err) => err.to_string(),
            CheckoutError::Submit(err) => err.to_string(),
            CheckoutError::MissingRedirectUrl => GENERIC_ORDER_ERROR.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_payload_message_wins() {
        let err = CheckoutError::Api(ApiError::Backend {
            status: 422,
            code: None,
            message: Some("Order limit reached for today".to_string()),
        });
        assert_eq!(err.user_message(), "Order limit reached for today");
    }

    #[test]
    fn test_payloadless_backend_error_is_generic() {
        let err = CheckoutError::Api(ApiError::Backend {
            status: 500,
            code: None,
            message: None,
        });
        assert_eq!(err.user_message(), GENERIC_ORDER_ERROR);
    }

    #[test]
    fn test_missing_redirect_is_generic() {
        assert_eq!(
            CheckoutError::MissingRedirectUrl.user_message(),
            GENERIC_ORDER_ERROR
        );
    }

    #[test]
    fn test_core_errors_speak_for_themselves() {
        let err = CheckoutError::Core(CoreError::EmptyCart);
        assert_eq!(err.user_message(), "Cart is empty");
    }
}

//! # tienda-api: REST Backend Client for the Tienda Storefront
//!
//! This crate owns every network round-trip the checkout makes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda Data Flow                                 │
//! │                                                                         │
//! │  Checkout session (tienda-checkout)                                    │
//! │       │                                                                 │
//! │       │  api.shipping_cost(Department::Canelones)                      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tienda-api (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   StoreApi    │    │  StoreClient  │    │  HttpClient  │  │   │
//! │  │   │  (trait seam) │◄───│  (endpoints)  │───►│  (reqwest)   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store REST backend (cart, coupons, shipping, orders, payments)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - The `StoreApi` trait and its reqwest-backed implementation
//! - [`http`] - Shared HTTP plumbing (base URL, bearer token, error payloads)
//! - [`types`] - Wire DTOs
//! - [`error`] - API error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tienda_api::{ClientConfig, StoreClient, StoreApi};
//!
//! let config = ClientConfig::new("https://api.tienda.example").with_token(token);
//! let client = StoreClient::new(&config)?;
//! let cart = client.fetch_cart().await?.into_cart();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod http;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{StoreApi, StoreClient};
pub use error::{ApiError, ApiResult};
pub use http::{ClientConfig, HttpClient};
pub use types::{
    CartPayload, CouponGrant, CouponValidationRequest, CreateAddressRequest, CreateOrderRequest,
    CreatePaymentRequest, CreatedResponse, ErrorBody, PaymentSessionResponse,
    ShippingCostResponse, UpdateQuantityRequest,
};

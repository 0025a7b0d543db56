//! # Tienda Checkout Library
//!
//! The session and orchestration layer of the storefront checkout.
//! The embedding shell (web frontend bridge) drives a [`CheckoutSession`];
//! everything below it is the pure core plus the REST client.
//!
//! ## Module Organization
//! ```text
//! tienda_checkout/
//! ├── lib.rs            ◄─── You are here (tracing setup & exports)
//! ├── state/
//! │   ├── mod.rs        ◄─── State container exports
//! │   ├── cart.rs       ◄─── Cart cache + mutation service
//! │   ├── config.rs     ◄─── Store configuration
//! │   ├── coupon.rs     ◄─── Applied-coupon slot + validation
//! │   └── shipping.rs   ◄─── Rate cache + supersede logic
//! ├── session.rs        ◄─── CheckoutSession façade
//! ├── orchestrator.rs   ◄─── address → order → payment pipeline
//! └── error.rs          ◄─── CheckoutError + user messages
//! ```
//!
//! ## Concurrency Model
//! One logical submitter per session: the flow's `Submitting` flag is the
//! re-entrancy guard, and the three orchestration calls are an explicit
//! sequential pipeline (never a fan-out). In-flight requests are not
//! cancelled on navigation; the creates are idempotent-enough that
//! abandoning them is safe. Timeouts are the HTTP client's, nothing more.

pub mod error;
pub mod orchestrator;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub use error::{CheckoutError, GENERIC_ORDER_ERROR};
pub use orchestrator::{Navigator, OrderOrchestrator, SubmittedOrder};
pub use session::CheckoutSession;
pub use state::{CartService, CartStore, CouponError, CouponState, ShippingResolver, StoreConfig};

/// Initializes the tracing subscriber for structured logging.
///
/// Call once at shell startup, before the first session is created.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tienda=trace` - Show trace for tienda crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tienda=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

//! # State Module
//!
//! Injectable state containers for the checkout session.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Tests instantiate isolated instances with mock backends
//! 3. **Clearer Ownership**: The session composes exactly what it needs
//! 4. **No Ambient Globals**: Every container is passed by reference
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │  CartStore   │  │ ShippingResolver │  │ CouponState │ StoreConfig│  │
//! │  │              │  │                  │  │             │            │  │
//! │  │  cached cart │  │  rate cache +    │  │  applied    │  env-based │  │
//! │  │  snapshot,   │  │  supersede       │  │  coupon     │  read-only │  │
//! │  │  invalidated │  │  generation      │  │  slot       │  settings  │  │
//! │  │  on mutation │  │  counter         │  │             │            │  │
//! │  └──────────────┘  └──────────────────┘  └─────────────┴────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Mutex-protected for the embedding shell's thread model              │
//! │  • StoreConfig: read-only after initialization, no lock                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod config;
pub mod coupon;
pub mod shipping;

pub use cart::{CartService, CartStore};
pub use config::StoreConfig;
pub use coupon::{CouponError, CouponState};
pub use shipping::ShippingResolver;

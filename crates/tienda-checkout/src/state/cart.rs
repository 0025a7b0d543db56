//! # Cart State
//!
//! The client-side cache of the server-owned cart, plus the mutation
//! service around it.
//!
//! ## Cache Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Cache Lifecycle                                 │
//! │                                                                         │
//! │  Frontend Action           CartService               Cache              │
//! │  ───────────────           ───────────               ─────              │
//! │                                                                         │
//! │  Open cart page ─────────► cart() ──────────────────► hit? serve it     │
//! │                                                       miss? fetch+fill  │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ──┐                           │
//! │  Click remove ───────────► remove() ────────┼──────► invalidate, then   │
//! │  Click clear ────────────► clear() ─────────┘        full refetch       │
//! │                                                                         │
//! │  Every fetch is a FULL resynchronization: no optimistic merge of        │
//! │  concurrent edits from other tabs. The backend owns the cart.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity guards run locally *before* the round-trip: a stepper that is
//! already at the stock cap (or at 1) never generates network traffic.
//! Removal is always permitted regardless of stock.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use tienda_api::StoreApi;
use tienda_core::error::CoreError;
use tienda_core::types::Cart;
use tienda_core::validation::validate_cart_quantity;

use crate::error::CheckoutError;

/// A cached cart snapshot with its sync time.
#[derive(Debug, Clone)]
struct CachedCart {
    cart: Cart,
    fetched_at: DateTime<Utc>,
}

/// Injectable cache for the server-owned cart.
///
/// Tests instantiate isolated instances; nothing here is process-global.
#[derive(Debug, Default)]
pub struct CartStore {
    inner: Mutex<Option<CachedCart>>,
}

impl CartStore {
    /// Creates an empty (unsynced) store.
    pub fn new() -> Self {
        CartStore {
            inner: Mutex::new(None),
        }
    }

    /// Replaces the cache with a freshly fetched cart.
    pub fn set(&self, cart: Cart) {
        let mut inner = self.inner.lock().expect("cart cache mutex poisoned");
        *inner = Some(CachedCart {
            cart,
            fetched_at: Utc::now(),
        });
    }

    /// Drops the cache; the next read refetches.
    pub fn invalidate(&self) {
        let mut inner = self.inner.lock().expect("cart cache mutex poisoned");
        *inner = None;
    }

    /// The cached cart, if the store is synced.
    pub fn snapshot(&self) -> Option<Cart> {
        let inner = self.inner.lock().expect("cart cache mutex poisoned");
        inner.as_ref().map(|c| c.cart.clone())
    }

    /// When the cache was last synced, if ever.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        let inner = self.inner.lock().expect("cart cache mutex poisoned");
        inner.as_ref().map(|c| c.fetched_at)
    }
}

/// Cart operations: reads served from cache, writes through the backend.
pub struct CartService {
    api: Arc<dyn StoreApi>,
    store: CartStore,
}

impl CartService {
    pub fn new(api: Arc<dyn StoreApi>) -> Self {
        CartService {
            api,
            store: CartStore::new(),
        }
    }

    /// The underlying store (cache inspection, tests).
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Forces a full resynchronization from the backend.
    pub async fn refresh(&self) -> Result<Cart, CheckoutError> {
        debug!("refreshing cart from backend");
        let cart = self.api.fetch_cart().await?.into_cart();
        self.store.set(cart.clone());
        Ok(cart)
    }

    /// The current cart: cached when synced, otherwise fetched.
    pub async fn cart(&self) -> Result<Cart, CheckoutError> {
        match self.store.snapshot() {
            Some(cart) => Ok(cart),
            None => self.refresh().await,
        }
    }

    /// Sets one line's quantity.
    ///
    /// Local guards run first: below 1 or above stock never reaches the
    /// network. On success the cache is invalidated and refetched.
    pub async fn set_quantity(&self, item_id: &str, quantity: i64) -> Result<Cart, CheckoutError> {
        let cart = self.cart().await?;
        let item = cart
            .find_item(item_id)
            .ok_or_else(|| CoreError::ItemNotInCart(item_id.to_string()))?;
        validate_cart_quantity(item, quantity)?;

        self.api.update_cart_item(item_id, quantity).await?;
        info!(item_id, quantity, "cart line updated");

        self.store.invalidate();
        self.refresh().await
    }

    /// Steps one line's quantity up by one, capped at stock.
    pub async fn increment(&self, item_id: &str) -> Result<Cart, CheckoutError> {
        let cart = self.cart().await?;
        let item = cart
            .find_item(item_id)
            .ok_or_else(|| CoreError::ItemNotInCart(item_id.to_string()))?;
        self.set_quantity(item_id, item.quantity + 1).await
    }

    /// Steps one line's quantity down by one, floored at 1.
    pub async fn decrement(&self, item_id: &str) -> Result<Cart, CheckoutError> {
        let cart = self.cart().await?;
        let item = cart
            .find_item(item_id)
            .ok_or_else(|| CoreError::ItemNotInCart(item_id.to_string()))?;
        self.set_quantity(item_id, item.quantity - 1).await
    }

    /// Removes one line. Always permitted, stock is irrelevant here.
    pub async fn remove(&self, item_id: &str) -> Result<Cart, CheckoutError> {
        self.api.remove_cart_item(item_id).await?;
        info!(item_id, "cart line removed");

        self.store.invalidate();
        self.refresh().await
    }

    /// Removes every line.
    pub async fn clear(&self) -> Result<Cart, CheckoutError> {
        self.api.clear_cart().await?;
        info!("cart cleared");

        self.store.invalidate();
        self.refresh().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing::{cart_item, MockApi};
    use tienda_core::money::Money;

    fn service_with(items: Vec<tienda_core::types::CartItem>) -> (Arc<MockApi>, CartService) {
        let api = Arc::new(MockApi::with_items(items));
        let service = CartService::new(api.clone());
        (api, service)
    }

    #[tokio::test]
    async fn test_cart_is_cached_until_invalidated() {
        let (api, service) = service_with(vec![cart_item("a", 1000, 2, 5)]);

        let first = service.cart().await.unwrap();
        let second = service.cart().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(api.fetch_cart_calls.load(Ordering::SeqCst), 1);

        service.store().invalidate();
        service.cart().await.unwrap();
        assert_eq!(api.fetch_cart_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_set_quantity_round_trips_and_resyncs() {
        let (api, service) = service_with(vec![cart_item("a", 1000, 2, 5)]);

        let cart = service.set_quantity("a", 4).await.unwrap();
        assert_eq!(cart.find_item("a").unwrap().quantity, 4);
        assert_eq!(cart.subtotal(), Money::new(4000));

        assert_eq!(api.update_calls.load(Ordering::SeqCst), 1);
        // initial read + post-mutation resync
        assert_eq!(api.fetch_cart_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_quantity_above_stock_never_hits_network() {
        let (api, service) = service_with(vec![cart_item("a", 1000, 2, 5)]);

        let err = service.set_quantity("a", 6).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Core(CoreError::InsufficientStock { available: 5, requested: 6, .. })
        ));
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_quantity_below_one_never_hits_network() {
        let (api, service) = service_with(vec![cart_item("a", 1000, 1, 5)]);

        let err = service.decrement("a").await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Core(CoreError::QuantityBelowMinimum)
        ));
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_increment_respects_stock_cap() {
        let (api, service) = service_with(vec![cart_item("a", 1000, 5, 5)]);

        assert!(service.increment("a").await.is_err());
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remove_is_always_permitted() {
        // quantity somehow above stock (backend-side stock drop): removal
        // must still work
        let (api, service) = service_with(vec![cart_item("a", 1000, 5, 2)]);

        let cart = service.remove("a").await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(api.remove_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_resyncs_to_empty() {
        let (api, service) = service_with(vec![
            cart_item("a", 1000, 2, 5),
            cart_item("b", 500, 1, 9),
        ]);

        let cart = service.clear().await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(api.clear_calls.load(Ordering::SeqCst), 1);
        assert!(service.store().fetched_at().is_some());
    }

    #[tokio::test]
    async fn test_unknown_item_errors_locally() {
        let (api, service) = service_with(vec![cart_item("a", 1000, 2, 5)]);

        let err = service.set_quantity("ghost", 1).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Core(CoreError::ItemNotInCart(_))));
        assert_eq!(api.update_calls.load(Ordering::SeqCst), 0);
    }
}

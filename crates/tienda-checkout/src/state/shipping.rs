//! # Shipping Cost State
//!
//! Resolves per-department shipping rates with a session cache, an explicit
//! supersede rule for in-flight lookups, and a static fallback cost.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Department Commit → Rate Resolution                    │
//! │                                                                         │
//! │  set_department("Montevideo") ── changed? ──► department_changed()      │
//! │                                   (no: nothing fires)       │           │
//! │                                                             ▼           │
//! │                              cache hit? ──► apply, no network           │
//! │                                   │                                      │
//! │                                   ▼                                      │
//! │                              GET api/shipping/cost                      │
//! │                               │         │                                │
//! │                            Ok(cost)   Err ──► warn! + DEFAULT cost      │
//! │                               │         │     (flow never blocks)       │
//! │                               ▼         ▼                                │
//! │                          generation still current? ── no ──► discard    │
//! │                                   │                    (a newer commit  │
//! │                                   ▼                     superseded us)  │
//! │                              current quote                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The generation counter makes cancellation-on-superseding-change explicit:
//! whichever commit happened last wins, no matter which response lands
//! first.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use tienda_api::StoreApi;
use tienda_core::money::Money;
use tienda_core::types::Department;

/// The rate currently backing the totals, with its supersede counter.
#[derive(Debug, Default)]
struct CurrentQuote {
    generation: u64,
    resolved: Option<(Department, Money)>,
}

/// Per-session shipping rate resolver.
pub struct ShippingResolver {
    api: Arc<dyn StoreApi>,
    default_cost: Money,
    cache: Mutex<HashMap<Department, Money>>,
    current: Mutex<CurrentQuote>,
}

impl ShippingResolver {
    pub fn new(api: Arc<dyn StoreApi>, default_cost: Money) -> Self {
        ShippingResolver {
            api,
            default_cost,
            cache: Mutex::new(HashMap::new()),
            current: Mutex::new(CurrentQuote::default()),
        }
    }

    /// Resolves the rate for a newly committed department.
    ///
    /// Called exactly once per actual department change (the checkout flow's
    /// commit signal), never per keystroke. The returned cost is what this
    /// call resolved; [`Self::current_quote`] may differ if a later commit
    /// superseded this one while its lookup was in flight.
    pub async fn department_changed(&self, department: Department) -> Money {
        let generation = {
            let mut current = self.current.lock().expect("shipping quote mutex poisoned");
            current.generation += 1;
            current.generation
        };

        let cost = self.lookup(department).await;

        let mut current = self.current.lock().expect("shipping quote mutex poisoned");
        if current.generation == generation {
            current.resolved = Some((department, cost));
            debug!(%department, cost = %cost, "shipping rate applied");
        } else {
            debug!(%department, "shipping rate superseded, discarding");
        }

        cost
    }

    /// Cache-first rate lookup with the availability-over-precision
    /// fallback: a failed resolution yields the static default cost and is
    /// never surfaced as an error.
    async fn lookup(&self, department: Department) -> Money {
        {
            let cache = self.cache.lock().expect("shipping cache mutex poisoned");
            if let Some(cost) = cache.get(&department).copied() {
                return cost;
            }
        }

        match self.api.shipping_cost(department).await {
            Ok(cost) => {
                let mut cache = self.cache.lock().expect("shipping cache mutex poisoned");
                cache.insert(department, cost);
                cost
            }
            Err(err) => {
                warn!(%department, error = %err, "shipping rate lookup failed, using default cost");
                self.default_cost
            }
        }
    }

    /// The department and rate currently backing the totals, if resolved.
    pub fn current_quote(&self) -> Option<(Department, Money)> {
        self.current
            .lock()
            .expect("shipping quote mutex poisoned")
            .resolved
    }

    /// The cost the pricing engine should use right now.
    ///
    /// Before any department is committed this is the static default, so
    /// the cart page can always show an estimate.
    pub fn effective_cost(&self) -> Money {
        self.current_quote()
            .map(|(_, cost)| cost)
            .unwrap_or(self.default_cost)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Domain Types
//!
//! Core domain types for the storefront checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │   Department    │   │ PaymentProvider │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  item_id        │   │  Montevideo     │   │  MercadoPago    │       │
//! │  │  unit_price     │   │  Canelones      │   │  DLocalGo       │       │
//! │  │  quantity/stock │   │  ... (19 total) │   │  Simulation     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Cart (Vec<CartItem>)    PaymentMethod ──────► PaymentProvider          │
//! │                          (user-facing)  fixed  (wire identifier)        │
//! │                                         mapping                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Note
//! The cart is owned by the backend; `Cart`/`CartItem` here are the client's
//! read-mostly snapshot. Item and product ids are backend-issued strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Cart Line Item
// =============================================================================

/// A line item in the shopping cart, as last synced from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart line id (unique per cart line, backend-issued).
    pub item_id: String,

    /// Product this line refers to.
    pub product_id: String,

    /// Selected variant, when the product has variants.
    pub variant_id: Option<String>,

    /// Display name shown in the cart and drawer.
    pub name: String,

    /// URL slug, used by the frontend to link back to the product page.
    pub slug: String,

    /// Unit price in minor units.
    pub unit_price: Money,

    /// Strike-through price, when the product is on sale.
    pub compare_at_price: Option<Money>,

    /// Quantity in cart. Target state: `1 <= quantity <= stock`.
    pub quantity: i64,

    /// Available stock as last reported by the backend.
    pub stock: i64,

    /// Primary image URL, if any.
    pub image_url: Option<String>,
}

impl CartItem {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether the quantity stepper may go up (stock cap).
    #[inline]
    pub fn can_increment(&self) -> bool {
        self.quantity < self.stock
    }

    /// Whether the quantity stepper may go down (floor of 1).
    ///
    /// Removal is a separate action and is always permitted.
    #[inline]
    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The client's snapshot of the server-owned cart.
///
/// Item order is irrelevant to pricing but preserved for display. Subtotal
/// and item count are *derived* here rather than trusted from the wire, so
/// every view shows the same numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in display order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart snapshot.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Sum of `price × quantity` over all lines.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Sum of quantities over all lines (badge count).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds a line by its cart line id.
    pub fn find_item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }
}

// =============================================================================
// Department (destination region)
// =============================================================================

/// One of Uruguay's 19 administrative departments.
///
/// This is a closed set: shipping rates are keyed by department and an
/// unknown destination is a validation error, never a silent default.
/// The wire format is the display name, accents intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Department {
    Artigas,
    Canelones,
    #[serde(rename = "Cerro Largo")]
    CerroLargo,
    Colonia,
    Durazno,
    Flores,
    Florida,
    Lavalleja,
    Maldonado,
    Montevideo,
    #[serde(rename = "Paysandú")]
    Paysandu,
    #[serde(rename = "Río Negro")]
    RioNegro,
    Rivera,
    Rocha,
    Salto,
    #[serde(rename = "San José")]
    SanJose,
    Soriano,
    #[serde(rename = "Tacuarembó")]
    Tacuarembo,
    #[serde(rename = "Treinta y Tres")]
    TreintaYTres,
}

impl Department {
    /// Every department, in alphabetical order (for the address form select).
    pub const ALL: [Department; 19] = [
        Department::Artigas,
        Department::Canelones,
        Department::CerroLargo,
        Department::Colonia,
        Department::Durazno,
        Department::Flores,
        Department::Florida,
        Department::Lavalleja,
        Department::Maldonado,
        Department::Montevideo,
        Department::Paysandu,
        Department::RioNegro,
        Department::Rivera,
        Department::Rocha,
        Department::Salto,
        Department::SanJose,
        Department::Soriano,
        Department::Tacuarembo,
        Department::TreintaYTres,
    ];

    /// The display (and wire) name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Department::Artigas => "Artigas",
            Department::Canelones => "Canelones",
            Department::CerroLargo => "Cerro Largo",
            Department::Colonia => "Colonia",
            Department::Durazno => "Durazno",
            Department::Flores => "Flores",
            Department::Florida => "Florida",
            Department::Lavalleja => "Lavalleja",
            Department::Maldonado => "Maldonado",
            Department::Montevideo => "Montevideo",
            Department::Paysandu => "Paysandú",
            Department::RioNegro => "Río Negro",
            Department::Rivera => "Rivera",
            Department::Rocha => "Rocha",
            Department::Salto => "Salto",
            Department::SanJose => "San José",
            Department::Soriano => "Soriano",
            Department::Tacuarembo => "Tacuarembó",
            Department::TreintaYTres => "Treinta y Tres",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Department::ALL
            .iter()
            .find(|d| d.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "department".to_string(),
                allowed: Department::ALL.iter().map(|d| d.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Payment Method & Provider
// =============================================================================

/// User-facing payment method selection on checkout step 3.
///
/// Which methods are selectable is decided by [`StoreSettings`] at runtime;
/// the enum itself is the closed set the store can ever offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// MercadoPago checkout (cards, account money).
    MercadoPago,
    /// dLocal Go hosted payment page.
    DLocal,
    /// Development-only simulated gateway.
    Simulation,
}

impl PaymentMethod {
    /// Maps the user-facing selection to its payment provider.
    ///
    /// Exhaustive by construction: adding a provider is a compile-time
    /// checked change, not a lookup-table edit.
    pub const fn provider(&self) -> PaymentProvider {
        match self {
            PaymentMethod::MercadoPago => PaymentProvider::MercadoPago,
            PaymentMethod::DLocal => PaymentProvider::DLocalGo,
            PaymentMethod::Simulation => PaymentProvider::Simulation,
        }
    }
}

/// External payment processor identifier.
///
/// The serialized identifier is a wire contract: the backend matches these
/// strings case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentProvider {
    #[serde(rename = "MERCADOPAGO")]
    MercadoPago,
    #[serde(rename = "DLOCAL_GO")]
    DLocalGo,
    #[serde(rename = "SIMULATION")]
    Simulation,
}

impl PaymentProvider {
    /// The exact identifier string the backend expects.
    pub const fn identifier(&self) -> &'static str {
        match self {
            PaymentProvider::MercadoPago => "MERCADOPAGO",
            PaymentProvider::DLocalGo => "DLOCAL_GO",
            PaymentProvider::Simulation => "SIMULATION",
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Per-provider enablement flags, fetched from the backend.
///
/// Methods are enabled/disabled server-side at any time; a method that was
/// selectable earlier in the session must be re-checked against a fresh
/// snapshot before submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub mercadopago_enabled: bool,
    pub dlocal_enabled: bool,
    pub simulation_enabled: bool,
}

impl StoreSettings {
    /// The payment methods currently selectable on checkout step 3.
    pub fn enabled_methods(&self) -> Vec<PaymentMethod> {
        let mut methods = Vec::new();
        if self.mercadopago_enabled {
            methods.push(PaymentMethod::MercadoPago);
        }
        if self.dlocal_enabled {
            methods.push(PaymentMethod::DLocal);
        }
        if self.simulation_enabled {
            methods.push(PaymentMethod::Simulation);
        }
        methods
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Which payment-provider environment the storefront targets.
///
/// Non-production deployments prefer a sandbox redirect URL when the
/// provider returns one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

impl Environment {
    #[inline]
    pub const fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The authenticated user's profile, used to pre-fill checkout step 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

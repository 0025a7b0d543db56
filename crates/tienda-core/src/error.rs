//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tienda-core errors (this file)                                        │
//! │  ├── CoreError        - Cart/checkout domain errors                    │
//! │  └── ValidationError  - Form field validation failures                 │
//! │                                                                         │
//! │  tienda-api errors (separate crate)                                    │
//! │  └── ApiError         - Backend round-trip failures                    │
//! │                                                                         │
//! │  tienda-checkout errors (session crate)                                │
//! │  └── CheckoutError    - What the storefront shell surfaces             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → user message      │
//! │        Validation errors never reach the network layer.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, stock counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout domain errors.
///
/// These represent business rule violations; they are caught by the session
/// layer and translated to user-friendly messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Cart line cannot be found in the cached cart snapshot.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Requested quantity exceeds the stock the backend reported.
    ///
    /// ## When This Occurs
    /// - Quantity stepper raced a stock change on the backend
    /// - A stale cart snapshot allowed an increment past the cap
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Quantity fell below the floor of one.
    ///
    /// Decrementing to zero is not how lines are removed; removal is its own
    /// action and is always permitted.
    #[error("Quantity must be at least 1")]
    QuantityBelowMinimum,

    /// Checkout was invoked on a cart with no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form field validation errors.
///
/// Surfaced inline, keyed by field, before any network call is attempted.
#[derive(Debug, Clone, PartialEq, Error, Serialize, TS)]
#[ts(export)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (e.g., unknown department,
    /// disabled payment method).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// The field this error is keyed under in a [`FieldErrors`] map.
    ///
    /// [`FieldErrors`]: crate::validation::FieldErrors
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

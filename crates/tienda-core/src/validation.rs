//! # Validation Module
//!
//! Field validation primitives for the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + the checkout state machine                     │
//! │  ├── Per-step gates populate a field-keyed error map                   │
//! │  └── Nothing invalid ever reaches the network layer                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend (authoritative)                                      │
//! │  └── Re-validates everything; owns coupon/stock truth                  │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::CartItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field-Keyed Error Map
// =============================================================================

/// Validation errors keyed by form field.
///
/// A failed step gate never produces one opaque error: every offending field
/// gets its own entry so the form can render inline messages. Keys are the
/// snake_case field names ("first_name", "email", "postal_code", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FieldErrors(BTreeMap<String, ValidationError>);

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Records an error under the field it names.
    pub fn insert(&mut self, error: ValidationError) {
        self.0.insert(error.field().to_string(), error);
    }

    /// Checks whether a field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the error for a field, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.get(field)
    }

    /// Drops the error for one field (called when the field is edited).
    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Checks whether the map has no errors (the step gate passes).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields currently in error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Clears every entry (used when leaving a step).
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Folds another map into this one (full-form validation at submit).
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// Iterates over (field, error) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a required field is present after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address with a simple RFC-shaped check.
///
/// ## Rules
/// - Exactly one `@`, with non-empty local and domain parts
/// - Domain contains an interior dot
/// - No whitespace anywhere
///
/// The backend re-validates; this gate exists so a typo is caught before a
/// single byte leaves the form.
///
/// ## Example
/// ```rust
/// use tienda_core::validation::validate_email;
///
/// assert!(validate_email("ana@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates and normalizes a coupon code.
///
/// ## Rules
/// - Must be non-empty after trimming (empty input never hits the network)
/// - Maximum 50 characters
///
/// ## Returns
/// The trimmed code, ready for the backend round-trip.
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "coupon".to_string(),
            max: 50,
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested cart line quantity against its stock.
///
/// ## Rules
/// - Must be at least 1 (decrementing to zero is not removal)
/// - Must not exceed the stock the backend last reported
///
/// Removal itself is never gated by stock.
pub fn validate_cart_quantity(item: &CartItem, requested: i64) -> CoreResult<()> {
    if requested < 1 {
        return Err(CoreError::QuantityBelowMinimum);
    }

    if requested > item.stock {
        return Err(CoreError::InsufficientStock {
            name: item.name.clone(),
            available: item.stock,
            requested,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(quantity: i64, stock: i64) -> CartItem {
        CartItem {
            item_id: "line-1".to_string(),
            product_id: "prod-1".to_string(),
            variant_id: None,
            name: "Alfajor".to_string(),
            slug: "alfajor".to_string(),
            unit_price: Money::new(120),
            compare_at_price: None,
            quantity,
            stock,
            image_url: None,
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("street", "Av. 18 de Julio").is_ok());
        assert!(validate_required("street", "").is_err());
        assert!(validate_required("street", "   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.perez@shop.com.uy").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@").is_err());
        assert!(validate_email("ana @example.com").is_err());
        assert!(validate_email("ana@example.").is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert_eq!(validate_coupon_code(" SAVE10 ").unwrap(), "SAVE10");
        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("   ").is_err());
        assert!(validate_coupon_code(&"X".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_cart_quantity() {
        let line = item(2, 5);
        assert!(validate_cart_quantity(&line, 1).is_ok());
        assert!(validate_cart_quantity(&line, 5).is_ok());

        assert!(matches!(
            validate_cart_quantity(&line, 0),
            Err(CoreError::QuantityBelowMinimum)
        ));
        assert!(matches!(
            validate_cart_quantity(&line, 6),
            Err(CoreError::InsufficientStock { available: 5, requested: 6, .. })
        ));
    }

    #[test]
    fn test_field_errors_keyed_by_field() {
        let mut errors = FieldErrors::new();
        errors.insert(ValidationError::Required {
            field: "email".to_string(),
        });
        errors.insert(ValidationError::Required {
            field: "phone".to_string(),
        });

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("email"));
        assert!(errors.contains("phone"));
        assert!(!errors.contains("first_name"));

        errors.remove("email");
        assert!(!errors.contains("email"));

        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_field_errors_merge_overwrites_same_key() {
        let mut a = FieldErrors::new();
        a.insert(ValidationError::Required {
            field: "email".to_string(),
        });

        let mut b = FieldErrors::new();
        b.insert(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });

        a.merge(b);
        assert_eq!(a.len(), 1);
        assert!(matches!(
            a.get("email"),
            Some(ValidationError::InvalidFormat { .. })
        ));
    }
}

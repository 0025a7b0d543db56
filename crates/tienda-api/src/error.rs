//! # API Error Types
//!
//! Error types for backend round-trips.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / HTTP status                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (this module) ← parses the backend's error payload           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutError (session crate) ← picks the user-facing message         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storefront surfaces a toast / form-level message                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Backend round-trip errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (DNS, TLS, timeout, ...).
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose body didn't match the expected shape.
    #[error("invalid response from backend: {0}")]
    InvalidResponse(String),

    /// 401: the session expired or was never established.
    #[error("authentication required")]
    Unauthorized,

    /// Any other non-2xx answer, with whatever the error payload carried.
    #[error("backend rejected the request (HTTP {status})")]
    Backend {
        status: u16,
        /// Machine-readable code from the error payload, when present
        /// (e.g. a coupon rejection reason).
        code: Option<String>,
        /// Human-readable message from the error payload, when present.
        message: Option<String>,
    },

    /// Serialization error building a request body.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// The machine-readable payload code, when the backend sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Backend { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The human-readable payload message, when the backend sent one.
    ///
    /// `None` means the caller should fall back to its own generic message;
    /// transport noise is never shown to users.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Backend { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the backend answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Backend { status: 404, .. })
    }
}

/// Result type for backend operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_accessors() {
        let err = ApiError::Backend {
            status: 422,
            code: Some("MINIMUM_NOT_MET".to_string()),
            message: Some("Minimum purchase is $ 1.000".to_string()),
        };
        assert_eq!(err.code(), Some("MINIMUM_NOT_MET"));
        assert_eq!(err.backend_message(), Some("Minimum purchase is $ 1.000"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_detection() {
        let err = ApiError::Backend {
            status: 404,
            code: None,
            message: None,
        };
        assert!(err.is_not_found());
        assert_eq!(err.backend_message(), None);
    }

    #[test]
    fn test_unauthorized_has_no_payload() {
        let err = ApiError::Unauthorized;
        assert_eq!(err.code(), None);
        assert_eq!(err.backend_message(), None);
    }
}

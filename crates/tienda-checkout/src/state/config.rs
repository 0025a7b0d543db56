//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TIENDA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

use tienda_core::money::Money;
use tienda_core::types::Environment;
use tienda_core::{DEFAULT_SHIPPING_COST, FREE_SHIPPING_THRESHOLD};

use tienda_api::ClientConfig;

/// Storefront configuration.
///
/// Most fields have sensible defaults for development; production
/// deployments configure these through the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name (logging, page titles).
    pub store_name: String,

    /// Currency symbol for display. Amounts render with zero decimals.
    pub currency_symbol: String,

    /// Backend base URL.
    pub base_url: String,

    /// Which payment-provider environment redirects should target.
    pub environment: Environment,

    /// Subtotal at or above which shipping is waived.
    pub free_shipping_threshold: Money,

    /// Static shipping cost used when rate resolution fails.
    pub default_shipping_cost: Money,

    /// HTTP request timeout in seconds (the only timeout knob; there is no
    /// core-level retry).
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        StoreConfig {
            store_name: "Tienda Dev Store".to_string(),
            currency_symbol: "$".to_string(),
            base_url: "http://localhost:8080".to_string(),
            environment: Environment::Sandbox,
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            default_shipping_cost: DEFAULT_SHIPPING_COST,
            request_timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TIENDA_STORE_NAME`: Override store name
    /// - `TIENDA_BASE_URL`: Override backend base URL
    /// - `TIENDA_ENV`: "production" targets production redirects; anything
    ///   else stays in sandbox
    /// - `TIENDA_FREE_SHIPPING_THRESHOLD`: Override threshold (minor units)
    /// - `TIENDA_DEFAULT_SHIPPING_COST`: Override fallback cost (minor units)
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(store_name) = std::env::var("TIENDA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(base_url) = std::env::var("TIENDA_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(env) = std::env::var("TIENDA_ENV") {
            if env.eq_ignore_ascii_case("production") {
                config.environment = Environment::Production;
            }
        }

        if let Ok(raw) = std::env::var("TIENDA_FREE_SHIPPING_THRESHOLD") {
            if let Ok(amount) = raw.parse::<i64>() {
                config.free_shipping_threshold = Money::new(amount);
            }
        }

        if let Ok(raw) = std::env::var("TIENDA_DEFAULT_SHIPPING_COST") {
            if let Ok(amount) = raw.parse::<i64>() {
                config.default_shipping_cost = Money::new(amount);
            }
        }

        config
    }

    /// Builds the API client configuration for this store.
    pub fn client_config(&self, token: Option<String>) -> ClientConfig {
        let mut client = ClientConfig::new(self.base_url.clone());
        client.token = token;
        client.timeout_secs = self.request_timeout_secs;
        client
    }

    /// Formats an amount the way every storefront view does.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_checkout::state::StoreConfig;
    /// use tienda_core::money::Money;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::new(12480)), "$ 12.480");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.free_shipping_threshold, FREE_SHIPPING_THRESHOLD);
        assert_eq!(config.default_shipping_cost, DEFAULT_SHIPPING_COST);
    }

    #[test]
    fn test_format_currency_zero_decimal() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::new(0)), "$ 0");
        assert_eq!(config.format_currency(Money::new(2980)), "$ 2.980");
    }

    #[test]
    fn test_client_config_carries_timeout_and_token() {
        let config = StoreConfig::default();
        let client = config.client_config(Some("tok".to_string()));
        assert_eq!(client.base_url, config.base_url);
        assert_eq!(client.timeout_secs, 30);
        assert_eq!(client.token.as_deref(), Some("tok"));
    }
}

//! Terminal configuration.
//!
//! One configured currency symbol is used for every displayed amount;
//! the legacy widgets disagreed on the grand-total symbol and that
//! behavior is deliberately not reproduced.

use crate::money::Currency;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server endpoint paths the client talks to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiRoutes {
    /// Product search (GET, `q` parameter).
    pub search: String,
    /// Add a product to the cart (POST).
    pub add_to_cart: String,
    /// Update a line's quantity (POST).
    pub update_cart: String,
    /// Remove a line (POST).
    pub remove_from_cart: String,
    /// Clear the whole cart (POST).
    pub clear_cart: String,
    /// Finalize the sale (POST).
    pub checkout: String,
    /// Page fragment with the cart line-item markup (GET).
    pub cart_fragment: String,
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self {
            search: "/pos/api/search/".to_string(),
            add_to_cart: "/pos/add-to-cart/".to_string(),
            update_cart: "/pos/update-cart/".to_string(),
            remove_from_cart: "/pos/remove-from-cart/".to_string(),
            clear_cart: "/pos/clear-cart/".to_string(),
            checkout: "/pos/checkout/".to_string(),
            cart_fragment: "/pos/".to_string(),
        }
    }
}

/// Configuration for the terminal client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerminalConfig {
    /// Display currency for every amount field.
    pub currency: Currency,
    /// Trailing-debounce window for search input, in milliseconds.
    pub debounce_ms: u64,
    /// Minimum query length before a search is issued.
    pub min_query_len: usize,
    /// How long a notification stays on screen, in milliseconds.
    pub notice_ms: u64,
    /// Endpoint paths.
    pub routes: ApiRoutes,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            currency: Currency::PHP,
            debounce_ms: 300,
            min_query_len: 2,
            notice_ms: 5000,
            routes: ApiRoutes::default(),
        }
    }
}

impl TerminalConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the search debounce window.
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce_ms = window.as_millis() as u64;
        self
    }

    /// Set the endpoint paths.
    pub fn with_routes(mut self, routes: ApiRoutes) -> Self {
        self.routes = routes;
        self
    }

    /// The debounce window as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The notification auto-dismiss duration.
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

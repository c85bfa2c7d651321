//! Payment methods and cash-field classification.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How the customer pays.
///
/// Only cash needs an amount from the cashier; the other methods are
/// charged the exact sale total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
    Check,
}

impl PaymentMethod {
    /// The wire value sent in the checkout request.
    pub fn as_wire(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Mobile => "mobile",
            PaymentMethod::Check => "check",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "mobile" => Some(PaymentMethod::Mobile),
            "check" => Some(PaymentMethod::Check),
            _ => None,
        }
    }

    /// Whether this method requires an amount-received entry.
    pub fn needs_amount(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

/// Live validation state of the amount-received field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFieldState {
    /// Empty or zero entry; no verdict yet.
    Neutral,
    /// Entry below the sale total, negative entries included.
    Insufficient { shortage: Money },
    /// Entry covers the sale total.
    Sufficient { change: Money },
}

/// Classify an amount-received entry against the sale total.
pub fn classify_cash(entered: Money, total: Money) -> CashFieldState {
    if entered.is_zero() {
        return CashFieldState::Neutral;
    }
    match entered.try_subtract(&total) {
        Some(change) if change.is_negative() => CashFieldState::Insufficient {
            shortage: Money::new(-change.amount_cents, change.currency),
        },
        Some(change) => CashFieldState::Sufficient { change },
        None => CashFieldState::Neutral,
    }
}

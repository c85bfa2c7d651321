//! Checkout modal flow and tender handling.

mod flow;
mod tender;

pub use flow::{CheckoutFlow, CheckoutState};
pub use tender::{classify_cash, CashFieldState, PaymentMethod};

use crate::money::Money;

/// A completed sale, as confirmed by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    /// Server-assigned sale number, e.g. `SALE-000123`.
    pub sale_number: String,
    pub total_amount: Money,
    pub change_amount: Money,
}

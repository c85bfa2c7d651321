//! Cart display state and reconciliation.

mod controller;
mod view;

pub use controller::{CartController, QuantityAction};
pub use view::{CartView, CartViewState};

use crate::ids::CartLineId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The server-computed cart totals.
///
/// The server is the system of record; the client only displays the
/// most recent successful copy of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl CartSummary {
    /// An empty cart in the given currency.
    pub fn empty(currency: Currency) -> Self {
        Self {
            item_count: 0,
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// One product entry within the active cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub line_id: CartLineId,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(
        line_id: impl Into<CartLineId>,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            line_id: line_id.into(),
            product_name: product_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Line total (unit price times quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

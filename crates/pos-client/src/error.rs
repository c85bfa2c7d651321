//! Client error types.

use crate::ids::{CartLineId, ProductId};
use crate::money::Money;
use pos_gateway::GatewayError;
use thiserror::Error;

/// Errors that can occur in the cart client.
///
/// Gateway failures pass through unchanged; the remaining variants are
/// local rejections resolved without a network round trip.
#[derive(Error, Debug)]
pub enum PosError {
    /// Transport or application failure from the request gateway.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Checkout requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash amount missing, zero, or negative.
    #[error("Please enter a valid cash amount")]
    InvalidCashAmount,

    /// Cash tendered below the sale total.
    #[error("Insufficient cash. Short by {}", .shortage.display())]
    InsufficientCash { shortage: Money },

    /// A mutation for this line is already in flight.
    #[error("update already in flight for line {0}")]
    LineBusy(CartLineId),

    /// The line is not part of the displayed cart.
    #[error("line {0} is not in the cart")]
    UnknownLine(CartLineId),

    /// A search result was picked at an index no longer on screen.
    #[error("no search result at index {0}")]
    UnknownResult(usize),

    /// A product card was tapped for a product not in the loaded grid.
    #[error("product {0} is not in the catalog grid")]
    UnknownProduct(ProductId),

    /// A cart-wide operation is already in flight.
    #[error("cart operation already in progress")]
    CartBusy,

    /// A checkout submission is already in flight.
    #[error("checkout already in progress")]
    CheckoutInProgress,
}

impl PosError {
    /// Whether this failure was resolved locally, without a server call.
    pub fn is_local(&self) -> bool {
        !matches!(self, PosError::Gateway(_))
    }
}

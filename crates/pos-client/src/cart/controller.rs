//! Cart mutation dispatch and reconciliation.
//!
//! Every mutation goes to the server; the displayed summary only moves
//! forward on a successful response. While a line's update is in flight
//! its controls are disabled and further mutations for that line are
//! rejected locally, serializing rapid clicks per line.

use crate::api::PosBackend;
use crate::cart::{CartLine, CartSummary, CartView};
use crate::error::PosError;
use crate::ids::{CartLineId, ProductId};
use crate::money::Currency;
use crate::notify::Notice;
use crate::surface::{Surface, Target};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Direction of a quantity control click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAction {
    Increase,
    Decrease,
}

/// Orchestrates cart mutations against the server.
pub struct CartController {
    view: CartView,
    in_flight: HashSet<CartLineId>,
    cart_busy: bool,
}

impl CartController {
    pub fn new(currency: Currency) -> Self {
        Self {
            view: CartView::new(currency),
            in_flight: HashSet::new(),
            cart_busy: false,
        }
    }

    /// The cart view this controller reconciles.
    pub fn view(&self) -> &CartView {
        &self.view
    }

    /// Whether a mutation for this line is currently in flight.
    pub fn is_line_busy(&self, line_id: &CartLineId) -> bool {
        self.in_flight.contains(line_id)
    }

    /// Reset the display to an empty cart (post-sale, new sale).
    pub fn reset<S: Surface>(&mut self, surface: &mut S) {
        self.in_flight.clear();
        self.view.reset(surface);
    }

    /// Seed the view from server-rendered page state (initial load).
    pub fn sync<S: Surface>(
        &mut self,
        surface: &mut S,
        summary: CartSummary,
        lines: Option<Vec<CartLine>>,
    ) {
        self.view.apply(surface, summary, lines);
    }

    /// Add a product to the cart, reconciling totals on success.
    pub fn add_product<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), PosError> {
        debug!(product = %product_id, quantity, "add to cart");
        match backend.add_to_cart(product_id, quantity) {
            Ok(wire) => {
                let summary = wire.summary(self.view.currency());
                self.view.apply(surface, summary, None);
                if let Some(message) = &wire.envelope.message {
                    surface.notify(&Notice::success(message.clone()));
                }
                // Line markup comes from the page fragment; a failure
                // here leaves the totals correct and is only logged.
                let _ = self.refresh_lines(backend, surface);
                Ok(())
            }
            Err(e) => {
                warn!(product = %product_id, error = %e, "add to cart failed");
                surface.notify(&Notice::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Step a line's quantity up or down.
    ///
    /// Stepping down to zero removes the line. Rejected locally while a
    /// previous update for the same line is still in flight.
    pub fn adjust_quantity<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
        line_id: &CartLineId,
        action: QuantityAction,
    ) -> Result<(), PosError> {
        if self.in_flight.contains(line_id) {
            debug!(line = %line_id, "quantity click ignored, update in flight");
            return Err(PosError::LineBusy(line_id.clone()));
        }

        let current = self
            .view
            .line(line_id)
            .ok_or_else(|| PosError::UnknownLine(line_id.clone()))?
            .quantity;
        let quantity = match action {
            QuantityAction::Increase => current + 1,
            QuantityAction::Decrease => current - 1,
        };

        if quantity <= 0 {
            return self.remove_line(backend, surface, line_id);
        }

        self.in_flight.insert(line_id.clone());
        surface.set_enabled(Target::LineControls(line_id.clone()), false);

        let result = backend.update_cart(line_id, quantity);
        self.in_flight.remove(line_id);
        if surface.contains(&Target::LineControls(line_id.clone())) {
            surface.set_enabled(Target::LineControls(line_id.clone()), true);
        }

        match result {
            Ok(wire) => {
                let summary = wire.summary(self.view.currency());
                self.view.patch_line_quantity(line_id, quantity);
                self.view.apply(surface, summary, None);
                Ok(())
            }
            Err(e) => {
                warn!(line = %line_id, error = %e, "quantity update failed");
                surface.notify(&Notice::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Remove a line from the cart.
    pub fn remove_line<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
        line_id: &CartLineId,
    ) -> Result<(), PosError> {
        if self.in_flight.contains(line_id) {
            return Err(PosError::LineBusy(line_id.clone()));
        }

        self.in_flight.insert(line_id.clone());
        surface.set_enabled(Target::LineControls(line_id.clone()), false);

        let result = backend.remove_from_cart(line_id);
        self.in_flight.remove(line_id);

        match result {
            Ok(wire) => {
                surface.remove_line(line_id);
                self.view.drop_line(line_id);
                let summary = wire.summary(self.view.currency());
                self.view.apply(surface, summary, None);
                if let Some(message) = &wire.envelope.message {
                    surface.notify(&Notice::success(message.clone()));
                }
                Ok(())
            }
            Err(e) => {
                warn!(line = %line_id, error = %e, "remove failed");
                if surface.contains(&Target::LineControls(line_id.clone())) {
                    surface.set_enabled(Target::LineControls(line_id.clone()), true);
                }
                surface.notify(&Notice::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Clear the whole cart. Confirmation is the host's concern.
    pub fn clear_cart<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
    ) -> Result<(), PosError> {
        if self.cart_busy {
            return Err(PosError::CartBusy);
        }
        self.cart_busy = true;
        surface.set_enabled(Target::ClearCartButton, false);

        let result = backend.clear_cart();
        self.cart_busy = false;

        match result {
            Ok(wire) => {
                let summary = wire.summary(self.view.currency());
                self.view.apply(surface, summary, Some(Vec::new()));
                surface.notify(&Notice::success("Cart cleared successfully"));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "clear cart failed");
                // Put the button back the way the displayed summary wants it.
                self.view.render(surface);
                surface.notify(&Notice::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Re-fetch the server-rendered line-item markup.
    pub fn refresh_lines<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
    ) -> Result<(), PosError> {
        match backend.cart_fragment() {
            Ok(html) => {
                surface.replace_line_markup(&html);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "cart fragment refresh failed");
                Err(e.into())
            }
        }
    }
}

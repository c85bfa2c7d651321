//! The checkout modal flow.
//!
//! Opening requires a non-empty cart. Cash tenders are validated
//! locally before the server is asked; a rejected submission leaves the
//! modal open with the entry intact so the cashier can correct it. Only
//! a confirmed sale resets the cart.

use crate::api::{CheckoutRequest, PosBackend};
use crate::cart::CartController;
use crate::checkout::{classify_cash, CashFieldState, CheckoutOutcome, PaymentMethod};
use crate::error::PosError;
use crate::money::{Currency, Money};
use crate::notify::Notice;
use crate::surface::{FieldIndicator, Surface, Target};
use pos_gateway::ServerErrorKind;
use tracing::{debug, info, warn};

/// Where the checkout modal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Closed,
    Open,
    Submitting,
}

/// Drives the checkout modal.
pub struct CheckoutFlow {
    state: CheckoutState,
    method: PaymentMethod,
    entered: Option<Money>,
    currency: Currency,
}

impl CheckoutFlow {
    pub fn new(currency: Currency) -> Self {
        Self {
            state: CheckoutState::Closed,
            method: PaymentMethod::default(),
            entered: None,
            currency,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Open the modal for the displayed cart.
    ///
    /// Rejected with a notice when the cart is empty.
    pub fn open<S: Surface>(
        &mut self,
        surface: &mut S,
        cart: &CartController,
    ) -> Result<(), PosError> {
        let summary = cart.view().summary();
        if summary.is_empty() {
            surface.notify(&Notice::error(PosError::EmptyCart.to_string()));
            return Err(PosError::EmptyCart);
        }

        self.state = CheckoutState::Open;
        self.method = PaymentMethod::Cash;
        self.entered = None;

        surface.set_text(Target::CheckoutTotal, &summary.total.display());
        surface.set_visible(Target::CashSection, true);
        surface.clear_input(Target::AmountField);
        surface.set_field_indicator(Target::AmountField, FieldIndicator::Neutral);
        surface.set_text(Target::ChangeDisplay, &Money::zero(self.currency).display());
        surface.set_visible(Target::CheckoutModal, true);
        surface.focus(Target::AmountField);
        debug!(total = %summary.total, "checkout opened");
        Ok(())
    }

    /// Switch the tender method. The cash section only shows for cash.
    pub fn select_method<S: Surface>(&mut self, surface: &mut S, method: PaymentMethod) {
        self.method = method;
        surface.set_visible(Target::CashSection, method.needs_amount());
        if method.needs_amount() {
            surface.focus(Target::AmountField);
        }
    }

    /// Handle an edit of the amount-received field.
    ///
    /// Classifies the entry against the sale total and updates the
    /// field indicator and change display as the cashier types.
    pub fn amount_input<S: Surface>(&mut self, surface: &mut S, cart: &CartController, text: &str) {
        let total = cart.view().summary().total;
        self.entered = text
            .trim()
            .parse::<f64>()
            .ok()
            .map(|amount| Money::from_decimal(amount, self.currency));

        let state = match self.entered {
            Some(entered) => classify_cash(entered, total),
            None => CashFieldState::Neutral,
        };
        match state {
            CashFieldState::Neutral => {
                surface.set_field_indicator(Target::AmountField, FieldIndicator::Neutral);
                surface.set_text(Target::ChangeDisplay, &Money::zero(self.currency).display());
            }
            CashFieldState::Insufficient { .. } => {
                surface.set_field_indicator(Target::AmountField, FieldIndicator::Invalid);
                surface.set_text(Target::ChangeDisplay, &Money::zero(self.currency).display());
            }
            CashFieldState::Sufficient { change } => {
                surface.set_field_indicator(Target::AmountField, FieldIndicator::Valid);
                surface.set_text(Target::ChangeDisplay, &change.display());
            }
        }
    }

    /// Submit the sale.
    ///
    /// Cash tenders are validated locally first; any other method sends
    /// the exact sale total as the amount paid. A confirmed sale hides
    /// the checkout modal, fills and shows the success modal, and
    /// resets the cart for the next customer.
    pub fn submit<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
        cart: &mut CartController,
    ) -> Result<CheckoutOutcome, PosError> {
        if self.state == CheckoutState::Submitting {
            return Err(PosError::CheckoutInProgress);
        }
        let summary = cart.view().summary();
        if summary.is_empty() {
            surface.notify(&Notice::error(PosError::EmptyCart.to_string()));
            return Err(PosError::EmptyCart);
        }
        let total = summary.total;

        let amount_paid = if self.method.needs_amount() {
            let entered = match self.entered {
                Some(m) if m.is_positive() => m,
                _ => {
                    let err = PosError::InvalidCashAmount;
                    surface.notify(&Notice::error(err.to_string()));
                    surface.set_field_indicator(Target::AmountField, FieldIndicator::Invalid);
                    surface.focus(Target::AmountField);
                    return Err(err);
                }
            };
            if entered < total {
                let err = PosError::InsufficientCash {
                    shortage: total - entered,
                };
                surface.notify(&Notice::error(err.to_string()));
                surface.set_field_indicator(Target::AmountField, FieldIndicator::Invalid);
                surface.focus(Target::AmountField);
                surface.select_contents(Target::AmountField);
                return Err(err);
            }
            entered
        } else {
            total
        };

        let request = CheckoutRequest {
            payment_method: self.method.as_wire().to_string(),
            amount_paid: amount_paid.to_decimal(),
        };

        self.state = CheckoutState::Submitting;
        debug!(method = request.payment_method, amount = request.amount_paid, "submitting sale");

        let result = backend.checkout(&request);
        self.state = CheckoutState::Open;

        let wire = match result {
            Ok(wire) => wire,
            Err(e) => {
                warn!(error = %e, "checkout transport failure");
                surface.notify(&Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        if let Err(e) = wire.envelope.check() {
            warn!(error = %e, "checkout rejected");
            surface.notify(&Notice::error(e.to_string()));
            if e.kind().is_some_and(|k| k.is_cash_error()) {
                surface.set_field_indicator(Target::AmountField, FieldIndicator::Invalid);
                surface.focus(Target::AmountField);
                // Select only on shortage, so the cashier can retype the
                // amount; an invalid entry just gets focus back.
                if e.kind() == Some(ServerErrorKind::InsufficientCash) {
                    surface.select_contents(Target::AmountField);
                }
            }
            return Err(e.into());
        }

        let outcome = wire.outcome(self.currency)?;
        info!(sale = %outcome.sale_number, total = %outcome.total_amount, "sale completed");

        surface.set_visible(Target::CheckoutModal, false);
        surface.set_text(Target::SaleNumber, &outcome.sale_number);
        surface.set_text(Target::SaleTotal, &outcome.total_amount.display());
        let has_change = outcome.change_amount.is_positive();
        surface.set_visible(Target::SaleChange, has_change);
        if has_change {
            surface.set_text(Target::SaleChange, &outcome.change_amount.display());
        }
        surface.set_visible(Target::SuccessModal, true);

        cart.reset(surface);
        self.state = CheckoutState::Closed;
        self.entered = None;
        Ok(outcome)
    }

    /// Dismiss the success modal and prepare for the next customer.
    pub fn new_sale<S: Surface>(&mut self, surface: &mut S, cart: &mut CartController) {
        surface.set_visible(Target::SuccessModal, false);
        cart.reset(surface);
        surface.clear_input(Target::SearchInput);
        surface.focus(Target::SearchInput);
        surface.notify(&Notice::success("Ready for new sale"));
        self.state = CheckoutState::Closed;
        self.entered = None;
    }

    /// Close the modal without charging anything.
    pub fn close<S: Surface>(&mut self, surface: &mut S) {
        surface.set_visible(Target::CheckoutModal, false);
        surface.clear_input(Target::AmountField);
        surface.set_field_indicator(Target::AmountField, FieldIndicator::Neutral);
        self.state = CheckoutState::Closed;
        self.entered = None;
    }
}

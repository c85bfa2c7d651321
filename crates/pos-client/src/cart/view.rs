//! Cart view updater.
//!
//! Holds the last applied [`CartViewState`] and renders it through the
//! surface deterministically, so applying the same summary twice yields
//! the same visible state.

use crate::cart::{CartLine, CartSummary};
use crate::ids::CartLineId;
use crate::money::{Currency, Money};
use crate::surface::{Surface, Target};

/// The displayed cart state.
#[derive(Debug, Clone, PartialEq)]
pub struct CartViewState {
    pub summary: CartSummary,
    /// Structured line data, when it accompanied the summary.
    pub lines: Option<Vec<CartLine>>,
}

/// Renders cart summaries and line lists into the surface.
#[derive(Debug, Clone)]
pub struct CartView {
    state: CartViewState,
    currency: Currency,
}

impl CartView {
    /// Create a view showing an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            state: CartViewState {
                summary: CartSummary::empty(currency),
                lines: None,
            },
            currency,
        }
    }

    /// The last applied state.
    pub fn state(&self) -> &CartViewState {
        &self.state
    }

    /// The displayed summary.
    pub fn summary(&self) -> &CartSummary {
        &self.state.summary
    }

    /// The display currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Look up a displayed line.
    pub fn line(&self, line_id: &CartLineId) -> Option<&CartLine> {
        self.state
            .lines
            .as_ref()
            .and_then(|lines| lines.iter().find(|l| &l.line_id == line_id))
    }

    /// Apply a server-confirmed summary, optionally with line data.
    ///
    /// Only called with successful responses; on a failed mutation the
    /// previous state stays on screen.
    pub fn apply<S: Surface>(
        &mut self,
        surface: &mut S,
        summary: CartSummary,
        lines: Option<Vec<CartLine>>,
    ) {
        self.state.summary = summary;
        if lines.is_some() {
            self.state.lines = lines;
        }
        self.render(surface);
    }

    /// Record a quantity change for a known line without new line data.
    pub(crate) fn patch_line_quantity(&mut self, line_id: &CartLineId, quantity: i64) {
        if let Some(lines) = self.state.lines.as_mut() {
            if let Some(line) = lines.iter_mut().find(|l| &l.line_id == line_id) {
                line.quantity = quantity;
            }
        }
    }

    /// Drop a line from the held state.
    pub(crate) fn drop_line(&mut self, line_id: &CartLineId) {
        if let Some(lines) = self.state.lines.as_mut() {
            lines.retain(|l| &l.line_id != line_id);
        }
    }

    /// Reset to an empty cart (clear cart, new sale, post-checkout).
    pub fn reset<S: Surface>(&mut self, surface: &mut S) {
        self.state.summary = CartSummary::empty(self.currency);
        self.state.lines = Some(Vec::new());
        self.render(surface);
    }

    /// Format an amount with the view's configured symbol.
    ///
    /// The configured currency wins over whatever currency a summary
    /// arrived with, so all four fields always share one symbol.
    fn amount(&self, money: Money) -> String {
        format!("{}{}", self.currency.symbol(), money.display_amount())
    }

    /// Render the held state into the surface.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        let summary = &self.state.summary;

        surface.set_text(Target::CartCount, &summary.item_count.to_string());
        surface.set_text(Target::CartSubtotal, &self.amount(summary.subtotal));
        surface.set_text(Target::CartTax, &self.amount(summary.tax));
        surface.set_text(Target::CartTotal, &self.amount(summary.total));

        let has_items = !summary.is_empty();
        surface.set_enabled(Target::CheckoutButton, has_items);
        surface.set_enabled(Target::ClearCartButton, has_items);

        if let Some(lines) = &self.state.lines {
            if lines.is_empty() {
                surface.show_empty_cart();
            } else {
                surface.replace_lines(lines);
                for line in lines {
                    let target = Target::LineQuantity(line.line_id.clone());
                    if surface.contains(&target) {
                        surface.set_text(target, &line.quantity.to_string());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::surface::RecordingSurface;

    fn summary(count: i64, subtotal: i64, tax: i64, total: i64) -> CartSummary {
        CartSummary {
            item_count: count,
            subtotal: Money::new(subtotal, Currency::PHP),
            tax: Money::new(tax, Currency::PHP),
            total: Money::new(total, Currency::PHP),
        }
    }

    #[test]
    fn test_apply_renders_all_four_fields() {
        let mut view = CartView::new(Currency::PHP);
        let mut surface = RecordingSurface::new();

        view.apply(&mut surface, summary(2, 10000, 1000, 11000), None);

        assert_eq!(surface.text(&Target::CartCount), Some("2"));
        assert_eq!(surface.text(&Target::CartSubtotal), Some("\u{20b1}100.00"));
        assert_eq!(surface.text(&Target::CartTax), Some("\u{20b1}10.00"));
        assert_eq!(surface.text(&Target::CartTotal), Some("\u{20b1}110.00"));
    }

    #[test]
    fn test_one_symbol_for_every_field() {
        let mut view = CartView::new(Currency::USD);
        let mut surface = RecordingSurface::new();

        // Summary money tagged PHP; the configured symbol still wins.
        view.apply(&mut surface, summary(1, 5000, 500, 5500), None);

        assert_eq!(surface.text(&Target::CartSubtotal), Some("$50.00"));
        assert_eq!(surface.text(&Target::CartTax), Some("$5.00"));
        assert_eq!(surface.text(&Target::CartTotal), Some("$55.00"));
    }

    #[test]
    fn test_buttons_disabled_iff_empty() {
        let mut view = CartView::new(Currency::PHP);
        let mut surface = RecordingSurface::new();

        view.apply(&mut surface, summary(3, 100, 10, 110), None);
        assert!(surface.is_enabled(&Target::CheckoutButton));
        assert!(surface.is_enabled(&Target::ClearCartButton));

        view.apply(&mut surface, summary(0, 0, 0, 0), None);
        assert!(!surface.is_enabled(&Target::CheckoutButton));
        assert!(!surface.is_enabled(&Target::ClearCartButton));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut view = CartView::new(Currency::PHP);
        let mut surface = RecordingSurface::new();

        let s = summary(2, 10000, 1000, 11000);
        view.apply(&mut surface, s, None);
        let first_texts = surface.texts.clone();
        let first_enabled = surface.enabled.clone();

        view.apply(&mut surface, s, None);
        assert_eq!(surface.texts, first_texts);
        assert_eq!(surface.enabled, first_enabled);
    }

    #[test]
    fn test_empty_line_list_shows_placeholder() {
        let mut view = CartView::new(Currency::PHP);
        let mut surface = RecordingSurface::new();

        view.apply(&mut surface, summary(0, 0, 0, 0), Some(Vec::new()));
        assert!(surface.empty_cart_shown);
        assert!(surface.lines.is_empty());
    }

    #[test]
    fn test_line_list_replaced() {
        let mut view = CartView::new(Currency::PHP);
        let mut surface = RecordingSurface::new();

        let lines = vec![
            CartLine::new("line-1", "Cola", Money::new(2550, Currency::PHP), 2),
            CartLine::new("line-2", "Chips", Money::new(3500, Currency::PHP), 1),
        ];
        view.apply(&mut surface, summary(3, 8600, 860, 9460), Some(lines.clone()));

        assert_eq!(surface.lines, lines);
        assert!(!surface.empty_cart_shown);
        assert_eq!(view.line(&"line-1".into()).unwrap().quantity, 2);
    }

    #[test]
    fn test_summary_only_apply_keeps_lines() {
        let mut view = CartView::new(Currency::PHP);
        let mut surface = RecordingSurface::new();

        let lines = vec![CartLine::new("line-1", "Cola", Money::new(2550, Currency::PHP), 2)];
        view.apply(&mut surface, summary(2, 5100, 510, 5610), Some(lines));
        view.apply(&mut surface, summary(3, 7650, 765, 8415), None);

        assert_eq!(view.line(&"line-1".into()).unwrap().quantity, 2);
    }

    #[test]
    fn test_reset_shows_empty_cart() {
        let mut view = CartView::new(Currency::PHP);
        let mut surface = RecordingSurface::new();

        let lines = vec![CartLine::new("line-1", "Cola", Money::new(2550, Currency::PHP), 2)];
        view.apply(&mut surface, summary(2, 5100, 510, 5610), Some(lines));
        view.reset(&mut surface);

        assert!(surface.empty_cart_shown);
        assert_eq!(surface.text(&Target::CartCount), Some("0"));
        assert!(!surface.is_enabled(&Target::CheckoutButton));
    }
}

//! The rendering surface.
//!
//! The client never touches a document tree directly. At startup the
//! host binds whatever widget regions exist on its page into one typed
//! handle set implementing [`Surface`]; every trait method defaults to a
//! no-op, so targets a page doesn't have are silently skipped.

use crate::api::ProductHit;
use crate::cart::CartLine;
use crate::ids::CartLineId;
use crate::notify::Notice;
use std::collections::{HashMap, HashSet};

/// A widget region the client can address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Item count display.
    CartCount,
    /// Subtotal display.
    CartSubtotal,
    /// Tax display.
    CartTax,
    /// Grand total display.
    CartTotal,
    /// Checkout action button.
    CheckoutButton,
    /// Clear-cart action button.
    ClearCartButton,
    /// The line-item list region.
    LineList,
    /// Quantity controls for one line.
    LineControls(CartLineId),
    /// Quantity display for one line.
    LineQuantity(CartLineId),
    /// Search query input.
    SearchInput,
    /// Search results dropdown.
    SearchResults,
    /// Checkout modal.
    CheckoutModal,
    /// Total shown inside the checkout modal.
    CheckoutTotal,
    /// Cash payment section (amount field and change).
    CashSection,
    /// Amount-received input.
    AmountField,
    /// Change display inside the checkout modal.
    ChangeDisplay,
    /// Post-sale success modal.
    SuccessModal,
    /// Sale number display in the success modal.
    SaleNumber,
    /// Sale total display in the success modal.
    SaleTotal,
    /// Change display in the success modal.
    SaleChange,
}

/// Validation highlight for an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldIndicator {
    Neutral,
    Invalid,
    Valid,
}

/// The typed handle set a host binds at startup.
///
/// Every method is a no-op by default; a host overrides only what its
/// page can show. `contains` lets callers check a target still exists
/// before patching it, which is how stale responses are discarded.
pub trait Surface {
    fn set_text(&mut self, _target: Target, _text: &str) {}
    fn set_enabled(&mut self, _target: Target, _enabled: bool) {}
    fn set_visible(&mut self, _target: Target, _visible: bool) {}
    fn set_field_indicator(&mut self, _target: Target, _indicator: FieldIndicator) {}
    fn focus(&mut self, _target: Target) {}
    fn select_contents(&mut self, _target: Target) {}
    fn clear_input(&mut self, _target: Target) {}

    /// Replace the line-item list with structured line data.
    fn replace_lines(&mut self, _lines: &[CartLine]) {}
    /// Remove a single line element.
    fn remove_line(&mut self, _line: &CartLineId) {}
    /// Show the empty-cart placeholder.
    fn show_empty_cart(&mut self) {}
    /// Replace the line-item region with server-rendered markup.
    fn replace_line_markup(&mut self, _html: &str) {}

    /// Render the search result dropdown.
    fn show_search_results(&mut self, _hits: &[ProductHit]) {}
    /// Render the "no products found" message.
    fn show_no_products(&mut self) {}

    /// Render the product card grid.
    fn show_product_cards(&mut self, _hits: &[ProductHit]) {}
    /// Highlight the active category button (`None` = all).
    fn set_active_category(&mut self, _category: Option<&str>) {}

    /// Show a transient notification.
    fn notify(&mut self, _notice: &Notice) {}

    /// Whether the target currently exists on the page.
    fn contains(&self, _target: &Target) -> bool {
        true
    }
}

/// A [`Surface`] that records every operation.
///
/// Used throughout the test suite; also handy as a tracing shim while
/// bringing up a new host.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub texts: HashMap<Target, String>,
    pub enabled: HashMap<Target, bool>,
    pub visible: HashMap<Target, bool>,
    pub indicators: HashMap<Target, FieldIndicator>,
    pub focused: Vec<Target>,
    pub selected: Vec<Target>,
    pub cleared_inputs: Vec<Target>,
    pub lines: Vec<CartLine>,
    pub empty_cart_shown: bool,
    pub line_markup: Option<String>,
    pub search_results: Vec<ProductHit>,
    pub no_products_shown: bool,
    pub product_cards: Vec<ProductHit>,
    pub active_category: Option<String>,
    pub notices: Vec<Notice>,
    /// Targets reported as absent from the page.
    pub detached: HashSet<Target>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a target as absent, as if its element had been removed.
    pub fn detach(&mut self, target: Target) {
        self.detached.insert(target);
    }

    /// The text last rendered into a target.
    pub fn text(&self, target: &Target) -> Option<&str> {
        self.texts.get(target).map(String::as_str)
    }

    /// Whether a target was last set enabled. Defaults to true.
    pub fn is_enabled(&self, target: &Target) -> bool {
        self.enabled.get(target).copied().unwrap_or(true)
    }

    /// Whether a target was last set visible. Defaults to false.
    pub fn is_visible(&self, target: &Target) -> bool {
        self.visible.get(target).copied().unwrap_or(false)
    }

    /// The most recent notification.
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// The most recently focused target.
    pub fn last_focus(&self) -> Option<&Target> {
        self.focused.last()
    }
}

impl Surface for RecordingSurface {
    fn set_text(&mut self, target: Target, text: &str) {
        self.texts.insert(target, text.to_string());
    }

    fn set_enabled(&mut self, target: Target, enabled: bool) {
        self.enabled.insert(target, enabled);
    }

    fn set_visible(&mut self, target: Target, visible: bool) {
        self.visible.insert(target, visible);
    }

    fn set_field_indicator(&mut self, target: Target, indicator: FieldIndicator) {
        self.indicators.insert(target, indicator);
    }

    fn focus(&mut self, target: Target) {
        self.focused.push(target);
    }

    fn select_contents(&mut self, target: Target) {
        self.selected.push(target);
    }

    fn clear_input(&mut self, target: Target) {
        self.cleared_inputs.push(target);
    }

    fn replace_lines(&mut self, lines: &[CartLine]) {
        self.lines = lines.to_vec();
        self.empty_cart_shown = false;
    }

    fn remove_line(&mut self, line: &CartLineId) {
        self.lines.retain(|l| &l.line_id != line);
        self.detached.insert(Target::LineControls(line.clone()));
        self.detached.insert(Target::LineQuantity(line.clone()));
    }

    fn show_empty_cart(&mut self) {
        self.lines.clear();
        self.empty_cart_shown = true;
    }

    fn replace_line_markup(&mut self, html: &str) {
        self.line_markup = Some(html.to_string());
    }

    fn show_search_results(&mut self, hits: &[ProductHit]) {
        self.search_results = hits.to_vec();
        self.no_products_shown = false;
    }

    fn show_no_products(&mut self) {
        self.search_results.clear();
        self.no_products_shown = true;
    }

    fn show_product_cards(&mut self, hits: &[ProductHit]) {
        self.product_cards = hits.to_vec();
    }

    fn set_active_category(&mut self, category: Option<&str>) {
        self.active_category = category.map(str::to_string);
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn contains(&self, target: &Target) -> bool {
        !self.detached.contains(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_text() {
        let mut surface = RecordingSurface::new();
        surface.set_text(Target::CartCount, "3");
        assert_eq!(surface.text(&Target::CartCount), Some("3"));
    }

    #[test]
    fn test_recording_surface_contains_after_detach() {
        let mut surface = RecordingSurface::new();
        let line = CartLineId::new("line-1");
        assert!(surface.contains(&Target::LineControls(line.clone())));
        surface.detach(Target::LineControls(line.clone()));
        assert!(!surface.contains(&Target::LineControls(line)));
    }

    #[test]
    fn test_noop_surface_is_silent() {
        // A host that binds nothing gets the default no-ops for free.
        struct Bare;
        impl Surface for Bare {}

        let mut surface = Bare;
        surface.set_text(Target::CartCount, "3");
        surface.show_empty_cart();
        assert!(surface.contains(&Target::CartCount));
    }
}

//! Product search panel.
//!
//! Keystrokes are debounced with a trailing window: every input below
//! the minimum length cancels the pending query, every qualifying input
//! restarts the timer, and only the timer firing actually issues the
//! search. A burst of N keystrokes inside the window produces exactly
//! one server query, for the last text entered.

use crate::api::{PosBackend, ProductHit};
use crate::cart::CartController;
use crate::config::TerminalConfig;
use crate::error::PosError;
use crate::notify::Notice;
use crate::surface::{Surface, Target};
use std::time::Duration;
use tracing::debug;

/// A cancellable one-shot timer the host provides.
///
/// `start` arms the timer to fire once after the given window,
/// replacing any pending arm. `cancel` disarms it. The host calls
/// [`SearchPanel::on_debounce_elapsed`] when the timer fires.
pub trait DebounceTimer {
    fn start(&mut self, window: Duration);
    fn cancel(&mut self);
}

/// Lifecycle of the search panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No query pending, dropdown hidden.
    Idle,
    /// A qualifying query is waiting out the debounce window.
    Debouncing,
    /// Results are on screen.
    Showing,
    /// The "no products found" message is on screen.
    Empty,
}

/// Debounced product search over the backend.
pub struct SearchPanel {
    state: SearchState,
    pending_query: Option<String>,
    /// Query text of the results currently on screen, used to discard
    /// responses that no longer match the input.
    shown_query: Option<String>,
    hits: Vec<ProductHit>,
    min_query_len: usize,
    window: Duration,
}

impl SearchPanel {
    pub fn new(config: &TerminalConfig) -> Self {
        Self {
            state: SearchState::Idle,
            pending_query: None,
            shown_query: None,
            hits: Vec::new(),
            min_query_len: config.min_query_len,
            window: config.debounce(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The hits currently on screen.
    pub fn hits(&self) -> &[ProductHit] {
        &self.hits
    }

    /// Handle a keystroke in the search input.
    ///
    /// Below the minimum length the pending query is cancelled and any
    /// dropdown is hidden; otherwise the debounce window restarts for
    /// the new text.
    pub fn on_input<T: DebounceTimer, S: Surface>(
        &mut self,
        timer: &mut T,
        surface: &mut S,
        text: &str,
    ) {
        let query = text.trim();
        if query.len() < self.min_query_len {
            timer.cancel();
            self.pending_query = None;
            self.dismiss(surface);
            return;
        }

        self.pending_query = Some(query.to_string());
        self.state = SearchState::Debouncing;
        timer.cancel();
        timer.start(self.window);
    }

    /// The debounce timer fired; issue the query.
    pub fn on_debounce_elapsed<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
    ) -> Result<(), PosError> {
        let query = match self.pending_query.take() {
            Some(q) => q,
            // Fired after a cancel raced it; nothing to do.
            None => return Ok(()),
        };

        debug!(query = %query, "search");
        match backend.search_products(&query) {
            Ok(hits) if hits.is_empty() => {
                surface.show_no_products();
                self.hits.clear();
                self.shown_query = Some(query);
                self.state = SearchState::Empty;
                Ok(())
            }
            Ok(hits) => {
                surface.show_search_results(&hits);
                self.hits = hits;
                self.shown_query = Some(query);
                self.state = SearchState::Showing;
                Ok(())
            }
            Err(e) => {
                surface.notify(&Notice::error(e.to_string()));
                self.dismiss(surface);
                Err(e.into())
            }
        }
    }

    /// Whether a result set for `query` is still worth showing.
    ///
    /// Stale when the input has moved on to a different query since the
    /// request was issued.
    pub fn is_current(&self, query: &str) -> bool {
        self.pending_query.is_none() && self.shown_query.as_deref() == Some(query)
    }

    /// A result row was picked; add it to the cart and reset the input.
    pub fn on_select<B: PosBackend, S: Surface>(
        &mut self,
        backend: &mut B,
        surface: &mut S,
        cart: &mut CartController,
        index: usize,
    ) -> Result<(), PosError> {
        let hit = self
            .hits
            .get(index)
            .cloned()
            .ok_or(PosError::UnknownResult(index))?;

        cart.add_product(backend, surface, &hit.product_id(), 1)?;

        surface.clear_input(Target::SearchInput);
        surface.focus(Target::SearchInput);
        self.dismiss(surface);
        Ok(())
    }

    /// Hide the dropdown and return to idle.
    pub fn dismiss<S: Surface>(&mut self, surface: &mut S) {
        surface.set_visible(Target::SearchResults, false);
        self.hits.clear();
        self.shown_query = None;
        self.state = SearchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::surface::RecordingSurface;
    use pos_gateway::GatewayError;

    /// Timer that records arms and cancels without any clock.
    #[derive(Default)]
    struct FakeTimer {
        armed: bool,
        starts: usize,
        cancels: usize,
    }

    impl DebounceTimer for FakeTimer {
        fn start(&mut self, _window: Duration) {
            self.armed = true;
            self.starts += 1;
        }

        fn cancel(&mut self) {
            self.armed = false;
            self.cancels += 1;
        }
    }

    /// Backend serving a fixed catalog, recording queries.
    #[derive(Default)]
    struct CatalogBackend {
        catalog: Vec<ProductHit>,
        queries: Vec<String>,
        fail_next: bool,
    }

    impl CatalogBackend {
        fn with_products(names: &[&str]) -> Self {
            let catalog = names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let json = serde_json::json!({
                        "id": i + 1,
                        "name": name,
                        "price": "25.50",
                        "stock": 10,
                    });
                    serde_json::from_value(json).unwrap()
                })
                .collect();
            Self {
                catalog,
                ..Self::default()
            }
        }
    }

    impl PosBackend for CatalogBackend {
        fn search_products(&mut self, query: &str) -> Result<Vec<ProductHit>, GatewayError> {
            self.queries.push(query.to_string());
            if self.fail_next {
                self.fail_next = false;
                return Err(GatewayError::Transport("connection reset".into()));
            }
            Ok(self
                .catalog
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&query.to_lowercase()))
                .cloned()
                .collect())
        }

        fn add_to_cart(
            &mut self,
            _product_id: &crate::ids::ProductId,
            _quantity: i64,
        ) -> Result<crate::api::CartTotalsWire, GatewayError> {
            let body = serde_json::json!({
                "status": "success",
                "message": "Added to cart",
                "cart_count": 1,
                "cart_total": 25.5,
                "cart_tax": 2.55,
                "cart_final_total": 28.05,
            });
            Ok(serde_json::from_value(body).unwrap())
        }

        fn update_cart(
            &mut self,
            _line_id: &crate::ids::CartLineId,
            _quantity: i64,
        ) -> Result<crate::api::CartTotalsWire, GatewayError> {
            unimplemented!()
        }

        fn remove_from_cart(
            &mut self,
            _line_id: &crate::ids::CartLineId,
        ) -> Result<crate::api::CartTotalsWire, GatewayError> {
            unimplemented!()
        }

        fn clear_cart(&mut self) -> Result<crate::api::CartTotalsWire, GatewayError> {
            unimplemented!()
        }

        fn checkout(
            &mut self,
            _request: &crate::api::CheckoutRequest,
        ) -> Result<crate::api::CheckoutWire, GatewayError> {
            unimplemented!()
        }

        fn cart_fragment(&mut self) -> Result<String, GatewayError> {
            Ok(String::new())
        }
    }

    fn panel() -> SearchPanel {
        SearchPanel::new(&TerminalConfig::default())
    }

    #[test]
    fn test_short_query_never_arms_timer() {
        let mut panel = panel();
        let mut timer = FakeTimer::default();
        let mut surface = RecordingSurface::new();

        panel.on_input(&mut timer, &mut surface, "c");
        assert!(!timer.armed);
        assert_eq!(panel.state(), SearchState::Idle);
    }

    #[test]
    fn test_burst_of_keystrokes_issues_one_query() {
        let mut panel = panel();
        let mut timer = FakeTimer::default();
        let mut surface = RecordingSurface::new();
        let mut backend = CatalogBackend::with_products(&["Cola 330ml", "Cola 1L"]);

        for text in ["co", "col", "cola"] {
            panel.on_input(&mut timer, &mut surface, text);
        }
        assert_eq!(timer.starts, 3);
        assert!(timer.armed);

        panel.on_debounce_elapsed(&mut backend, &mut surface).unwrap();
        assert_eq!(backend.queries, vec!["cola"]);
        assert_eq!(panel.state(), SearchState::Showing);
        assert_eq!(surface.search_results.len(), 2);
    }

    #[test]
    fn test_shrinking_below_minimum_cancels_pending_query() {
        let mut panel = panel();
        let mut timer = FakeTimer::default();
        let mut surface = RecordingSurface::new();
        let mut backend = CatalogBackend::with_products(&["Cola 330ml"]);

        panel.on_input(&mut timer, &mut surface, "co");
        panel.on_input(&mut timer, &mut surface, "c");
        assert!(!timer.armed);

        // A fire that raced the cancel is a no-op.
        panel.on_debounce_elapsed(&mut backend, &mut surface).unwrap();
        assert!(backend.queries.is_empty());
        assert_eq!(panel.state(), SearchState::Idle);
    }

    #[test]
    fn test_no_matches_shows_empty_message() {
        let mut panel = panel();
        let mut timer = FakeTimer::default();
        let mut surface = RecordingSurface::new();
        let mut backend = CatalogBackend::with_products(&["Cola 330ml"]);

        panel.on_input(&mut timer, &mut surface, "zz");
        panel.on_debounce_elapsed(&mut backend, &mut surface).unwrap();

        assert!(surface.no_products_shown);
        assert_eq!(panel.state(), SearchState::Empty);
    }

    #[test]
    fn test_search_failure_notifies_and_resets() {
        let mut panel = panel();
        let mut timer = FakeTimer::default();
        let mut surface = RecordingSurface::new();
        let mut backend = CatalogBackend::with_products(&["Cola 330ml"]);
        backend.fail_next = true;

        panel.on_input(&mut timer, &mut surface, "cola");
        let err = panel
            .on_debounce_elapsed(&mut backend, &mut surface)
            .unwrap_err();

        assert!(!err.is_local());
        assert!(surface.last_notice().unwrap().is_error());
        assert_eq!(panel.state(), SearchState::Idle);
    }

    #[test]
    fn test_select_adds_to_cart_and_resets_input() {
        let mut panel = panel();
        let mut timer = FakeTimer::default();
        let mut surface = RecordingSurface::new();
        let mut backend = CatalogBackend::with_products(&["Cola 330ml"]);
        let mut cart = CartController::new(Currency::PHP);

        panel.on_input(&mut timer, &mut surface, "cola");
        panel.on_debounce_elapsed(&mut backend, &mut surface).unwrap();
        panel
            .on_select(&mut backend, &mut surface, &mut cart, 0)
            .unwrap();

        assert_eq!(surface.text(&Target::CartCount), Some("1"));
        assert!(surface.cleared_inputs.contains(&Target::SearchInput));
        assert_eq!(surface.last_focus(), Some(&Target::SearchInput));
        assert_eq!(panel.state(), SearchState::Idle);
        assert!(!surface.is_visible(&Target::SearchResults));
    }

    #[test]
    fn test_stale_results_detected() {
        let mut panel = panel();
        let mut timer = FakeTimer::default();
        let mut surface = RecordingSurface::new();
        let mut backend = CatalogBackend::with_products(&["Cola 330ml"]);

        panel.on_input(&mut timer, &mut surface, "cola");
        panel.on_debounce_elapsed(&mut backend, &mut surface).unwrap();
        assert!(panel.is_current("cola"));

        // Typing again makes the shown results stale.
        panel.on_input(&mut timer, &mut surface, "chips");
        assert!(!panel.is_current("cola"));
    }
}

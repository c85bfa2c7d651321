//! Product card grid with category filtering.
//!
//! The terminal page shows the catalog as a grid of product cards with
//! a category bar above it. Filtering is purely client-side over the
//! loaded products; tapping a card scans one unit of that product
//! through the same add-to-cart reconciliation as search selection.

use crate::api::{PosBackend, ProductHit};
use crate::cart::CartController;
use crate::error::PosError;
use crate::ids::ProductId;
use crate::surface::Surface;
use tracing::debug;

/// The catalog grid and its active category filter.
pub struct ProductGrid {
    products: Vec<ProductHit>,
    /// Active category label; `None` shows everything.
    category: Option<String>,
}

impl ProductGrid {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            category: None,
        }
    }

    /// The active category label, when one is selected.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Unique category labels across the loaded products, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .products
            .iter()
            .map(|p| p.category_label())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Replace the loaded catalog and re-render the grid.
    pub fn set_products<S: Surface>(&mut self, surface: &mut S, products: Vec<ProductHit>) {
        self.products = products;
        self.render(surface);
    }

    /// Switch the active category filter and re-render.
    pub fn select_category<S: Surface>(&mut self, surface: &mut S, category: Option<&str>) {
        self.category = category.map(str::to_string);
        debug!(category = category.unwrap_or("all"), "category filter");
        self.render(surface);
    }

    /// The products passing the active filter, in catalog order.
    pub fn visible(&self) -> Vec<&ProductHit> {
        self.products
            .iter()
            .filter(|p| match &self.category {
                Some(label) => p.category_label() == label,
                None => true,
            })
            .collect()
    }

    /// A card was tapped; scan one unit of the product.
    pub fn on_card_select<B: PosBackend, S: Surface>(
        &self,
        backend: &mut B,
        surface: &mut S,
        cart: &mut CartController,
        product_id: &ProductId,
    ) -> Result<(), PosError> {
        if !self.products.iter().any(|p| &p.product_id() == product_id) {
            return Err(PosError::UnknownProduct(product_id.clone()));
        }
        cart.add_product(backend, surface, product_id, 1)
    }

    fn render<S: Surface>(&self, surface: &mut S) {
        let visible: Vec<ProductHit> = self.visible().into_iter().cloned().collect();
        surface.set_active_category(self.category.as_deref());
        surface.show_product_cards(&visible);
    }
}

impl Default for ProductGrid {
    fn default() -> Self {
        Self::new()
    }
}

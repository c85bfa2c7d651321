//! Point-of-sale terminal client.
//!
//! The interactive layer of a POS web terminal, kept independent of any
//! particular page or transport:
//!
//! - **Cart**: server-confirmed totals, line reconciliation, per-line
//!   mutation serialization
//! - **Search**: debounced product lookup with a cancellable timer seam
//! - **Grid**: category-filtered product cards with tap-to-scan
//! - **Checkout**: modal flow, cash validation, success handoff
//! - **Surface**: typed widget handles with no-op defaults, so partial
//!   pages degrade silently
//!
//! The server stays the system of record: every displayed total is the
//! most recent server-confirmed value, never a local computation.
//!
//! # Example
//!
//! ```rust,ignore
//! use pos_client::prelude::*;
//!
//! let config = TerminalConfig::default();
//! let gateway = Gateway::new().with_base_url("https://pos.example.test");
//! let mut backend = HttpBackend::new(gateway, config.routes.clone());
//!
//! let mut cart = CartController::new(config.currency);
//! let mut checkout = CheckoutFlow::new(config.currency);
//!
//! cart.add_product(&mut backend, &mut surface, &"42".into(), 1)?;
//! checkout.open(&mut surface, &cart)?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod grid;
pub mod hotkeys;
pub mod notify;
pub mod search;
pub mod surface;

pub use error::PosError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::PosError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::api::{HttpBackend, PosBackend, ProductHit};
    pub use crate::cart::{CartController, CartLine, CartSummary, CartView, QuantityAction};
    pub use crate::checkout::{
        CashFieldState, CheckoutFlow, CheckoutOutcome, CheckoutState, PaymentMethod,
    };
    pub use crate::config::{ApiRoutes, TerminalConfig};
    pub use crate::grid::ProductGrid;
    pub use crate::hotkeys::Shortcut;
    pub use crate::notify::{Notice, Severity};
    pub use crate::search::{DebounceTimer, SearchPanel, SearchState};
    pub use crate::surface::{FieldIndicator, Surface, Target};

    pub use pos_gateway::{Gateway, GatewayError, ServerErrorKind};
}

//! Wire contract with the POS server.
//!
//! DTOs mirror the server's JSON shapes exactly; ingestion converts
//! decimal wire amounts into cents-based [`Money`]. The [`PosBackend`]
//! trait is the seam between the client components and the HTTP
//! gateway, so tests can script responses without a transport.

use crate::cart::CartSummary;
use crate::checkout::CheckoutOutcome;
use crate::config::ApiRoutes;
use crate::ids::{CartLineId, ProductId};
use crate::money::{Currency, Money};
use pos_gateway::{Envelope, Gateway, GatewayError};
use serde::{Deserialize, Serialize};

/// A product row from the search endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProductHit {
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub stock: i64,
    /// Decimal price, sent as a string on the wire.
    pub price: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductHit {
    /// The product id, normalized to a string.
    pub fn product_id(&self) -> ProductId {
        match &self.id {
            serde_json::Value::String(s) => ProductId::new(s.clone()),
            other => ProductId::new(other.to_string()),
        }
    }

    /// The unit price in the terminal's currency. An unparseable wire
    /// value renders as zero rather than failing the whole result list.
    pub fn unit_price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price.parse().unwrap_or(0.0), currency)
    }

    /// Category label, with the server's fallback for uncategorized rows.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }
}

/// Response body of the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchWire {
    pub products: Vec<ProductHit>,
}

/// Envelope plus cart summary fields, returned by every cart mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct CartTotalsWire {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub cart_count: i64,
    #[serde(default)]
    pub cart_total: f64,
    #[serde(default)]
    pub cart_tax: f64,
    #[serde(default)]
    pub cart_final_total: f64,
}

impl CartTotalsWire {
    /// Convert the wire totals into a displayable summary.
    pub fn summary(&self, currency: Currency) -> CartSummary {
        CartSummary {
            item_count: self.cart_count,
            subtotal: Money::from_decimal(self.cart_total, currency),
            tax: Money::from_decimal(self.cart_tax, currency),
            total: Money::from_decimal(self.cart_final_total, currency),
        }
    }
}

/// Cash shortage breakdown on a rejected checkout.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShortageDetails {
    pub total_required: f64,
    pub amount_given: f64,
    pub shortage: f64,
}

/// Response body of the checkout endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutWire {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub sale_number: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub change_amount: Option<f64>,
    #[serde(default)]
    pub details: Option<ShortageDetails>,
}

impl CheckoutWire {
    /// Convert a successful checkout response into an outcome.
    ///
    /// Returns a transport error when the success envelope is missing
    /// its sale fields.
    pub fn outcome(&self, currency: Currency) -> Result<CheckoutOutcome, GatewayError> {
        let sale_number = self
            .sale_number
            .clone()
            .ok_or_else(|| GatewayError::Transport("checkout response missing sale_number".into()))?;
        let total_amount = self
            .total_amount
            .ok_or_else(|| GatewayError::Transport("checkout response missing total_amount".into()))?;
        Ok(CheckoutOutcome {
            sale_number,
            total_amount: Money::from_decimal(total_amount, currency),
            change_amount: Money::from_decimal(self.change_amount.unwrap_or(0.0), currency),
        })
    }
}

/// Add-to-cart request body.
#[derive(Debug, Clone, Serialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Update-cart request body.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCartRequest {
    pub cart_id: String,
    pub quantity: i64,
}

/// Remove-from-cart request body.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveFromCartRequest {
    pub cart_id: String,
}

/// Checkout request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutRequest {
    pub payment_method: String,
    pub amount_paid: f64,
}

/// The fixed endpoint set the client consumes.
///
/// Implementations perform the call and the envelope classification;
/// callers receive either parsed wire data or a [`GatewayError`].
pub trait PosBackend {
    fn search_products(&mut self, query: &str) -> Result<Vec<ProductHit>, GatewayError>;
    fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartTotalsWire, GatewayError>;
    fn update_cart(
        &mut self,
        line_id: &CartLineId,
        quantity: i64,
    ) -> Result<CartTotalsWire, GatewayError>;
    fn remove_from_cart(&mut self, line_id: &CartLineId) -> Result<CartTotalsWire, GatewayError>;
    fn clear_cart(&mut self) -> Result<CartTotalsWire, GatewayError>;
    fn checkout(&mut self, request: &CheckoutRequest) -> Result<CheckoutWire, GatewayError>;
    fn cart_fragment(&mut self) -> Result<String, GatewayError>;
}

/// [`PosBackend`] over the HTTP gateway.
pub struct HttpBackend {
    gateway: Gateway,
    routes: ApiRoutes,
}

impl HttpBackend {
    pub fn new(gateway: Gateway, routes: ApiRoutes) -> Self {
        Self { gateway, routes }
    }

    fn post_totals<T: Serialize>(
        &self,
        path: &str,
        payload: Option<&T>,
    ) -> Result<CartTotalsWire, GatewayError> {
        let mut request = self.gateway.post(path);
        if let Some(payload) = payload {
            request = request.json(payload)?;
        }
        let body: CartTotalsWire = request.send()?.error_for_status()?.json()?;
        body.envelope.check()?;
        Ok(body)
    }
}

impl PosBackend for HttpBackend {
    fn search_products(&mut self, query: &str) -> Result<Vec<ProductHit>, GatewayError> {
        let wire: SearchWire = self
            .gateway
            .get(self.routes.search.as_str())
            .query("q", query)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(wire.products)
    }

    fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartTotalsWire, GatewayError> {
        let payload = AddToCartRequest {
            product_id: product_id.as_str().to_string(),
            quantity,
        };
        self.post_totals(&self.routes.add_to_cart.clone(), Some(&payload))
    }

    fn update_cart(
        &mut self,
        line_id: &CartLineId,
        quantity: i64,
    ) -> Result<CartTotalsWire, GatewayError> {
        let payload = UpdateCartRequest {
            cart_id: line_id.as_str().to_string(),
            quantity,
        };
        self.post_totals(&self.routes.update_cart.clone(), Some(&payload))
    }

    fn remove_from_cart(&mut self, line_id: &CartLineId) -> Result<CartTotalsWire, GatewayError> {
        let payload = RemoveFromCartRequest {
            cart_id: line_id.as_str().to_string(),
        };
        self.post_totals(&self.routes.remove_from_cart.clone(), Some(&payload))
    }

    fn clear_cart(&mut self) -> Result<CartTotalsWire, GatewayError> {
        self.post_totals::<()>(&self.routes.clear_cart.clone(), None)
    }

    fn checkout(&mut self, request: &CheckoutRequest) -> Result<CheckoutWire, GatewayError> {
        let body: CheckoutWire = self
            .gateway
            .post(self.routes.checkout.as_str())
            .json(request)?
            .send()?
            .error_for_status()?
            .json()?;
        // Checkout failures carry sale context the caller needs; the
        // envelope is classified by the checkout flow instead.
        Ok(body)
    }

    fn cart_fragment(&mut self) -> Result<String, GatewayError> {
        self.gateway
            .get(self.routes.cart_fragment.as_str())
            .header("X-Requested-With", "XMLHttpRequest")
            .send()?
            .error_for_status()?
            .text()
    }
}

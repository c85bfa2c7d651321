//! HTTP request gateway for the POS terminal client.
//!
//! Wraps outbound calls to the POS server: builder-style request
//! construction, JSON encoding/decoding, and the session anti-forgery
//! token on every mutating call. All failures come back as values; see
//! [`GatewayError`] for the taxonomy.
//!
//! # Example
//!
//! ```rust,ignore
//! use pos_gateway::{Envelope, Gateway};
//!
//! let gateway = Gateway::new()
//!     .with_base_url("https://pos.example.com")
//!     .with_antiforgery_token(token);
//!
//! let resp = gateway
//!     .post("/pos/clear-cart/")
//!     .send()?
//!     .error_for_status()?;
//! let envelope: Envelope = resp.json()?;
//! envelope.check()?;
//! ```

mod envelope;
mod error;
mod request;
mod response;

pub use envelope::Envelope;
pub use error::{GatewayError, ServerErrorKind};
pub use request::{Method, RequestBuilder};
pub use response::Response;

/// Header carrying the anti-forgery token on mutating requests.
pub const ANTIFORGERY_HEADER: &str = "X-CSRFToken";

/// Cookie the server stores the anti-forgery token in.
pub const ANTIFORGERY_COOKIE: &str = "csrftoken";

/// Extract a named cookie value from a `Cookie` header string.
///
/// Returns `None` when the cookie is absent or empty.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// HTTP client for the POS server.
///
/// Holds the base URL and the per-session anti-forgery token; the token
/// is attached as a header to every mutating request built through this
/// client.
pub struct Gateway {
    base_url: Option<String>,
    antiforgery_token: Option<String>,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway {
    /// Create a new gateway.
    pub fn new() -> Self {
        Self {
            base_url: None,
            antiforgery_token: None,
        }
    }

    /// Set a base URL prepended to relative request paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the session anti-forgery token.
    pub fn with_antiforgery_token(mut self, token: impl Into<String>) -> Self {
        self.antiforgery_token = Some(token.into());
        self
    }

    /// Read the anti-forgery token out of a `Cookie` header string.
    pub fn with_token_from_cookies(self, cookie_header: &str) -> Self {
        match cookie_value(cookie_header, ANTIFORGERY_COOKIE) {
            Some(token) => {
                let token = token.to_string();
                self.with_antiforgery_token(token)
            }
            None => {
                tracing::warn!("anti-forgery cookie not found; mutations will be rejected");
                self
            }
        }
    }

    /// Create a GET request.
    pub fn get(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, path)
    }

    /// Create a request with the given method.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ClientRequestBuilder {
        let path = path.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if path.starts_with("http://") || path.starts_with("https://") {
                    path
                } else {
                    format!("{}{}", base.trim_end_matches('/'), path)
                }
            }
            None => path,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        if method.is_mutating() {
            if let Some(token) = &self.antiforgery_token {
                builder = builder.header(ANTIFORGERY_HEADER, token.clone());
            }
        }

        ClientRequestBuilder { builder }
    }
}

/// A request builder bound to a gateway.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, GatewayError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// The request under construction, for inspection.
    pub fn inner(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response.
    #[cfg(target_arch = "wasm32")]
    pub fn send(self) -> Result<Response, GatewayError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match self.builder.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
        };

        tracing::debug!(url = %self.builder.url, method = method_name(&self.builder.method), "dispatching request");

        let mut request = Request::builder();
        request.method(method);
        request.uri(&self.builder.url);

        for (key, value) in &self.builder.headers {
            request.header(key.as_str(), value.as_str());
        }

        let request = if let Some(body) = self.builder.body {
            request
                .body(body)
                .map_err(|e| GatewayError::Transport(e.to_string()))?
        } else {
            request.build()
        };

        let response =
            spin_sdk::http::send(request).map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let headers: std::collections::HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(Response::new(status, headers, body))
    }

    /// Send the request and return the response (non-WASM stub).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn send(self) -> Result<Response, GatewayError> {
        // Empty success response for non-WASM builds (testing/development)
        Ok(Response::new(
            200,
            std::collections::HashMap::new(),
            Vec::new(),
        ))
    }
}

#[cfg(target_arch = "wasm32")]
fn method_name(method: &Method) -> &'static str {
    method.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_found() {
        let header = "sessionid=abc123; csrftoken=tok-456; theme=dark";
        assert_eq!(cookie_value(header, "csrftoken"), Some("tok-456"));
    }

    #[test]
    fn test_cookie_value_missing() {
        assert_eq!(cookie_value("sessionid=abc123", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_value_empty_is_none() {
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
    }

    #[test]
    fn test_mutating_request_carries_token() {
        let gateway = Gateway::new().with_antiforgery_token("tok-1");
        let request = gateway.post("/pos/clear-cart/");
        assert_eq!(
            request.inner().headers.get(ANTIFORGERY_HEADER).map(String::as_str),
            Some("tok-1")
        );
    }

    #[test]
    fn test_get_request_has_no_token() {
        let gateway = Gateway::new().with_antiforgery_token("tok-1");
        let request = gateway.get("/pos/api/search/");
        assert!(request.inner().headers.get(ANTIFORGERY_HEADER).is_none());
    }

    #[test]
    fn test_base_url_prepended() {
        let gateway = Gateway::new().with_base_url("https://pos.example.com/");
        let request = gateway.get("/pos/api/search/");
        assert_eq!(request.inner().url, "https://pos.example.com/pos/api/search/");
    }

    #[test]
    fn test_absolute_url_untouched() {
        let gateway = Gateway::new().with_base_url("https://pos.example.com");
        let request = gateway.get("https://other.example.com/x");
        assert_eq!(request.inner().url, "https://other.example.com/x");
    }

    #[test]
    fn test_token_from_cookie_header() {
        let gateway = Gateway::new().with_token_from_cookies("csrftoken=tok-9");
        let request = gateway.post("/pos/checkout/");
        assert_eq!(
            request.inner().headers.get(ANTIFORGERY_HEADER).map(String::as_str),
            Some("tok-9")
        );
    }
}

//! Gateway error taxonomy.

use thiserror::Error;

/// Machine-readable failure kinds the server reports alongside an error
/// envelope (`error_type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerErrorKind {
    /// Cash tendered is below the sale total.
    InsufficientCash,
    /// Cash amount missing, zero, or negative.
    InvalidAmount,
    /// Request payload failed server-side validation.
    Validation,
    /// Request body was malformed.
    Request,
    /// Any other server-reported failure.
    General,
}

impl ServerErrorKind {
    /// Parse the wire `error_type` value.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "insufficient_cash" => ServerErrorKind::InsufficientCash,
            "invalid_amount" => ServerErrorKind::InvalidAmount,
            "validation_error" => ServerErrorKind::Validation,
            "request_error" => ServerErrorKind::Request,
            _ => ServerErrorKind::General,
        }
    }

    /// Whether this failure concerns the cash amount field.
    pub fn is_cash_error(&self) -> bool {
        matches!(
            self,
            ServerErrorKind::InsufficientCash | ServerErrorKind::InvalidAmount
        )
    }
}

/// Errors returned by the request gateway.
///
/// Two classes only: the request never reached a well-formed answer
/// (`Transport`), or the server answered and reported a business failure
/// (`Application`). Nothing throws past this boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Network failure, non-success HTTP status, or an unparseable body.
    #[error("transport error: {0}")]
    Transport(String),

    /// Well-formed response whose embedded status is not "success".
    #[error("{message}")]
    Application {
        message: String,
        kind: Option<ServerErrorKind>,
    },
}

impl GatewayError {
    /// Build an application error from a server message and optional
    /// `error_type` wire value.
    pub fn application(message: impl Into<String>, error_type: Option<&str>) -> Self {
        GatewayError::Application {
            message: message.into(),
            kind: error_type.map(ServerErrorKind::from_wire),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    /// The server-reported kind, when this is an application error.
    pub fn kind(&self) -> Option<ServerErrorKind> {
        match self {
            GatewayError::Application { kind, .. } => *kind,
            GatewayError::Transport(_) => None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Transport(format!("invalid JSON: {e}"))
    }
}

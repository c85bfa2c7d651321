//! Server response envelope.
//!
//! Every JSON endpoint wraps its payload in `{status, message?, ...}`.
//! A 200 response can still carry a business failure; `Envelope::check`
//! turns that into an application error.

use crate::GatewayError;
use serde::Deserialize;

/// The status/message envelope embedded in every JSON response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Classify a non-success envelope as an application error.
    pub fn check(&self) -> Result<(), GatewayError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(GatewayError::application(
                self.message
                    .clone()
                    .unwrap_or_else(|| "operation failed".to_string()),
                self.error_type.as_deref(),
            ))
        }
    }
}

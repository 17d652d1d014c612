//! Response envelope handed to the transport layer.

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::catalog::FALLBACK_STATUS;
use crate::registry::{ErrorRecord, ErrorRegistry};

/// Body and status line of an error response.
///
/// Only `errors` is serialized; `status` is for the transport to put on
/// the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: u16,
    pub errors: Vec<ErrorRecord>,
}

impl ErrorResponse {
    pub fn from_registry(registry: &ErrorRegistry) -> Self {
        Self {
            status: registry.response_code(),
            errors: registry.errors().to_vec(),
        }
    }

    /// Consume a finished request's registry.
    pub fn from_owned_registry(registry: ErrorRegistry) -> Self {
        let status = registry.response_code();
        Self {
            status,
            errors: registry.into_errors(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(FALLBACK_STATUS)
    }
}

/// Axum integration: the resolved code becomes the status line.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp
    }
}

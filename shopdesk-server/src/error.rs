//! Server errors and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shopdesk_commerce::CommerceError;
use shopdesk_fetch::HttpError;
use thiserror::Error;
use tracing::warn;

/// Errors returned by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A commerce operation failed.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The server could not be configured or started.
    #[error("Startup error: {0}")]
    Startup(String),

    /// IO error while binding or serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// HTTP status for this error.
    ///
    /// Upstream statuses are passed through so callers can tell not-found
    /// from rate-limited from a server error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Commerce(err) => commerce_status(err),
            Self::Startup(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn commerce_status(err: &CommerceError) -> StatusCode {
    match err {
        CommerceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CommerceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        CommerceError::ProductNotFound { .. } => StatusCode::NOT_FOUND,
        CommerceError::Http(HttpError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
        CommerceError::Http(_) => StatusCode::BAD_GATEWAY,
        other => other
            .upstream_status()
            .filter(|status| (400..600).contains(status))
            .and_then(|status| StatusCode::from_u16(status).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Commerce(err) => {
                warn!(kind = err.kind(), status = status.as_u16(), error = %err, "Request failed");
                json!({
                    "error": err.kind(),
                    "message": err.to_string(),
                    "upstreamStatus": err.upstream_status(),
                    "debug": {
                        "tokenAttempts": err.token_trail(),
                        "orderFetchAttempts": err.fetch_trail(),
                    },
                })
            }
            other => json!({
                "error": "internal_error",
                "message": other.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

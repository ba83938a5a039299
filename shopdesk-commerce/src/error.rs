//! Commerce client errors.

use chrono::NaiveDate;
use serde_json::Value;
use shopdesk_core::{CoreError, DiagnosticTrail};
use shopdesk_fetch::HttpError;
use thiserror::Error;

/// Errors surfaced by commerce operations.
///
/// Per-day exhaustion and search misses are not errors; they are recorded
/// in the listing diagnostics and the resolver outcome respectively.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// Missing or malformed credentials. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller's request cannot be served.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No token-attempt candidate yielded a token.
    #[error("Token acquisition failed after {attempts} attempts (last status: {last_status:?})")]
    AuthenticationExhausted {
        /// Number of candidates sent.
        attempts: usize,
        /// Last non-success status.
        last_status: Option<u16>,
        /// Every attempt and its raw response.
        trail: DiagnosticTrail,
    },

    /// The platform answered 401/403 to a data request.
    #[error("Authorization rejected with HTTP {status}")]
    HardAuthorizationFailure {
        /// 401 or 403.
        status: u16,
        /// Day being fetched, for order listings.
        day: Option<NaiveDate>,
        /// Token attempts made before the rejection.
        token_trail: DiagnosticTrail,
        /// Data requests made before the rejection, inclusive.
        fetch_trail: DiagnosticTrail,
    },

    /// Every day of a listing failed.
    #[error("No day produced data (last status: {last_status:?})")]
    TotalFailure {
        /// Status of the last failed response.
        last_status: Option<u16>,
        /// Days attempted.
        failed_days: Vec<NaiveDate>,
        /// Token attempts.
        token_trail: DiagnosticTrail,
        /// Every order-fetch candidate sent.
        fetch_trail: DiagnosticTrail,
    },

    /// The product detail endpoint did not know the identifier.
    #[error("Product {origin_product_id} not found")]
    ProductNotFound {
        /// Identifier that was fetched.
        origin_product_id: String,
        /// Upstream status.
        status: u16,
        /// Upstream body.
        body: Value,
    },

    /// Any other non-success upstream response.
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus {
        /// Upstream status.
        status: u16,
        /// Upstream body.
        body: Value,
    },

    /// The request never got a response.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

impl CommerceError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::InvalidRequest(_) => "invalid_request",
            Self::AuthenticationExhausted { .. } => "authentication_exhausted",
            Self::HardAuthorizationFailure { .. } => "hard_authorization_failure",
            Self::TotalFailure { .. } => "total_failure",
            Self::ProductNotFound { .. } => "product_not_found",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::Http(_) => "transport_error",
        }
    }

    /// The upstream HTTP status this error preserves, if any.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationExhausted { last_status, .. }
            | Self::TotalFailure { last_status, .. } => *last_status,
            Self::HardAuthorizationFailure { status, .. }
            | Self::ProductNotFound { status, .. }
            | Self::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Token attempts carried by this error.
    pub fn token_trail(&self) -> Option<&DiagnosticTrail> {
        match self {
            Self::AuthenticationExhausted { trail, .. } => Some(trail),
            Self::HardAuthorizationFailure { token_trail, .. }
            | Self::TotalFailure { token_trail, .. } => Some(token_trail),
            _ => None,
        }
    }

    /// Data-request attempts carried by this error.
    pub fn fetch_trail(&self) -> Option<&DiagnosticTrail> {
        match self {
            Self::HardAuthorizationFailure { fetch_trail, .. }
            | Self::TotalFailure { fetch_trail, .. } => Some(fetch_trail),
            _ => None,
        }
    }
}

impl From<CoreError> for CommerceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig(msg) => CommerceError::Configuration(msg),
            other => CommerceError::InvalidRequest(other.to_string()),
        }
    }
}

//! JSON output formatting.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use shopdesk_commerce::{CommerceError, ProductLookup, Resolution, TokenAcquisition};
use shopdesk_core::{AttemptCandidate, DiagnosticTrail, Product, Token};

use super::describe_miss;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a product lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOutput<'a> {
    pub input: &'a str,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub product: &'a Product,
}

impl<'a> ProductOutput<'a> {
    pub fn new(lookup: &'a ProductLookup) -> Self {
        let (input, fallback_reason) = match &lookup.resolution {
            Resolution::Resolved { input, .. } => (input.as_str(), None),
            Resolution::Fallback { input, reason } => (input.as_str(), Some(describe_miss(reason))),
        };
        Self {
            input,
            resolved: lookup.resolution.is_resolved(),
            fallback_reason,
            product: &lookup.product,
        }
    }
}

/// JSON output for a token acquisition. The token itself is never printed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutput<'a> {
    pub store: &'a str,
    pub candidate: &'a str,
    pub token: &'a Token,
    pub attempts: &'a DiagnosticTrail,
}

impl<'a> AuthOutput<'a> {
    pub fn new(store: &'a str, acquisition: &'a TokenAcquisition) -> Self {
        Self {
            store,
            candidate: &acquisition.candidate,
            token: &acquisition.token,
            attempts: &acquisition.trail,
        }
    }
}

/// JSON output for the token-attempt plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutput<'a> {
    pub store: &'a str,
    pub secret_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_error: Option<String>,
    pub attempts: &'a [AttemptCandidate],
}

/// JSON error envelope, the same shape the server returns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput<'a> {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<ErrorDebug<'a>>,
}

/// Attempts carried by an error.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDebug<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_attempts: Option<&'a DiagnosticTrail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fetch_attempts: Option<&'a DiagnosticTrail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_days: Option<&'a [NaiveDate]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_body: Option<&'a Value>,
}

impl<'a> ErrorOutput<'a> {
    pub fn new(err: &'a CommerceError) -> Self {
        let failed_days = match err {
            CommerceError::TotalFailure { failed_days, .. } => Some(failed_days.as_slice()),
            _ => None,
        };
        let upstream_body = match err {
            CommerceError::ProductNotFound { body, .. } | CommerceError::UpstreamStatus { body, .. } => {
                Some(body)
            }
            _ => None,
        };
        let debug = ErrorDebug {
            token_attempts: err.token_trail(),
            order_fetch_attempts: err.fetch_trail(),
            failed_days,
            upstream_body,
        };
        let has_debug = debug.token_attempts.is_some()
            || debug.order_fetch_attempts.is_some()
            || debug.upstream_body.is_some();

        Self {
            error: err.kind(),
            message: err.to_string(),
            upstream_status: err.upstream_status(),
            debug: has_debug.then_some(debug),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}

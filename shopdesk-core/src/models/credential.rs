//! Credential and token types.
//!
//! This module contains the inputs and outputs of token acquisition:
//! - [`Credential`] - Application credentials for one store
//! - [`AttemptCandidate`] - A single parameter set probed against the token endpoint
//! - [`Token`] - The access token returned on success

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::CoreError;

// ============================================================================
// Credential
// ============================================================================

/// Application credentials for the commerce platform.
///
/// Built once from configuration and passed by value into the client; the
/// protocol code never reads credentials from the environment itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Application (client) identifier.
    pub application_id: String,
    /// Application secret. Doubles as the salt of the signature hash.
    pub secret: String,
    /// Solution identifier for partner-solution accounts.
    pub solution_id: Option<String>,
    /// Seller account identifier.
    pub account_id: Option<String>,
}

impl Credential {
    /// Creates a credential without solution or account identifiers.
    pub fn new(application_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into().trim().to_string(),
            secret: secret.into().trim().to_string(),
            solution_id: None,
            account_id: None,
        }
    }

    /// Sets the solution identifier. Blank values are treated as absent.
    #[must_use]
    pub fn with_solution_id(mut self, solution_id: Option<String>) -> Self {
        self.solution_id = non_blank(solution_id);
        self
    }

    /// Sets the account identifier. Blank values are treated as absent.
    #[must_use]
    pub fn with_account_id(mut self, account_id: Option<String>) -> Self {
        self.account_id = non_blank(account_id);
        self
    }

    /// Returns the solution identifier, if configured.
    pub fn solution_id(&self) -> Option<&str> {
        self.solution_id.as_deref()
    }

    /// Checks that the required identifiers are present.
    ///
    /// The salt format of the secret is checked by the signature generator.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the application id or secret is empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.application_id.is_empty() {
            return Err(CoreError::InvalidConfig(
                "application id is missing".to_string(),
            ));
        }
        if self.secret.is_empty() {
            return Err(CoreError::InvalidConfig(
                "application secret is missing".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("application_id", &self.application_id)
            .field("secret", &"<redacted>")
            .field("solution_id", &self.solution_id)
            .field("account_id", &self.account_id)
            .finish()
    }
}

// ============================================================================
// Attempt Matrix Dimensions
// ============================================================================

/// Account-type tag sent with a token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// The seller's own application credentials.
    #[serde(rename = "SELF")]
    SelfCredential,
    /// Credentials issued through a partner solution.
    Solution,
}

impl AccountType {
    /// Returns the wire value of the `type` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfCredential => "SELF",
            Self::Solution => "SOLUTION",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Granularity of the signed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPrecision {
    /// Unix epoch milliseconds.
    Millis,
    /// Unix epoch seconds.
    Seconds,
}

impl TimestampPrecision {
    /// Short label used in attempt names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Millis => "ms",
            Self::Seconds => "sec",
        }
    }

    /// Renders an epoch-millisecond instant at this precision.
    pub fn render(&self, epoch_millis: i64) -> String {
        match self {
            Self::Millis => epoch_millis.to_string(),
            Self::Seconds => (epoch_millis / 1000).to_string(),
        }
    }
}

// ============================================================================
// Attempt Candidate
// ============================================================================

/// One immutable parameter set for a token request.
///
/// Candidates are produced in a fixed order by the attempt plan; the `name`
/// is what shows up in the diagnostic trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptCandidate {
    /// Diagnostic label, unique within a plan.
    pub name: String,
    /// Value sent as `client_id`.
    pub client_id: String,
    /// Value sent as `type`.
    pub account_type: AccountType,
    /// Precision of `timestamp_text`.
    pub precision: TimestampPrecision,
    /// Value sent as `timestamp`.
    pub timestamp_text: String,
    /// The password that gets hashed: `{client_id}_{timestamp_text}`.
    pub signature_password_seed: String,
    /// Additional form parameters (e.g. `solutionId`).
    pub extra_params: Vec<(String, String)>,
}

// ============================================================================
// Token
// ============================================================================

/// An access token issued by the token endpoint.
///
/// Tokens are never cached; each logical operation acquires its own.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// The bearer token.
    #[serde(skip_serializing)]
    pub access_token: String,
    /// Token type, usually `Bearer`.
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: Option<u64>,
    /// Granted scope.
    pub scope: Option<String>,
}

impl Token {
    /// Extracts a token from a token-endpoint JSON body.
    ///
    /// Returns `None` unless the body carries a non-empty `access_token`
    /// string. `expires_in` is accepted as a number or numeric string.
    pub fn from_json(body: &Value) -> Option<Self> {
        let access_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())?
            .to_string();

        let token_type = body
            .get("token_type")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or("Bearer")
            .to_string();

        let expires_in = body.get("expires_in").and_then(|v| match v {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

        let scope = body
            .get("scope")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        Some(Self {
            access_token,
            token_type,
            expires_in,
            scope,
        })
    }

    /// Returns the value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

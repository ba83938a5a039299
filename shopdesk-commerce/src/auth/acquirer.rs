//! Token acquisition.
//!
//! Every logical operation acquires a fresh token by walking the attempt
//! plan. All signatures are computed before the first request, so a
//! malformed secret never reaches the network.

use async_trait::async_trait;
use serde_json::Value;
use shopdesk_core::{AttemptCandidate, Credential, DiagnosticTrail, Token};
use shopdesk_fetch::{
    AttemptReport, Candidate, CandidatePipeline, CandidateRunner, FetchContext, FetchError,
    HttpRequest, HttpTransport,
};
use tracing::{debug, info, instrument, warn};

use super::plan::AttemptPlan;
use super::signature::SignatureGenerator;
use crate::api::Endpoints;
use crate::error::CommerceError;

/// An attempt candidate with its signature computed.
#[derive(Debug, Clone)]
pub struct SignedAttempt {
    /// The unsigned candidate.
    pub candidate: AttemptCandidate,
    signature: String,
}

impl SignedAttempt {
    /// Signs `candidate` with `signer`.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Configuration`] if hashing fails.
    pub fn sign(
        candidate: AttemptCandidate,
        signer: &SignatureGenerator,
    ) -> Result<Self, CommerceError> {
        let signature = signer.sign(&candidate.client_id, &candidate.timestamp_text)?;
        Ok(Self {
            candidate,
            signature,
        })
    }

    /// The base64 signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Form parameters for the token request.
    pub fn form(&self, account_id: Option<&str>) -> Vec<(String, String)> {
        let c = &self.candidate;
        let mut form = vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), c.client_id.clone()),
            ("timestamp".to_string(), c.timestamp_text.clone()),
            ("client_secret_sign".to_string(), self.signature.clone()),
            ("type".to_string(), c.account_type.as_str().to_string()),
        ];
        if let Some(account_id) = account_id {
            form.push(("account_id".to_string(), account_id.to_string()));
        }
        form.extend(c.extra_params.iter().cloned());
        form
    }
}

impl Candidate for SignedAttempt {
    fn label(&self) -> String {
        self.candidate.name.clone()
    }
}

/// A token plus the attempts it took.
#[derive(Debug, Clone)]
pub struct TokenAcquisition {
    /// The issued token.
    pub token: Token,
    /// Name of the candidate that produced it.
    pub candidate: String,
    /// Every attempt, including untried candidates after the winner.
    pub trail: DiagnosticTrail,
}

/// Walks the attempt plan against the token endpoint.
#[derive(Debug)]
pub struct TokenAcquirer<'a> {
    ctx: &'a FetchContext,
    endpoints: &'a Endpoints,
}

impl<'a> TokenAcquirer<'a> {
    /// Creates an acquirer.
    pub fn new(ctx: &'a FetchContext, endpoints: &'a Endpoints) -> Self {
        Self { ctx, endpoints }
    }

    /// Builds and signs the plan for `credential` without sending anything.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::Configuration`] if the credential is
    /// incomplete or the secret is not a bcrypt salt.
    pub fn prepare(&self, credential: &Credential) -> Result<Vec<SignedAttempt>, CommerceError> {
        credential.validate()?;
        let signer = SignatureGenerator::from_secret(&credential.secret)?;
        AttemptPlan::build(credential, self.ctx.now())
            .into_candidates()
            .into_iter()
            .map(|candidate| SignedAttempt::sign(candidate, &signer))
            .collect()
    }

    /// Acquires a token.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::Configuration`] before any request if the
    ///   credential or secret is unusable.
    /// - [`CommerceError::AuthenticationExhausted`] if no candidate yields
    ///   a token.
    #[instrument(skip_all, fields(application_id = %credential.application_id))]
    pub async fn acquire(&self, credential: &Credential) -> Result<TokenAcquisition, CommerceError> {
        let attempts = self.prepare(credential)?;
        debug!(candidates = attempts.len(), "Prepared token attempts");

        let runner = TokenRunner {
            transport: self.ctx.http.as_ref(),
            url: self.endpoints.token_url(),
            account_id: credential.account_id.as_deref(),
        };
        let outcome = CandidatePipeline::new(attempts)
            .record_untried()
            .execute(&runner)
            .await;

        match outcome.result {
            Ok(accepted) => {
                info!(candidate = %accepted.candidate, "Token acquired");
                Ok(TokenAcquisition {
                    token: accepted.value,
                    candidate: accepted.candidate,
                    trail: outcome.trail,
                })
            }
            Err(err) => {
                let last_status = match err {
                    FetchError::AllCandidatesFailed { last_status, .. } => last_status,
                    _ => outcome.trail.last_failure_status(),
                };
                warn!(attempts = outcome.trail.sent_count(), ?last_status, "Token acquisition exhausted");
                Err(CommerceError::AuthenticationExhausted {
                    attempts: outcome.trail.sent_count(),
                    last_status,
                    trail: outcome.trail,
                })
            }
        }
    }
}

struct TokenRunner<'a> {
    transport: &'a dyn HttpTransport,
    url: String,
    account_id: Option<&'a str>,
}

#[async_trait]
impl CandidateRunner<SignedAttempt> for TokenRunner<'_> {
    type Output = Token;

    async fn run(&self, attempt: &SignedAttempt) -> AttemptReport<Token> {
        let request = HttpRequest::post_form(&self.url, attempt.form(self.account_id));
        match self.transport.send(request).await {
            Ok(response) => {
                let mut body = response.parsed_body();
                let token = response
                    .is_success()
                    .then(|| Token::from_json(&body))
                    .flatten();
                redact_token(&mut body);
                match token {
                    Some(token) => AttemptReport::accept(response.status, body, token),
                    None => AttemptReport::fallback(response.status, body),
                }
            }
            Err(e) => AttemptReport::transport_failure(&e),
        }
    }
}

/// Keeps issued tokens out of the diagnostic trail.
fn redact_token(body: &mut Value) {
    if let Some(token) = body.get_mut("access_token") {
        *token = Value::String("<redacted>".to_string());
    }
}

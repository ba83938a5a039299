//! Candidate and runner traits.
//!
//! A candidate is one immutable request shape (a token parameter set, an
//! endpoint/method/format combination). A runner knows how to send one
//! candidate and judge the response. The pipeline owns the ordering and the
//! trail; runners only report what happened.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HttpError;

// ============================================================================
// Candidate
// ============================================================================

/// Something the pipeline can try.
pub trait Candidate: Send + Sync {
    /// Diagnostic label recorded in the trail.
    fn label(&self) -> String;
}

// ============================================================================
// Verdict
// ============================================================================

/// What the pipeline should do after an attempt.
#[derive(Debug)]
pub enum Verdict<T> {
    /// Accept this result and stop.
    Accept(T),
    /// Record a failure and try the next candidate.
    Fallback,
    /// Record a failure and stop trying any candidate.
    Abort,
}

/// A runner's account of one attempt.
#[derive(Debug)]
pub struct AttemptReport<T> {
    /// HTTP status, if a response arrived.
    pub status: Option<u16>,
    /// Parsed body, or raw text, or the transport error message.
    pub body: Value,
    /// What to do next.
    pub verdict: Verdict<T>,
}

impl<T> AttemptReport<T> {
    /// An accepted attempt.
    pub fn accept(status: u16, body: Value, value: T) -> Self {
        Self {
            status: Some(status),
            body,
            verdict: Verdict::Accept(value),
        }
    }

    /// A failed attempt; the next candidate should be tried.
    pub fn fallback(status: u16, body: Value) -> Self {
        Self {
            status: Some(status),
            body,
            verdict: Verdict::Fallback,
        }
    }

    /// A failed attempt that ends the pipeline.
    pub fn abort(status: u16, body: Value) -> Self {
        Self {
            status: Some(status),
            body,
            verdict: Verdict::Abort,
        }
    }

    /// The request never got a response.
    pub fn transport_failure(error: &HttpError) -> Self {
        Self {
            status: None,
            body: Value::String(error.to_string()),
            verdict: Verdict::Fallback,
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Sends a candidate and judges the response.
///
/// ## Implementing a Runner
///
/// ```ignore
/// struct PingRunner<'a> { transport: &'a dyn HttpTransport }
///
/// #[async_trait]
/// impl CandidateRunner<Endpoint> for PingRunner<'_> {
///     type Output = Value;
///
///     async fn run(&self, candidate: &Endpoint) -> AttemptReport<Value> {
///         match self.transport.send(HttpRequest::get(&candidate.url)).await {
///             Ok(r) if r.is_success() => AttemptReport::accept(r.status, r.parsed_body(), r.parsed_body()),
///             Ok(r) => AttemptReport::fallback(r.status, r.parsed_body()),
///             Err(e) => AttemptReport::transport_failure(&e),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait CandidateRunner<C: Candidate>: Send + Sync {
    /// Value produced by an accepted attempt.
    type Output: Send;

    /// Sends one candidate.
    async fn run(&self, candidate: &C) -> AttemptReport<Self::Output>;
}

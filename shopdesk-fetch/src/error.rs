//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for candidate pipeline execution.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The pipeline was given no candidates.
    #[error("No candidates configured")]
    NoCandidates,

    /// Every candidate was tried and none was accepted.
    #[error("All {attempts} candidates failed (last status: {last_status:?})")]
    AllCandidatesFailed {
        /// Number of candidates sent.
        attempts: usize,
        /// Status of the last failed response, if any response arrived.
        last_status: Option<u16>,
    },

    /// A candidate failed in a way that stops all further attempts.
    #[error("Aborted at candidate {candidate} (status: {status:?})")]
    Aborted {
        /// Label of the aborting candidate.
        candidate: String,
        /// Status that caused the abort.
        status: Option<u16>,
    },
}

impl FetchError {
    /// Returns the upstream HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AllCandidatesFailed { last_status, .. } => *last_status,
            Self::Aborted { status, .. } => *status,
            _ => None,
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout.
    #[error("Request timed out")]
    Timeout,

    /// Connection-level failure reported by a transport.
    #[error("Transport failure: {0}")]
    Transport(String),
}

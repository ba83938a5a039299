//! Candidate pipeline.
//!
//! The pipeline takes an ordered list of candidates and tries them one at a
//! time until one is accepted, a runner asks to abort, or the list runs out.
//! Every attempt lands in the [`DiagnosticTrail`], whatever its outcome.
//!
//! Candidates are never sent concurrently: "first success" must mean the
//! same candidate on every run.

use chrono::NaiveDate;
use shopdesk_core::{AttemptOutcome, DiagnosticTrail, TrailEntry};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::error::FetchError;
use crate::strategy::{Candidate, CandidateRunner, Verdict};

// ============================================================================
// Pipeline Outcome
// ============================================================================

/// The accepted result of a pipeline run.
#[derive(Debug)]
pub struct Accepted<T> {
    /// The runner's output.
    pub value: T,
    /// Label of the accepted candidate.
    pub candidate: String,
    /// HTTP status of the accepted response.
    pub status: Option<u16>,
}

/// The outcome of a pipeline execution.
#[derive(Debug)]
pub struct PipelineOutcome<T> {
    /// The accepted result, or why nothing was accepted.
    pub result: Result<Accepted<T>, FetchError>,
    /// Every attempt, in order.
    pub trail: DiagnosticTrail,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl<T> PipelineOutcome<T> {
    /// Returns true if a candidate was accepted.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns true if a runner aborted the pipeline.
    pub fn is_aborted(&self) -> bool {
        matches!(self.result, Err(FetchError::Aborted { .. }))
    }

    /// Returns the number of candidates that were actually sent.
    pub fn attempts_count(&self) -> usize {
        self.trail.sent_count()
    }

    /// Returns the accepted candidate label, if any.
    pub fn successful_candidate(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|a| a.candidate.as_str())
    }
}

// ============================================================================
// Candidate Pipeline
// ============================================================================

/// An ordered list of candidates tried until one is accepted.
#[derive(Debug, Clone)]
pub struct CandidatePipeline<C> {
    candidates: Vec<C>,
    record_untried: bool,
    day: Option<NaiveDate>,
}

impl<C: Candidate> CandidatePipeline<C> {
    /// Creates a pipeline over `candidates`, tried in the given order.
    pub fn new(candidates: Vec<C>) -> Self {
        Self {
            candidates,
            record_untried: false,
            day: None,
        }
    }

    /// After a success, record the remaining candidates as untried.
    #[must_use]
    pub fn record_untried(mut self) -> Self {
        self.record_untried = true;
        self
    }

    /// Tags every trail entry with a calendar day.
    #[must_use]
    pub fn for_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    /// Returns the candidates in order.
    pub fn candidates(&self) -> &[C] {
        &self.candidates
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the pipeline has no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Execute the pipeline, trying candidates in order until one is accepted.
    #[instrument(skip(self, runner), fields(candidates = self.candidates.len(), day = ?self.day))]
    pub async fn execute<R>(&self, runner: &R) -> PipelineOutcome<R::Output>
    where
        R: CandidateRunner<C> + ?Sized,
    {
        let start = Instant::now();
        let mut trail = DiagnosticTrail::new();

        if self.candidates.is_empty() {
            return PipelineOutcome {
                result: Err(FetchError::NoCandidates),
                trail,
                duration: start.elapsed(),
            };
        }

        debug!(count = self.candidates.len(), "Executing candidate pipeline");

        for (index, candidate) in self.candidates.iter().enumerate() {
            let label = candidate.label();
            let attempt_start = Instant::now();

            let report = runner.run(candidate).await;
            let duration = attempt_start.elapsed();

            match report.verdict {
                Verdict::Accept(value) => {
                    info!(candidate = %label, status = ?report.status, duration = ?duration, "Candidate accepted");
                    trail.push(
                        TrailEntry::new(&label, report.status, report.body, AttemptOutcome::Succeeded)
                            .on_day(self.day),
                    );

                    if self.record_untried {
                        for rest in &self.candidates[index + 1..] {
                            trail.push(TrailEntry::untried(rest.label()).on_day(self.day));
                        }
                    }

                    return PipelineOutcome {
                        result: Ok(Accepted {
                            value,
                            candidate: label,
                            status: report.status,
                        }),
                        trail,
                        duration: start.elapsed(),
                    };
                }
                Verdict::Fallback => {
                    debug!(candidate = %label, status = ?report.status, duration = ?duration, "Candidate failed");
                    trail.push(
                        TrailEntry::new(&label, report.status, report.body, AttemptOutcome::Failed)
                            .on_day(self.day),
                    );
                }
                Verdict::Abort => {
                    warn!(candidate = %label, status = ?report.status, "Candidate aborted pipeline");
                    trail.push(
                        TrailEntry::new(&label, report.status, report.body, AttemptOutcome::Aborted)
                            .on_day(self.day),
                    );
                    return PipelineOutcome {
                        result: Err(FetchError::Aborted {
                            candidate: label,
                            status: report.status,
                        }),
                        trail,
                        duration: start.elapsed(),
                    };
                }
            }
        }

        let last_status = trail.last_failure_status();
        warn!(attempts = trail.len(), last_status = ?last_status, "All candidates failed");
        PipelineOutcome {
            result: Err(FetchError::AllCandidatesFailed {
                attempts: trail.len(),
                last_status,
            }),
            trail,
            duration: start.elapsed(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

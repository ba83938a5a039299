//! Per-day order fetching.
//!
//! Days are fetched strictly in order. Within a day the candidate matrix is
//! walked until one candidate answers 2xx. A 401/403 on any candidate ends
//! the whole range: the credential is rejected and no request shape will
//! change that.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use shopdesk_core::{DateWindow, DiagnosticTrail, Token};
use shopdesk_fetch::{
    AttemptReport, CandidatePipeline, CandidateRunner, FetchError, HttpTransport,
};
use tracing::{info, instrument, warn};

use super::candidates::{FetchCandidate, OrderQuery, day_candidates};
use crate::api::Endpoints;

/// What happened to one day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    /// A candidate answered 2xx.
    Fetched {
        /// The day.
        day: NaiveDate,
        /// Winning candidate label.
        candidate: String,
        /// Raw response body.
        body: Value,
    },
    /// Every candidate failed with a non-authorization error.
    Exhausted {
        /// The day.
        day: NaiveDate,
        /// Status of the last failed candidate.
        last_status: Option<u16>,
    },
    /// A candidate answered 401/403.
    Aborted {
        /// The day.
        day: NaiveDate,
        /// 401 or 403.
        status: u16,
    },
}

impl DayOutcome {
    /// The day this outcome is for.
    pub fn day(&self) -> NaiveDate {
        match self {
            Self::Fetched { day, .. } | Self::Exhausted { day, .. } | Self::Aborted { day, .. } => {
                *day
            }
        }
    }
}

/// Result of fetching a sequence of days.
#[derive(Debug, Clone, Default)]
pub struct RangeFetch {
    /// Outcomes of attempted days, in order.
    pub days: Vec<DayOutcome>,
    /// Days never attempted because an earlier day aborted.
    pub skipped_days: Vec<NaiveDate>,
    /// Every candidate sent, across all days.
    pub trail: DiagnosticTrail,
}

impl RangeFetch {
    /// Days that produced data, with winning candidate and body.
    pub fn fetched(&self) -> impl Iterator<Item = (NaiveDate, &str, &Value)> {
        self.days.iter().filter_map(|outcome| match outcome {
            DayOutcome::Fetched {
                day,
                candidate,
                body,
            } => Some((*day, candidate.as_str(), body)),
            _ => None,
        })
    }

    /// True if any day produced data.
    pub fn has_data(&self) -> bool {
        self.fetched().next().is_some()
    }

    /// Days whose matrix was exhausted.
    pub fn failed_days(&self) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter(|outcome| matches!(outcome, DayOutcome::Exhausted { .. }))
            .map(DayOutcome::day)
            .collect()
    }

    /// Day and status of the abort, if one happened.
    pub fn aborted(&self) -> Option<(NaiveDate, u16)> {
        self.days.iter().find_map(|outcome| match outcome {
            DayOutcome::Aborted { day, status } => Some((*day, *status)),
            _ => None,
        })
    }

    /// Status of the last failed response across all days.
    pub fn last_status(&self) -> Option<u16> {
        self.trail.last_failure_status()
    }
}

/// Fetches orders day by day with one token.
pub struct OrderFetcher<'a> {
    transport: &'a dyn HttpTransport,
    endpoints: &'a Endpoints,
    authorization: String,
    query: OrderQuery,
}

impl<'a> OrderFetcher<'a> {
    /// Creates a fetcher authorized by `token`.
    pub fn new(
        transport: &'a dyn HttpTransport,
        endpoints: &'a Endpoints,
        token: &Token,
        query: OrderQuery,
    ) -> Self {
        Self {
            transport,
            endpoints,
            authorization: token.authorization(),
            query,
        }
    }

    /// Walks the candidate matrix for one day.
    #[instrument(skip_all, fields(day = %window.date))]
    pub async fn fetch_day(&self, window: &DateWindow) -> (DayOutcome, DiagnosticTrail) {
        let day = window.date;
        let candidates = day_candidates(self.endpoints, window, &self.query);
        let runner = OrderRunner {
            transport: self.transport,
            authorization: &self.authorization,
        };

        let outcome = CandidatePipeline::new(candidates)
            .for_day(day)
            .execute(&runner)
            .await;

        let day_outcome = match outcome.result {
            Ok(accepted) => DayOutcome::Fetched {
                day,
                candidate: accepted.candidate,
                body: accepted.value,
            },
            Err(FetchError::Aborted {
                status: Some(status),
                ..
            }) => DayOutcome::Aborted { day, status },
            Err(FetchError::AllCandidatesFailed { last_status, .. }) => {
                DayOutcome::Exhausted { day, last_status }
            }
            Err(_) => DayOutcome::Exhausted {
                day,
                last_status: outcome.trail.last_failure_status(),
            },
        };
        (day_outcome, outcome.trail)
    }

    /// Fetches each window in order, stopping at the first abort.
    pub async fn fetch_range(&self, windows: &[DateWindow]) -> RangeFetch {
        let mut range = RangeFetch::default();

        for (index, window) in windows.iter().enumerate() {
            let (outcome, trail) = self.fetch_day(window).await;
            range.trail.extend(trail);

            match &outcome {
                DayOutcome::Fetched { candidate, .. } => {
                    info!(day = %window.date, %candidate, "Day fetched");
                }
                DayOutcome::Exhausted { last_status, .. } => {
                    warn!(day = %window.date, ?last_status, "Day exhausted all candidates");
                }
                DayOutcome::Aborted { status, .. } => {
                    warn!(day = %window.date, status, "Authorization rejected; stopping");
                    range.days.push(outcome);
                    range.skipped_days = windows[index + 1..].iter().map(|w| w.date).collect();
                    return range;
                }
            }
            range.days.push(outcome);
        }

        range
    }
}

impl std::fmt::Debug for OrderFetcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderFetcher")
            .field("endpoints", &self.endpoints)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

struct OrderRunner<'a> {
    transport: &'a dyn HttpTransport,
    authorization: &'a str,
}

#[async_trait]
impl CandidateRunner<FetchCandidate> for OrderRunner<'_> {
    type Output = Value;

    async fn run(&self, candidate: &FetchCandidate) -> AttemptReport<Value> {
        match self.transport.send(candidate.request(self.authorization)).await {
            Ok(response) if response.is_success() => {
                let body = response.parsed_body();
                AttemptReport::accept(response.status, body.clone(), body)
            }
            Ok(response) if response.is_auth_failure() => {
                AttemptReport::abort(response.status, response.parsed_body())
            }
            Ok(response) => AttemptReport::fallback(response.status, response.parsed_body()),
            Err(e) => AttemptReport::transport_failure(&e),
        }
    }
}

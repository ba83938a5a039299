//! Token-attempt plan.
//!
//! The platform accepts several slightly different token request shapes
//! depending on how the application was registered. The plan lists them in
//! a fixed order; the acquirer tries them until one yields a token.

use chrono::{DateTime, Utc};
use shopdesk_core::{AccountType, AttemptCandidate, Credential, TimestampPrecision};

use super::signature::signature_password;

/// Form parameter carrying the solution identifier.
pub const SOLUTION_ID_PARAM: &str = "solutionId";

const PRECISIONS: [TimestampPrecision; 2] = [TimestampPrecision::Millis, TimestampPrecision::Seconds];

/// Ordered list of token-attempt candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptPlan {
    candidates: Vec<AttemptCandidate>,
}

impl AttemptPlan {
    /// Builds the plan for `credential` at instant `now`.
    ///
    /// Always starts with the seller-account shape in milliseconds, then
    /// seconds. With a solution id, four partner shapes follow: the
    /// application id with `solutionId` as an extra parameter, then the
    /// solution id as the client id, each in both precisions.
    pub fn build(credential: &Credential, now: DateTime<Utc>) -> Self {
        let millis = now.timestamp_millis();
        let app_id = credential.application_id.as_str();
        let mut candidates = Vec::with_capacity(6);

        for precision in PRECISIONS {
            candidates.push(candidate(
                "self/app-id",
                app_id,
                AccountType::SelfCredential,
                precision,
                millis,
                Vec::new(),
            ));
        }

        if let Some(solution_id) = credential.solution_id() {
            for precision in PRECISIONS {
                candidates.push(candidate(
                    "solution/app-id+param",
                    app_id,
                    AccountType::Solution,
                    precision,
                    millis,
                    vec![(SOLUTION_ID_PARAM.to_string(), solution_id.to_string())],
                ));
            }
            for precision in PRECISIONS {
                candidates.push(candidate(
                    "solution/solution-id",
                    solution_id,
                    AccountType::Solution,
                    precision,
                    millis,
                    Vec::new(),
                ));
            }
        }

        Self { candidates }
    }

    /// Candidates in attempt order.
    pub fn candidates(&self) -> &[AttemptCandidate] {
        &self.candidates
    }

    /// Candidate names in attempt order.
    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True if the plan is empty. Never the case for a built plan.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Consumes the plan.
    pub fn into_candidates(self) -> Vec<AttemptCandidate> {
        self.candidates
    }
}

fn candidate(
    shape: &str,
    client_id: &str,
    account_type: AccountType,
    precision: TimestampPrecision,
    epoch_millis: i64,
    extra_params: Vec<(String, String)>,
) -> AttemptCandidate {
    let timestamp_text = precision.render(epoch_millis);
    AttemptCandidate {
        name: format!("{shape}/{}", precision.label()),
        client_id: client_id.to_string(),
        account_type,
        precision,
        signature_password_seed: signature_password(client_id, &timestamp_text),
        timestamp_text,
        extra_params,
    }
}

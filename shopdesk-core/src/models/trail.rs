//! Diagnostic trail of attempted requests.
//!
//! Every token attempt and every order-fetch candidate is recorded here,
//! successful or not. Trails are returned to callers on success and failure
//! alike so operators can see which undocumented variant actually worked.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parses a response body as JSON, falling back to the raw text.
pub fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

// ============================================================================
// Attempt Outcome
// ============================================================================

/// How a single attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The attempt produced the accepted result.
    Succeeded,
    /// The attempt failed; the next candidate was tried.
    Failed,
    /// The attempt failed in a way that stopped all further attempts.
    Aborted,
    /// The candidate was never sent because an earlier one succeeded.
    Untried,
}

// ============================================================================
// Trail Entry
// ============================================================================

/// One recorded attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailEntry {
    /// Attempt or candidate name.
    pub name: String,
    /// HTTP status, absent when the request never got a response.
    pub status: Option<u16>,
    /// Parsed JSON body, or the raw text when it was not JSON.
    pub body: Value,
    /// How the attempt ended.
    pub outcome: AttemptOutcome,
    /// Calendar day the attempt belonged to, for per-day fetches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<NaiveDate>,
}

impl TrailEntry {
    /// Creates an entry.
    pub fn new(
        name: impl Into<String>,
        status: Option<u16>,
        body: Value,
        outcome: AttemptOutcome,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            body,
            outcome,
            day: None,
        }
    }

    /// Creates an entry for a candidate that was never sent.
    pub fn untried(name: impl Into<String>) -> Self {
        Self::new(name, None, Value::Null, AttemptOutcome::Untried)
    }

    /// Tags the entry with a calendar day.
    #[must_use]
    pub fn on_day(mut self, day: Option<NaiveDate>) -> Self {
        self.day = day;
        self
    }
}

// ============================================================================
// Diagnostic Trail
// ============================================================================

/// Ordered list of attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticTrail {
    entries: Vec<TrailEntry>,
}

impl DiagnosticTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: TrailEntry) {
        self.entries.push(entry);
    }

    /// Appends every entry of another trail, preserving order.
    pub fn extend(&mut self, other: DiagnosticTrail) {
        self.entries.extend(other.entries);
    }

    /// Returns the entries in attempt order.
    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &TrailEntry> {
        self.entries.iter()
    }

    /// Number of recorded entries (including untried ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that were actually sent.
    pub fn sent_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome != AttemptOutcome::Untried)
            .count()
    }

    /// Returns the accepted entry, if any.
    pub fn succeeded(&self) -> Option<&TrailEntry> {
        self.entries
            .iter()
            .find(|e| e.outcome == AttemptOutcome::Succeeded)
    }

    /// Returns the most recent HTTP status that was not a success.
    pub fn last_failure_status(&self) -> Option<u16> {
        self.entries
            .iter()
            .rev()
            .filter(|e| matches!(e.outcome, AttemptOutcome::Failed | AttemptOutcome::Aborted))
            .find_map(|e| e.status)
    }

    /// Entries recorded for one calendar day.
    pub fn for_day(&self, day: NaiveDate) -> impl Iterator<Item = &TrailEntry> {
        self.entries.iter().filter(move |e| e.day == Some(day))
    }
}

impl IntoIterator for DiagnosticTrail {
    type Item = TrailEntry;
    type IntoIter = std::vec::IntoIter<TrailEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<TrailEntry> for DiagnosticTrail {
    fn from_iter<I: IntoIterator<Item = TrailEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_falls_back_to_text() {
        assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(parse_body("<html>oops</html>"), json!("<html>oops</html>"));
    }

    #[test]
    fn test_last_failure_status_skips_success() {
        let trail: DiagnosticTrail = vec![
            TrailEntry::new("a", Some(500), Value::Null, AttemptOutcome::Failed),
            TrailEntry::new("b", Some(404), Value::Null, AttemptOutcome::Failed),
            TrailEntry::new("c", Some(200), Value::Null, AttemptOutcome::Succeeded),
            TrailEntry::untried("d"),
        ]
        .into_iter()
        .collect();

        assert_eq!(trail.last_failure_status(), Some(404));
        assert_eq!(trail.sent_count(), 3);
        assert_eq!(trail.succeeded().map(|e| e.name.as_str()), Some("c"));
    }

    #[test]
    fn test_trail_serializes_as_array() {
        let mut trail = DiagnosticTrail::new();
        trail.push(TrailEntry::new("x", None, json!("timeout"), AttemptOutcome::Failed));

        let value = serde_json::to_value(&trail).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["outcome"], "failed");
        assert!(value[0].get("day").is_none());
    }
}

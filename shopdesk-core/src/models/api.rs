//! Inbound request and response bodies.
//!
//! These are the JSON shapes the dashboard exchanges with this backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::order::Order;
use super::trail::DiagnosticTrail;
use crate::error::CoreError;

/// Parses a caller-supplied date.
///
/// Accepts `YYYY-MM-DD`, or any longer ISO timestamp whose first ten
/// characters are a date.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] if no date can be read.
pub fn parse_request_date(text: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = text.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(text.to_string()))
}

// ============================================================================
// Order Listing
// ============================================================================

/// Order listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListingRequest {
    /// Configured store to query.
    pub store_name: String,
    /// First day (inclusive).
    pub date_from: String,
    /// Last day (inclusive).
    pub date_to: String,
    /// Which timestamp the range applies to (e.g. `PAYED_DATETIME`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_type: Option<String>,
    /// Product-order status filter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_order_status: Vec<String>,
    /// Claim status filter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claim_status: Vec<String>,
}

impl OrderListingRequest {
    /// Creates a request for a store and date range.
    pub fn new(
        store_name: impl Into<String>,
        date_from: impl Into<String>,
        date_to: impl Into<String>,
    ) -> Self {
        Self {
            store_name: store_name.into(),
            date_from: date_from.into(),
            date_to: date_to.into(),
            range_type: None,
            product_order_status: Vec::new(),
            claim_status: Vec::new(),
        }
    }
}

/// Where a hard authorization failure stopped the day loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbortInfo {
    /// Day on which the 401/403 arrived.
    pub day: NaiveDate,
    /// The upstream status.
    pub status: u16,
}

/// Result of one day in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResult {
    /// The calendar day.
    pub day: NaiveDate,
    /// Winning candidate label, when the day produced data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    /// Normalized rows kept for the day.
    pub rows: usize,
}

/// Diagnostics returned with every listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDebug {
    /// Token acquisition attempts.
    pub token_attempts: DiagnosticTrail,
    /// Every order-fetch candidate sent, across all days.
    pub order_fetch_attempts: DiagnosticTrail,
    /// Per-day summary for days that were attempted.
    #[serde(default)]
    pub day_results: Vec<DayResult>,
    /// Days whose candidate matrix was exhausted.
    #[serde(default)]
    pub failed_days: Vec<NaiveDate>,
    /// Days never attempted because the loop was aborted.
    #[serde(default)]
    pub skipped_days: Vec<NaiveDate>,
    /// The range was longer than the day cap.
    #[serde(default)]
    pub truncated: bool,
    /// Number of days beyond the cap that were not fetched.
    #[serde(default)]
    pub omitted_days: u32,
    /// Set when a 401/403 stopped the loop after some days succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aborted_at: Option<AbortInfo>,
}

/// Order listing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListingResponse {
    /// Labels of the fetch candidates that produced data, in day order.
    pub sources: Vec<String>,
    /// Echo of the requested start date.
    pub date_from: NaiveDate,
    /// Echo of the requested end date.
    pub date_to: NaiveDate,
    /// Days that produced data.
    pub fetched_days: Vec<NaiveDate>,
    /// Normalized orders from all fetched days.
    pub orders: Vec<Order>,
    /// Diagnostics.
    pub debug: ListingDebug,
}

impl OrderListingResponse {
    /// Returns true if some requested days did not produce data.
    pub fn is_partial(&self) -> bool {
        !self.debug.failed_days.is_empty()
            || !self.debug.skipped_days.is_empty()
            || self.debug.truncated
    }
}

// ============================================================================
// Product Lookup
// ============================================================================

/// Product lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLookupRequest {
    /// Channel-level or origin-level product id.
    pub origin_product_id: String,
    /// Configured store to query; the default store when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_request_date("2024-05-01").unwrap(), expected);
        assert_eq!(parse_request_date(" 2024-05-01T10:00:00+09:00").unwrap(), expected);
        assert!(parse_request_date("05/01/2024").is_err());
        assert!(parse_request_date("").is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request: OrderListingRequest = serde_json::from_str(
            r#"{"storeName":"main","dateFrom":"2024-05-01","dateTo":"2024-05-02"}"#,
        )
        .unwrap();

        assert_eq!(request.store_name, "main");
        assert!(request.range_type.is_none());
        assert!(request.product_order_status.is_empty());
    }
}

//! Order-fetch candidate matrix.
//!
//! Which API version, method, path and timestamp format a deployment
//! accepts is not documented, so every day is probed with the full cross
//! product in a fixed order. Encodings form the outer loop; within one
//! encoding the order is version, then method, then path.

use serde_json::{Value, json};
use shopdesk_core::{DateWindow, OrderListingRequest, TimestampEncoding};
use shopdesk_fetch::{Candidate, HttpMethod, HttpRequest};
use std::fmt;

use crate::api::Endpoints;

/// Range type used when the caller does not pick one.
pub const DEFAULT_RANGE_TYPE: &str = "PAYED_DATETIME";

/// Order API versions in probing order.
pub const API_VERSIONS: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

/// Methods in probing order.
pub const METHODS: [HttpMethod; 2] = [HttpMethod::Get, HttpMethod::Post];

/// Path variants in probing order.
pub const ORDER_PATHS: [OrderPath; 2] = [OrderPath::WithConditions, OrderPath::Plain];

/// Order API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// `/external/v1`.
    V1,
    /// `/external/v2`.
    V2,
}

impl ApiVersion {
    /// Path segment and label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Order listing path variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderPath {
    /// The conditional product-order query.
    WithConditions,
    /// The plain product-order listing.
    Plain,
}

impl OrderPath {
    /// Label used in candidate names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WithConditions => "with-conditions",
            Self::Plain => "plain",
        }
    }

    /// URL path for `version`.
    pub fn path(&self, version: ApiVersion) -> String {
        match self {
            Self::WithConditions => format!(
                "/external/{version}/pay-order/seller/product-orders/with-conditions"
            ),
            Self::Plain => format!("/external/{version}/pay-order/seller/product-orders"),
        }
    }
}

/// Filters forwarded with every order request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    /// Which timestamp the range applies to.
    pub range_type: String,
    /// Product-order status filter.
    pub product_order_status: Vec<String>,
    /// Claim status filter.
    pub claim_status: Vec<String>,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            range_type: DEFAULT_RANGE_TYPE.to_string(),
            product_order_status: Vec::new(),
            claim_status: Vec::new(),
        }
    }
}

impl OrderQuery {
    /// Filters from a listing request.
    pub fn from_request(request: &OrderListingRequest) -> Self {
        let range_type = request
            .range_type
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_RANGE_TYPE)
            .to_string();
        Self {
            range_type,
            product_order_status: request.product_order_status.clone(),
            claim_status: request.claim_status.clone(),
        }
    }

    /// Query parameters; status filters repeat their key.
    pub fn query_pairs(&self, from: &str, to: &str) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("from".to_string(), from.to_string()),
            ("to".to_string(), to.to_string()),
            ("rangeType".to_string(), self.range_type.clone()),
        ];
        pairs.extend(
            self.product_order_status
                .iter()
                .map(|s| ("productOrderStatus".to_string(), s.clone())),
        );
        pairs.extend(
            self.claim_status
                .iter()
                .map(|s| ("claimStatus".to_string(), s.clone())),
        );
        pairs
    }

    /// JSON body carrying the same parameters.
    pub fn json_body(&self, from: &str, to: &str) -> Value {
        let mut body = json!({
            "from": from,
            "to": to,
            "rangeType": self.range_type,
        });
        if !self.product_order_status.is_empty() {
            body["productOrderStatus"] = json!(self.product_order_status);
        }
        if !self.claim_status.is_empty() {
            body["claimStatus"] = json!(self.claim_status);
        }
        body
    }
}

/// One request shape for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCandidate {
    /// Diagnostic label, e.g. `v1/GET/with-conditions/local-t`.
    pub label: String,
    /// Method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Query parameters (GET only).
    pub query: Vec<(String, String)>,
    /// JSON body (POST only).
    pub json_body: Option<Value>,
    /// Timestamp encoding used for the range.
    pub encoding: TimestampEncoding,
}

impl FetchCandidate {
    /// Builds the request, authorized with `authorization`.
    pub fn request(&self, authorization: &str) -> HttpRequest {
        let request = match (&self.method, &self.json_body) {
            (HttpMethod::Post, Some(body)) => HttpRequest::post_json(&self.url, body.clone()),
            (HttpMethod::Post, None) => HttpRequest::post_json(&self.url, json!({})),
            (HttpMethod::Get, _) => HttpRequest::get(&self.url).with_query(self.query.clone()),
        };
        request.with_authorization(authorization)
    }
}

impl Candidate for FetchCandidate {
    fn label(&self) -> String {
        self.label.clone()
    }
}

/// Every pairing of `left` with `right`, `left` varying slowest.
pub fn cartesian<A: Copy, B: Copy>(left: &[A], right: &[B]) -> Vec<(A, B)> {
    left.iter()
        .flat_map(|a| right.iter().map(move |b| (*a, *b)))
        .collect()
}

/// Version, method and path combinations in probing order.
pub fn request_shapes() -> Vec<(ApiVersion, HttpMethod, OrderPath)> {
    cartesian(&cartesian(&API_VERSIONS, &METHODS), &ORDER_PATHS)
        .into_iter()
        .map(|((version, method), path)| (version, method, path))
        .collect()
}

/// Number of candidates tried for one day before giving up.
pub fn candidates_per_day() -> usize {
    TimestampEncoding::ALL.len() * API_VERSIONS.len() * METHODS.len() * ORDER_PATHS.len()
}

/// Builds the ordered candidate list for one day.
pub fn day_candidates(
    endpoints: &Endpoints,
    window: &DateWindow,
    query: &OrderQuery,
) -> Vec<FetchCandidate> {
    let shapes = request_shapes();
    let mut candidates = Vec::with_capacity(candidates_per_day());

    for encoding in TimestampEncoding::ALL {
        let from = window.start_text(encoding);
        let to = window.end_text(encoding);

        for (version, method, path) in &shapes {
            let (query_pairs, json_body) = match method {
                HttpMethod::Get => (query.query_pairs(&from, &to), None),
                HttpMethod::Post => (Vec::new(), Some(query.json_body(&from, &to))),
            };
            candidates.push(FetchCandidate {
                label: format!("{version}/{method}/{}/{}", path.label(), encoding.label()),
                method: *method,
                url: endpoints.url(&path.path(*version)),
                query: query_pairs,
                json_body,
                encoding,
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> DateWindow {
        DateWindow::platform_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap()
    }

    #[test]
    fn test_cartesian_order() {
        assert_eq!(
            cartesian(&[1, 2], &['a', 'b']),
            vec![(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]
        );
    }

    #[test]
    fn test_matrix_size_and_order() {
        let candidates = day_candidates(&Endpoints::default(), &window(), &OrderQuery::default());
        assert_eq!(candidates.len(), 24);
        assert_eq!(candidates.len(), candidates_per_day());

        let labels: Vec<_> = candidates.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels[0], "v1/GET/with-conditions/local-t");
        assert_eq!(labels[1], "v1/GET/plain/local-t");
        assert_eq!(labels[2], "v1/POST/with-conditions/local-t");
        assert_eq!(labels[4], "v2/GET/with-conditions/local-t");
        assert_eq!(labels[8], "v1/GET/with-conditions/local-space");
        assert_eq!(labels[23], "v2/POST/plain/utc-ms");
    }

    #[test]
    fn test_get_candidate_request() {
        let query = OrderQuery {
            product_order_status: vec!["PAYED".to_string(), "DELIVERING".to_string()],
            ..OrderQuery::default()
        };
        let candidates = day_candidates(&Endpoints::default(), &window(), &query);
        let request = candidates[0].request("Bearer tok");

        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.url.ends_with("/external/v1/pay-order/seller/product-orders/with-conditions"));
        assert_eq!(request.query_value("from"), Some("2024-03-01T00:00:00"));
        assert_eq!(request.query_value("to"), Some("2024-03-01T23:59:59"));
        assert_eq!(request.query_value("rangeType"), Some("PAYED_DATETIME"));
        let statuses: Vec<_> = request
            .query
            .iter()
            .filter(|(k, _)| k == "productOrderStatus")
            .collect();
        assert_eq!(statuses.len(), 2);
        assert_eq!(request.header_value("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_post_candidate_request() {
        let candidates = day_candidates(&Endpoints::default(), &window(), &OrderQuery::default());
        let post = candidates
            .iter()
            .find(|c| c.label == "v2/POST/plain/utc-ms")
            .unwrap();
        let request = post.request("Bearer tok");

        assert!(request.query.is_empty());
        let body = request.json_body().unwrap();
        assert_eq!(body["from"], "2024-02-29T15:00:00.000Z");
        assert_eq!(body["to"], "2024-03-01T14:59:59.999Z");
        assert!(body.get("claimStatus").is_none());
    }

    #[test]
    fn test_blank_range_type_uses_default() {
        let mut request = OrderListingRequest::new("main", "2024-03-01", "2024-03-01");
        request.range_type = Some("  ".to_string());
        assert_eq!(OrderQuery::from_request(&request).range_type, DEFAULT_RANGE_TYPE);
        request.range_type = Some("ORDERED_DATETIME".to_string());
        assert_eq!(OrderQuery::from_request(&request).range_type, "ORDERED_DATETIME");
    }
}

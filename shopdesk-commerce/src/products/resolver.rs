//! Channel-to-origin product id resolution.
//!
//! The dashboard may hold either id form. A channel-id search is tried
//! first; whatever happens there, resolution never fails. A wrong id
//! surfaces later as a not-found from the detail endpoint.

use serde_json::{Value, json};
use shopdesk_core::Token;
use shopdesk_fetch::{HttpRequest, HttpTransport};
use tracing::{debug, instrument};

use crate::api::Endpoints;
use crate::extract::{first_array, first_text};

/// Search keyword type for channel-level ids.
pub const CHANNEL_PRODUCT_ID: &str = "CHANNEL_PRODUCT_ID";

/// Page size of the search request.
const SEARCH_PAGE_SIZE: u32 = 10;

const SEARCH_ROWS: &[&str] = &["contents", "data.contents"];

const ORIGIN_ID: &[&str] = &[
    "originProduct.id",
    "originProductId",
    "originProductNo",
];

/// Why the search did not supply an origin id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMiss {
    /// The search succeeded but nothing carried an origin id.
    NoMatch,
    /// The search answered with a non-success status.
    Status(u16),
    /// The search never got a response.
    Transport(String),
}

/// Outcome of resolving an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The search mapped the input to an origin id.
    Resolved {
        /// Caller's identifier.
        input: String,
        /// Origin id from the search.
        origin_product_id: String,
    },
    /// The input is used unchanged.
    Fallback {
        /// Caller's identifier.
        input: String,
        /// Why the search did not help.
        reason: SearchMiss,
    },
}

impl Resolution {
    /// Identifier to fetch details for.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Resolved {
                origin_product_id, ..
            } => origin_product_id,
            Self::Fallback { input, .. } => input,
        }
    }

    /// True if the search supplied the identifier.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Resolves channel-level ids via product search.
pub struct ProductResolver<'a> {
    transport: &'a dyn HttpTransport,
    endpoints: &'a Endpoints,
    authorization: String,
}

impl<'a> ProductResolver<'a> {
    /// Creates a resolver authorized by `token`.
    pub fn new(transport: &'a dyn HttpTransport, endpoints: &'a Endpoints, token: &Token) -> Self {
        Self {
            transport,
            endpoints,
            authorization: token.authorization(),
        }
    }

    /// Resolves `input`. Never fails.
    #[instrument(skip(self))]
    pub async fn resolve(&self, input: &str) -> Resolution {
        let input = input.trim();
        let request = HttpRequest::post_json(
            self.endpoints.product_search_url(),
            search_body(input),
        )
        .with_authorization(&self.authorization);

        let reason = match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                match origin_id_from_search(&response.parsed_body()) {
                    Some(origin_product_id) => {
                        debug!(%origin_product_id, "Resolved channel product id");
                        return Resolution::Resolved {
                            input: input.to_string(),
                            origin_product_id,
                        };
                    }
                    None => SearchMiss::NoMatch,
                }
            }
            Ok(response) => SearchMiss::Status(response.status),
            Err(e) => SearchMiss::Transport(e.to_string()),
        };

        debug!(?reason, "Search did not resolve; using input as origin id");
        Resolution::Fallback {
            input: input.to_string(),
            reason,
        }
    }
}

impl std::fmt::Debug for ProductResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductResolver")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

/// Search body for a channel product id.
pub fn search_body(keyword: &str) -> Value {
    json!({
        "searchKeywordType": CHANNEL_PRODUCT_ID,
        "searchKeyword": keyword,
        "page": 1,
        "size": SEARCH_PAGE_SIZE,
    })
}

/// First origin id among the search results.
pub fn origin_id_from_search(body: &Value) -> Option<String> {
    first_array(body, SEARCH_ROWS)?
        .iter()
        .find_map(|row| first_text(row, ORIGIN_ID))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_fetch::{HttpError, HttpResponse, ScriptedTransport};

    fn token() -> Token {
        Token::from_json(&json!({"access_token": "tok"})).unwrap()
    }

    #[tokio::test]
    async fn test_search_hit_substitutes_origin_id() {
        let transport = ScriptedTransport::new(|_| {
            Ok(HttpResponse::json(
                200,
                &json!({"contents": [{"channelProducts": [{"channelProductNo": 123}], "originProduct": {"id": 999}}]}),
            ))
        });
        let endpoints = Endpoints::default();
        let resolution = ProductResolver::new(&transport, &endpoints, &token())
            .resolve("123")
            .await;

        assert_eq!(resolution.identifier(), "999");
        assert!(resolution.is_resolved());
        let sent = &transport.requests()[0];
        assert_eq!(sent.json_body().unwrap()["searchKeywordType"], "CHANNEL_PRODUCT_ID");
        assert_eq!(sent.json_body().unwrap()["searchKeyword"], "123");
    }

    #[tokio::test]
    async fn test_empty_search_keeps_input() {
        let transport = ScriptedTransport::always(200, r#"{"contents": []}"#);
        let endpoints = Endpoints::default();
        let resolution = ProductResolver::new(&transport, &endpoints, &token())
            .resolve("555")
            .await;

        assert_eq!(resolution.identifier(), "555");
        assert_eq!(
            resolution,
            Resolution::Fallback {
                input: "555".to_string(),
                reason: SearchMiss::NoMatch
            }
        );
    }

    #[tokio::test]
    async fn test_failed_search_keeps_input() {
        let transport = ScriptedTransport::always(500, "boom");
        let endpoints = Endpoints::default();
        let resolution = ProductResolver::new(&transport, &endpoints, &token())
            .resolve("555")
            .await;

        assert_eq!(resolution.identifier(), "555");
        assert!(matches!(
            resolution,
            Resolution::Fallback {
                reason: SearchMiss::Status(500),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_error_keeps_input() {
        let transport = ScriptedTransport::new(|_| Err(HttpError::Timeout));
        let endpoints = Endpoints::default();
        let resolution = ProductResolver::new(&transport, &endpoints, &token())
            .resolve("555")
            .await;

        assert_eq!(resolution.identifier(), "555");
    }

    #[test]
    fn test_origin_id_aliases() {
        assert_eq!(
            origin_id_from_search(&json!({"data": {"contents": [{}, {"originProductNo": "42"}]}})),
            Some("42".to_string())
        );
    }
}

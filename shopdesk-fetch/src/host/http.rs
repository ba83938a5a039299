//! HTTP transport with tracing and domain allowlist.
//!
//! This module provides:
//! - [`HttpRequest`] / [`HttpResponse`] - Transport-neutral request and response values
//! - [`HttpTransport`] - The seam between protocol logic and the network
//! - [`HttpClient`] - The reqwest-backed transport used in production
//!
//! Protocol code builds `HttpRequest` values and hands them to a transport,
//! which keeps every candidate matrix testable without a network.

use async_trait::async_trait;
use reqwest::{Client, Method, header};
use serde_json::Value;
use shopdesk_core::parse_body;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for `ShopDesk`.
const USER_AGENT: &str = concat!("ShopDesk/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Request / Response Values
// ============================================================================

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET with query parameters.
    Get,
    /// POST with a form or JSON body.
    Post,
}

impl HttpMethod {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
    /// JSON document.
    Json(Value),
}

/// A transport-neutral HTTP request.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    /// Method.
    pub method: HttpMethod,
    /// Absolute URL without query string.
    pub url: String,
    /// Query parameters, in order. Keys may repeat.
    pub query: Vec<(String, String)>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Creates a form-encoded POST request.
    pub fn post_form(url: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Form(form),
        }
    }

    /// Creates a JSON POST request.
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    /// Appends query parameters.
    #[must_use]
    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds an `Authorization` header.
    #[must_use]
    pub fn with_authorization(self, value: impl Into<String>) -> Self {
        self.with_header(header::AUTHORIZATION.as_str(), value)
    }

    /// First query value for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    /// First form value for `key`.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        match &self.body {
            RequestBody::Form(pairs) => lookup(pairs, key),
            _ => None,
        }
    }

    /// JSON body, if any.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// First header value for `name` (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case(header::AUTHORIZATION.as_str()) {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();

        let body = match &self.body {
            RequestBody::Empty => "empty",
            RequestBody::Form(_) => "form",
            RequestBody::Json(_) => "json",
        };

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("headers", &headers)
            .field("body", &body)
            .finish()
    }
}

/// A response as seen by protocol code: status plus raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True for 401 and 403.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Body parsed as JSON, or the raw text as a JSON string.
    pub fn parsed_body(&self) -> Value {
        parse_body(&self.body)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends one request and returns the response, whatever its status.
///
/// Non-2xx statuses are not errors at this layer; only failures to obtain a
/// response at all are.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// ============================================================================
// HTTP Client
// ============================================================================

/// reqwest-backed transport with tracing and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This should only occur
    /// if the system's TLS/SSL configuration is fundamentally broken,
    /// making network operations impossible.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                panic!(
                    "Failed to create HTTP client: {e}. \
                    This usually indicates a broken TLS/SSL configuration."
                )
            });

        Self {
            inner: client,
            allowed_domains: None,
        }
    }

    /// Restricts requests to the given domains (and their subdomains).
    #[must_use]
    pub fn allow_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(());
        };

        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    fn build(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = self.inner.request(method, &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Json(value) => builder.json(&value),
        }
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.is_domain_allowed(&request.url)?;
        debug!("Sending request");

        let response = self.build(request).send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Request(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, len = body.len(), "Response received");

        Ok(HttpResponse { status, body })
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
    fn test_domain_allowlist() {
        let client = HttpClient::new().allow_domains(vec!["api.commerce.naver.com".to_string()]);

        assert!(client
            .is_domain_allowed("https://api.commerce.naver.com/external/v1/oauth2/token")
            .is_ok());
        assert!(client.is_domain_allowed("https://evil.com/steal").is_err());
    }

    #[test]
    fn test_subdomain_matching() {
        let client = HttpClient::new().allow_domains(vec!["naver.com".to_string()]);
        assert!(client.is_domain_allowed("https://api.commerce.naver.com").is_ok());
        assert!(client.is_domain_allowed("https://notnaver.com").is_err());
    }

    #[test]
    fn test_no_domain_restrictions() {
        let client = HttpClient::new();
        assert!(client.is_domain_allowed("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new().allow_domains(vec!["example.com".to_string()]);
        assert!(client.is_domain_allowed("not-a-valid-url").is_err());
    }

    #[test]
    fn test_request_accessors() {
        let request = HttpRequest::post_form(
            "https://example.com/token",
            vec![("client_id".to_string(), "app".to_string())],
        )
        .with_authorization("Bearer abc");

        assert_eq!(request.form_value("client_id"), Some("app"));
        assert_eq!(request.header_value("authorization"), Some("Bearer abc"));
        assert!(request.json_body().is_none());
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let request = HttpRequest::get("https://example.com").with_authorization("Bearer secret");
        assert!(!format!("{request:?}").contains("secret"));
    }

    #[test]
    fn test_response_classification() {
        assert!(HttpResponse::new(204, "").is_success());
        assert!(HttpResponse::new(403, "").is_auth_failure());
        assert!(!HttpResponse::new(404, "").is_auth_failure());
        assert_eq!(
            HttpResponse::json(200, &json!({"a": 1})).parsed_body(),
            json!({"a": 1})
        );
    }
}

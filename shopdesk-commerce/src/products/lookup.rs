//! Product detail fetch.

use serde_json::Value;
use shopdesk_core::{DiagnosticTrail, Token};
use shopdesk_fetch::{HttpRequest, HttpTransport};
use tracing::{debug, instrument};

use crate::api::Endpoints;
use crate::error::CommerceError;

/// Fetches the raw detail record for an origin product id.
///
/// # Errors
///
/// - [`CommerceError::InvalidRequest`] if the id cannot form a path segment.
/// - [`CommerceError::ProductNotFound`] on 404.
/// - [`CommerceError::HardAuthorizationFailure`] on 401/403.
/// - [`CommerceError::UpstreamStatus`] on any other non-2xx.
/// - [`CommerceError::Http`] if no response arrives.
#[instrument(skip(transport, endpoints, token))]
pub async fn fetch_product_detail(
    transport: &dyn HttpTransport,
    endpoints: &Endpoints,
    token: &Token,
    origin_product_id: &str,
) -> Result<Value, CommerceError> {
    let request = HttpRequest::get(endpoints.product_detail_url(origin_product_id)?)
        .with_authorization(token.authorization());
    let response = transport.send(request).await?;
    let body = response.parsed_body();
    debug!(status = response.status, "Product detail response");

    match response.status {
        200..=299 => Ok(body),
        404 => Err(CommerceError::ProductNotFound {
            origin_product_id: origin_product_id.to_string(),
            status: response.status,
            body,
        }),
        401 | 403 => Err(CommerceError::HardAuthorizationFailure {
            status: response.status,
            day: None,
            token_trail: DiagnosticTrail::new(),
            fetch_trail: DiagnosticTrail::new(),
        }),
        status => Err(CommerceError::UpstreamStatus { status, body }),
    }
}

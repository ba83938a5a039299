// Shared helpers; not every test binary uses every item.
#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{Value, json};
use shopdesk_commerce::{CommerceClient, Endpoints};
use shopdesk_core::Credential;
use shopdesk_fetch::{
    FetchContext, FixedClock, HttpError, HttpRequest, HttpResponse, ScriptedTransport,
};
use std::sync::Arc;

pub const SECRET: &str = "$2a$04$abcdefghijklmnopqrstuu";
pub const BASE_URL: &str = "https://commerce.test";

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

pub fn token_response() -> HttpResponse {
    HttpResponse::json(
        200,
        &json!({"access_token": "tok", "token_type": "Bearer", "expires_in": 10800}),
    )
}

pub fn is_token_request(request: &HttpRequest) -> bool {
    request.url.ends_with("/oauth2/token")
}

/// Local calendar day a data request is for, read from its `to` parameter.
pub fn requested_day(request: &HttpRequest) -> Option<String> {
    let to = request
        .query_value("to")
        .map(ToString::to_string)
        .or_else(|| {
            request
                .json_body()
                .and_then(|b| b.get("to"))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        })?;
    to.get(..10).map(ToString::to_string)
}

/// Answers token requests with a token and everything else with `data`.
pub fn transport<F>(data: F) -> Arc<ScriptedTransport>
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
{
    Arc::new(ScriptedTransport::new(move |request| {
        if is_token_request(request) {
            Ok(token_response())
        } else {
            data(request)
        }
    }))
}

pub fn client_with(transport: Arc<ScriptedTransport>, credential: Credential) -> CommerceClient {
    let ctx = FetchContext::builder()
        .http(transport)
        .clock(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
        )))
        .build();
    CommerceClient::new("main", credential, ctx).with_endpoints(Endpoints::new(BASE_URL))
}

pub fn client(transport: Arc<ScriptedTransport>) -> CommerceClient {
    client_with(transport, Credential::new("app", SECRET))
}

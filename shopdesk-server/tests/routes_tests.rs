//! Route tests against a scripted upstream.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use shopdesk_commerce::{CommerceClient, Endpoints, ShopRegistry};
use shopdesk_core::Credential;
use shopdesk_fetch::{FetchContext, FixedClock, HttpRequest, HttpResponse, ScriptedTransport};
use shopdesk_server::{AppState, router};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "$2a$04$abcdefghijklmnopqrstuu";

fn app<F>(upstream: F) -> (axum::Router, Arc<ScriptedTransport>)
where
    F: Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
{
    let transport = Arc::new(ScriptedTransport::new(move |request| {
        if request.url.ends_with("/oauth2/token") {
            Ok(HttpResponse::json(200, &json!({"access_token": "tok"})))
        } else {
            Ok(upstream(request))
        }
    }));
    let ctx = FetchContext::builder()
        .http(transport.clone())
        .clock(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
        )))
        .build();
    let mut registry = ShopRegistry::new();
    registry.insert(
        CommerceClient::new("main", Credential::new("app", SECRET), ctx)
            .with_endpoints(Endpoints::new("https://commerce.test")),
    );
    (router(AppState::new(registry)), transport)
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_lists_stores() {
    let (app, _) = app(|_| HttpResponse::new(500, ""));

    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["stores"], json!(["main"]));
}

#[tokio::test]
async fn test_order_listing() {
    let (app, _) = app(|_| HttpResponse::json(200, &json!({"contents": [{"orderId": "A1"}]})));

    let response = app
        .oneshot(post(
            "/api/orders",
            &json!({"storeName": "main", "dateFrom": "2024-03-01", "dateTo": "2024-03-02"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["fetchedDays"], json!(["2024-03-01", "2024-03-02"]));
    assert_eq!(body["orders"][0]["orderId"], "A1");
    assert_eq!(body["sources"], json!(["v1/GET/with-conditions/local-t"]));
    assert_eq!(body["debug"]["orderFetchAttempts"].as_array().unwrap().len(), 2);
    assert_eq!(body["debug"]["tokenAttempts"][0]["body"]["access_token"], "<redacted>");
}

#[tokio::test]
async fn test_unknown_store_is_bad_request() {
    let (app, transport) = app(|_| HttpResponse::new(200, "{}"));

    let response = app
        .oneshot(post(
            "/api/orders",
            &json!({"storeName": "other", "dateFrom": "2024-03-01", "dateTo": "2024-03-01"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid_request");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_total_failure_passes_upstream_status() {
    let (app, _) = app(|_| HttpResponse::json(429, &json!({"code": "TooManyRequests"})));

    let response = app
        .oneshot(post(
            "/api/orders",
            &json!({"storeName": "main", "dateFrom": "2024-03-01", "dateTo": "2024-03-01"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(response).await;
    assert_eq!(body["error"], "total_failure");
    assert_eq!(body["upstreamStatus"], 429);
    assert_eq!(body["debug"]["orderFetchAttempts"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn test_product_lookup() {
    let (app, _) = app(|request| {
        if request.url.ends_with("/products/search") {
            HttpResponse::json(200, &json!({"contents": [{"originProduct": {"id": 999}}]}))
        } else if request.url.ends_with("/origin-products/999") {
            HttpResponse::json(200, &json!({"originProduct": {"name": "Mug"}}))
        } else {
            HttpResponse::json(404, &json!({}))
        }
    });

    let response = app
        .oneshot(post("/api/products/lookup", &json!({"originProductId": "123"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["originProductId"], "999");
    assert_eq!(body["productName"], "Mug");
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn test_product_not_found() {
    let (app, _) = app(|_| HttpResponse::json(404, &json!({"code": "NotFound"})));

    let response = app
        .oneshot(post("/api/products/lookup", &json!({"originProductId": "1"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "product_not_found");
}

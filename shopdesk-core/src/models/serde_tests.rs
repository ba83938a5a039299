//! Serde tests for the JSON shapes exchanged with the dashboard.
//!
//! Field names on the wire are camelCase; optional fields are omitted
//! rather than serialized as null.

use chrono::NaiveDate;
use serde_json::json;

use crate::{
    AbortInfo, ListingDebug, MaskFlags, Order, OrderListingRequest, OrderListingResponse, Product,
    ProductLookupRequest, Token,
};

// ============================================================================
// Order Tests
// ============================================================================

#[test]
fn test_order_omits_absent_fields() {
    let order = Order::new("2024050112345");
    let value = serde_json::to_value(&order).unwrap();

    assert_eq!(value["orderId"], "2024050112345");
    assert!(value.get("phone").is_none());
    assert_eq!(value["masked"], json!({"phone": false, "email": false}));
}

#[test]
fn test_order_masked_flags_serialize() {
    let mut order = Order::new("1");
    order.phone = Some("010-****-1234".to_string());
    order.masked = MaskFlags {
        phone: true,
        email: false,
    };

    let value = serde_json::to_value(&order).unwrap();
    assert_eq!(value["masked"]["phone"], true);
    assert!(order.is_masked());
}

// ============================================================================
// Product Tests
// ============================================================================

#[test]
fn test_product_wire_names() {
    let product = Product {
        origin_product_id: "999".to_string(),
        product_name: "Linen Shirt".to_string(),
        category_path: "Fashion>Shirts".to_string(),
        tags: vec!["linen".to_string()],
        ..Product::default()
    };

    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["originProductId"], "999");
    assert_eq!(value["categoryPath"], "Fashion>Shirts");
    assert_eq!(value["detailContent"], "");
    assert_eq!(value["images"], json!([]));
}

#[test]
fn test_product_lookup_request_optional_store() {
    let request: ProductLookupRequest =
        serde_json::from_str(r#"{"originProductId":"12345"}"#).unwrap();
    assert_eq!(request.origin_product_id, "12345");
    assert!(request.store_name.is_none());
}

// ============================================================================
// Listing Tests
// ============================================================================

#[test]
fn test_listing_request_filters() {
    let request: OrderListingRequest = serde_json::from_value(json!({
        "storeName": "main",
        "dateFrom": "2024-05-01",
        "dateTo": "2024-05-03",
        "rangeType": "PAYED_DATETIME",
        "productOrderStatus": ["PAYED", "DELIVERING"],
        "claimStatus": ["CANCEL_REQUEST"]
    }))
    .unwrap();

    assert_eq!(request.range_type.as_deref(), Some("PAYED_DATETIME"));
    assert_eq!(request.product_order_status.len(), 2);
    assert_eq!(request.claim_status, vec!["CANCEL_REQUEST"]);
}

#[test]
fn test_listing_response_shape() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let response = OrderListingResponse {
        sources: vec!["v1/GET/with-conditions/local-t".to_string()],
        date_from: day,
        date_to: day,
        fetched_days: vec![day],
        orders: vec![Order::new("A")],
        debug: ListingDebug {
            aborted_at: Some(AbortInfo { day, status: 401 }),
            ..ListingDebug::default()
        },
    };

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["fetchedDays"], json!(["2024-05-01"]));
    assert_eq!(value["debug"]["orderFetchAttempts"], json!([]));
    assert_eq!(value["debug"]["abortedAt"]["status"], 401);
    assert!(!response.is_partial());
}

// ============================================================================
// Token Tests
// ============================================================================

#[test]
fn test_token_never_serializes_access_token() {
    let token = Token::from_json(&json!({"access_token": "secret-token"})).unwrap();
    let text = serde_json::to_string(&token).unwrap();
    assert!(!text.contains("secret-token"));
    assert!(text.contains("Bearer"));
}

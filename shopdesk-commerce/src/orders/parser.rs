//! Order response normalization.
//!
//! Row collections and field names differ between API versions, so both
//! are located through ordered alias lists. Rows without an order id are
//! dropped; every other field is optional.

use serde_json::Value;
use shopdesk_core::{MaskFlags, Order};
use tracing::debug;

use crate::extract::{first_number, first_text, lookup};

/// Marker the platform substitutes for hidden characters.
pub const DEFAULT_MASK_MARKER: char = '*';

/// Where the row collection may live, in lookup order.
const ROW_PATHS: &[&str] = &[
    "contents",
    "data.contents",
    "productOrders",
    "data.productOrders",
    "data",
];

const ORDER_ID: &[&str] = &[
    "orderId",
    "productOrderId",
    "productOrder.orderId",
    "order.orderId",
    "content.order.orderId",
    "content.productOrder.productOrderId",
];

const ORDERED_AT: &[&str] = &[
    "orderDate",
    "order.orderDate",
    "content.order.orderDate",
    "paymentDate",
    "order.paymentDate",
    "content.order.paymentDate",
];

const BUYER_NAME: &[&str] = &[
    "ordererName",
    "order.ordererName",
    "content.order.ordererName",
    "buyerName",
];

const PHONE: &[&str] = &[
    "ordererTel",
    "order.ordererTel",
    "content.order.ordererTel",
    "shippingAddress.tel1",
    "productOrder.shippingAddress.tel1",
    "content.productOrder.shippingAddress.tel1",
];

const EMAIL: &[&str] = &[
    "ordererEmail",
    "order.ordererEmail",
    "content.order.ordererEmail",
    "email",
];

const ADDRESS: &[&str] = &[
    "shippingAddress.baseAddress",
    "productOrder.shippingAddress.baseAddress",
    "content.productOrder.shippingAddress.baseAddress",
    "address",
];

const ADDRESS_DETAIL: &[&str] = &[
    "shippingAddress.detailedAddress",
    "productOrder.shippingAddress.detailedAddress",
    "content.productOrder.shippingAddress.detailedAddress",
];

const STATUS: &[&str] = &[
    "productOrderStatus",
    "productOrder.productOrderStatus",
    "content.productOrder.productOrderStatus",
    "status",
];

const PAYMENT_AMOUNT: &[&str] = &[
    "totalPaymentAmount",
    "productOrder.totalPaymentAmount",
    "content.productOrder.totalPaymentAmount",
    "paymentAmount",
    "order.paymentAmount",
];

/// Maps heterogeneous order payloads onto [`Order`].
#[derive(Debug, Clone, Copy)]
pub struct ResponseNormalizer {
    mask_marker: char,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self {
            mask_marker: DEFAULT_MASK_MARKER,
        }
    }
}

impl ResponseNormalizer {
    /// Creates a normalizer with a custom mask marker.
    pub fn with_mask_marker(mask_marker: char) -> Self {
        Self { mask_marker }
    }

    /// Normalizes every row of a response body.
    pub fn normalize(&self, body: &Value) -> Vec<Order> {
        let rows = locate_rows(body);
        let orders: Vec<Order> = rows.iter().filter_map(|row| self.normalize_row(row)).collect();
        if orders.len() < rows.len() {
            debug!(
                rows = rows.len(),
                kept = orders.len(),
                "Dropped rows without an order id"
            );
        }
        orders
    }

    /// Normalizes one row. Returns `None` if it has no order id.
    pub fn normalize_row(&self, row: &Value) -> Option<Order> {
        let order_id = first_text(row, ORDER_ID)?;
        let phone = first_text(row, PHONE);
        let email = first_text(row, EMAIL);
        let masked = MaskFlags {
            phone: phone.as_deref().is_some_and(|p| self.is_masked(p)),
            email: email.as_deref().is_some_and(|e| self.is_masked(e)),
        };

        Some(Order {
            order_id,
            ordered_at: first_text(row, ORDERED_AT),
            buyer_name: first_text(row, BUYER_NAME),
            phone,
            email,
            address: join_address(first_text(row, ADDRESS), first_text(row, ADDRESS_DETAIL)),
            status: first_text(row, STATUS),
            payment_amount: first_number(row, PAYMENT_AMOUNT),
            masked,
        })
    }

    fn is_masked(&self, text: &str) -> bool {
        text.contains(self.mask_marker)
    }
}

/// Normalizes a body with the default mask marker.
pub fn normalize_orders(body: &Value) -> Vec<Order> {
    ResponseNormalizer::default().normalize(body)
}

fn locate_rows(body: &Value) -> &[Value] {
    ROW_PATHS
        .iter()
        .find_map(|path| lookup(body, path).and_then(Value::as_array))
        .or_else(|| body.as_array())
        .map_or(&[], Vec::as_slice)
}

fn join_address(base: Option<String>, detail: Option<String>) -> Option<String> {
    match (base, detail) {
        (Some(base), Some(detail)) => Some(format!("{base} {detail}")),
        (base, None) => base,
        (None, detail) => detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_row() {
        let body = json!({"contents": [{
            "orderId": "A1",
            "ordererName": "Kim",
            "ordererTel": "010-1234-5678",
            "totalPaymentAmount": 15000
        }]});
        let orders = normalize_orders(&body);

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "A1");
        assert_eq!(orders[0].buyer_name.as_deref(), Some("Kim"));
        assert_eq!(orders[0].payment_amount, Some(15000.0));
        assert!(!orders[0].is_masked());
    }

    #[test]
    fn test_nested_row_with_masking() {
        let body = json!({"data": {"contents": [{
            "productOrderId": "B2",
            "order": {
                "ordererName": "Lee",
                "ordererTel": "010-****-5678",
                "orderDate": "2024-03-01T10:00:00.0+09:00"
            },
            "productOrder": {
                "productOrderStatus": "PAYED",
                "shippingAddress": {"baseAddress": "Seoul", "detailedAddress": "101"}
            }
        }]}});
        let orders = normalize_orders(&body);

        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.order_id, "B2");
        assert_eq!(order.buyer_name.as_deref(), Some("Lee"));
        assert_eq!(order.status.as_deref(), Some("PAYED"));
        assert_eq!(order.address.as_deref(), Some("Seoul 101"));
        assert!(order.masked.phone);
        assert!(!order.masked.email);
    }

    #[test]
    fn test_rows_without_order_id_are_dropped() {
        let body = json!({"contents": [{"ordererName": "Park"}, {"orderId": 77}]});
        let orders = normalize_orders(&body);

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "77");
    }

    #[test]
    fn test_first_alias_wins() {
        let row = json!({"orderId": "outer", "productOrder": {"orderId": "inner"}});
        let order = ResponseNormalizer::default().normalize_row(&row).unwrap();
        assert_eq!(order.order_id, "outer");
    }

    #[test]
    fn test_row_collection_locations() {
        for body in [
            json!({"productOrders": [{"orderId": "x"}]}),
            json!({"data": {"productOrders": [{"orderId": "x"}]}}),
            json!({"data": [{"orderId": "x"}]}),
            json!([{"orderId": "x"}]),
        ] {
            assert_eq!(normalize_orders(&body).len(), 1, "{body}");
        }
    }

    #[test]
    fn test_unrecognized_body_yields_nothing() {
        assert!(normalize_orders(&json!({"message": "ok"})).is_empty());
        assert!(normalize_orders(&json!("plain text")).is_empty());
    }

    #[test]
    fn test_custom_mask_marker() {
        let row = json!({"orderId": "1", "ordererEmail": "ab#####@example.com"});
        let order = ResponseNormalizer::with_mask_marker('#')
            .normalize_row(&row)
            .unwrap();
        assert!(order.masked.email);
    }
}

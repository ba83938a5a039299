//! Canonical order record.

use serde::{Deserialize, Serialize};

/// Whether sensitive fields were redacted upstream.
///
/// A masked field is present but partially replaced with a marker character;
/// this distinguishes "redacted by the platform" from "no data".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskFlags {
    /// The phone number carries the mask marker.
    pub phone: bool,
    /// The email address carries the mask marker.
    pub email: bool,
}

/// A normalized order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier. Rows without one are dropped during normalization.
    pub order_id: String,
    /// When the order was placed, as reported upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_at: Option<String>,
    /// Buyer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    /// Buyer phone number (possibly masked).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Buyer email (possibly masked).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Shipping address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Order status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Total payment amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<f64>,
    /// Redaction flags.
    #[serde(default)]
    pub masked: MaskFlags,
}

impl Order {
    /// Creates an order with only its identifier.
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            ordered_at: None,
            buyer_name: None,
            phone: None,
            email: None,
            address: None,
            status: None,
            payment_amount: None,
            masked: MaskFlags::default(),
        }
    }

    /// Returns true if any contact field was redacted.
    pub fn is_masked(&self) -> bool {
        self.masked.phone || self.masked.email
    }
}

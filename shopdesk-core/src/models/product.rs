//! Canonical product record.

use serde::{Deserialize, Serialize};

/// A normalized product detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Origin-level (platform-wide) product id.
    pub origin_product_id: String,
    /// Product name.
    #[serde(default)]
    pub product_name: String,
    /// Leaf category id.
    #[serde(default)]
    pub category: String,
    /// Full category path, e.g. `Fashion>Shoes>Sneakers`.
    #[serde(default)]
    pub category_path: String,
    /// Seller tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// HTML detail content.
    #[serde(default)]
    pub detail_content: String,
    /// Image URLs, representative image first.
    #[serde(default)]
    pub images: Vec<String>,
}

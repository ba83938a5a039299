//! Product detail normalization.

use serde_json::Value;
use shopdesk_core::Product;

use crate::extract::{first_array, first_object, first_text, scalar_text};

/// Where the product record sits inside the detail body.
const PRODUCT_ROOT: &[&str] = &["originProduct", "data.originProduct", "product", "data"];

const NAME: &[&str] = &["name", "productName"];

const CATEGORY: &[&str] = &["leafCategoryId", "categoryId", "category.id"];

const CATEGORY_PATH: &[&str] = &["wholeCategoryName", "category.wholeCategoryName", "categoryPath"];

const TAGS: &[&str] = &[
    "detailAttribute.seoInfo.sellerTags",
    "seoInfo.sellerTags",
    "sellerTags",
    "tags",
];

const DETAIL_CONTENT: &[&str] = &["detailContent", "detailAttribute.detailContent"];

const REPRESENTATIVE_IMAGE: &[&str] = &[
    "images.representativeImage.url",
    "representativeImage.url",
    "representativeImageUrl",
];

const OPTIONAL_IMAGES: &[&str] = &["images.optionalImages", "optionalImages"];

const TAG_TEXT: &[&str] = &["text", "name"];

const IMAGE_URL: &[&str] = &["url"];

/// Normalizes a product detail body.
///
/// Fields are looked up in the product record first and in the body
/// itself second; anything missing comes back empty.
pub fn normalize_product(body: &Value, origin_product_id: &str) -> Product {
    let record = first_object(body, PRODUCT_ROOT).unwrap_or(body);
    let scopes = [record, body];
    let text = |aliases: &[&str]| {
        scopes
            .iter()
            .find_map(|scope| first_text(scope, aliases))
            .unwrap_or_default()
    };

    let tags = scopes
        .iter()
        .find_map(|scope| first_array(scope, TAGS))
        .map(|items| labels(items, TAG_TEXT))
        .unwrap_or_default();

    let mut images: Vec<String> = scopes
        .iter()
        .find_map(|scope| first_text(scope, REPRESENTATIVE_IMAGE))
        .into_iter()
        .collect();
    if let Some(optional) = scopes.iter().find_map(|scope| first_array(scope, OPTIONAL_IMAGES)) {
        for url in labels(optional, IMAGE_URL) {
            if !images.contains(&url) {
                images.push(url);
            }
        }
    }

    Product {
        origin_product_id: origin_product_id.to_string(),
        product_name: text(NAME),
        category: text(CATEGORY),
        category_path: text(CATEGORY_PATH),
        tags,
        detail_content: text(DETAIL_CONTENT),
        images,
    }
}

/// Items that are plain strings or objects carrying one of `aliases`.
fn labels(items: &[Value], aliases: &[&str]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| scalar_text(item).or_else(|| first_text(item, aliases)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_record() {
        let body = json!({
            "originProduct": {
                "name": "Linen shirt",
                "leafCategoryId": "50000830",
                "detailContent": "<p>soft</p>",
                "images": {
                    "representativeImage": {"url": "https://img/1.jpg"},
                    "optionalImages": [{"url": "https://img/2.jpg"}, {"url": "https://img/1.jpg"}]
                },
                "detailAttribute": {"seoInfo": {"sellerTags": [{"code": 1, "text": "summer"}, {"text": "linen"}]}}
            },
            "wholeCategoryName": "Fashion>Shirts"
        });
        let product = normalize_product(&body, "999");

        assert_eq!(product.origin_product_id, "999");
        assert_eq!(product.product_name, "Linen shirt");
        assert_eq!(product.category, "50000830");
        assert_eq!(product.category_path, "Fashion>Shirts");
        assert_eq!(product.tags, vec!["summer", "linen"]);
        assert_eq!(product.detail_content, "<p>soft</p>");
        assert_eq!(product.images, vec!["https://img/1.jpg", "https://img/2.jpg"]);
    }

    #[test]
    fn test_flat_record_with_string_tags() {
        let body = json!({"productName": "Mug", "tags": ["kitchen"], "optionalImages": ["https://img/m.jpg"]});
        let product = normalize_product(&body, "1");

        assert_eq!(product.product_name, "Mug");
        assert_eq!(product.tags, vec!["kitchen"]);
        assert_eq!(product.images, vec!["https://img/m.jpg"]);
        assert!(product.category.is_empty());
    }
}

//! Commerce platform endpoints.

use url::Url;

use crate::error::CommerceError;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.commerce.naver.com";

/// Token endpoint path.
pub const TOKEN_PATH: &str = "/external/v1/oauth2/token";

/// Product search path (channel id to origin id).
pub const PRODUCT_SEARCH_PATH: &str = "/external/v1/products/search";

/// Product detail path prefix; the origin product id is appended.
pub const PRODUCT_DETAIL_PATH: &str = "/external/v2/products/origin-products";

/// Resolves endpoint URLs against a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Creates endpoints rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// The base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Token endpoint.
    pub fn token_url(&self) -> String {
        self.url(TOKEN_PATH)
    }

    /// Product search endpoint.
    pub fn product_search_url(&self) -> String {
        self.url(PRODUCT_SEARCH_PATH)
    }

    /// Product detail endpoint for one origin product.
    ///
    /// The id is percent-encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::InvalidRequest`] if the id is empty, `.` or `..`.
    /// - [`CommerceError::Configuration`] if the base URL cannot carry a path.
    pub fn product_detail_url(&self, origin_product_id: &str) -> Result<String, CommerceError> {
        if matches!(origin_product_id, "" | "." | "..") {
            return Err(CommerceError::InvalidRequest(format!(
                "originProductId {origin_product_id:?} is not a valid product id"
            )));
        }

        let mut url = Url::parse(&self.url(PRODUCT_DETAIL_PATH)).map_err(|e| {
            CommerceError::Configuration(format!("invalid base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                CommerceError::Configuration(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .push(origin_product_id);
        Ok(url.into())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let endpoints = Endpoints::new("http://localhost:8080/");
        assert_eq!(endpoints.token_url(), "http://localhost:8080/external/v1/oauth2/token");
    }

    #[test]
    fn test_product_detail_url() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.product_detail_url("123").unwrap(),
            "https://api.commerce.naver.com/external/v2/products/origin-products/123"
        );
    }

    #[test]
    fn test_product_detail_id_is_one_segment() {
        let endpoints = Endpoints::new("https://commerce.test");
        assert_eq!(
            endpoints.product_detail_url("123/../v1/other?x=1#frag").unwrap(),
            "https://commerce.test/external/v2/products/origin-products/123%2F..%2Fv1%2Fother%3Fx=1%23frag"
        );
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let endpoints = Endpoints::default();
        for id in ["", ".", ".."] {
            let err = endpoints.product_detail_url(id).unwrap_err();
            assert!(matches!(err, CommerceError::InvalidRequest(_)), "{id:?}");
        }
    }
}

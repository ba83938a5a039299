//! Named store clients.

use shopdesk_core::{OrderListingRequest, OrderListingResponse, ProductLookupRequest};
use std::collections::BTreeMap;

use crate::client::{CommerceClient, ProductLookup};
use crate::error::CommerceError;

/// Clients keyed by store name.
#[derive(Debug, Clone, Default)]
pub struct ShopRegistry {
    default_store: Option<String>,
    clients: BTreeMap<String, CommerceClient>,
}

impl ShopRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store used when a request names none.
    #[must_use]
    pub fn with_default(mut self, name: Option<String>) -> Self {
        self.default_store = name.filter(|n| !n.trim().is_empty());
        self
    }

    /// Adds or replaces a client.
    pub fn insert(&mut self, client: CommerceClient) {
        self.clients.insert(client.name().to_string(), client);
    }

    /// Store names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.clients.keys().map(String::as_str).collect()
    }

    /// Number of stores.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// True if no store is configured.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Finds the client for `name`, or the default store when `name` is
    /// absent or blank. A single configured store is its own default.
    ///
    /// # Errors
    ///
    /// Returns [`CommerceError::InvalidRequest`] for an unknown store or
    /// when no default can be chosen.
    pub fn resolve(&self, name: Option<&str>) -> Result<&CommerceClient, CommerceError> {
        let requested = name.map(str::trim).filter(|n| !n.is_empty());
        let name = match requested.or(self.default_store.as_deref()) {
            Some(name) => name,
            None if self.clients.len() == 1 => {
                return self
                    .clients
                    .values()
                    .next()
                    .ok_or_else(|| CommerceError::InvalidRequest("no store configured".to_string()));
            }
            None => {
                return Err(CommerceError::InvalidRequest(
                    "storeName is required".to_string(),
                ));
            }
        };
        self.clients
            .get(name)
            .ok_or_else(|| CommerceError::InvalidRequest(format!("unknown store: {name}")))
    }

    /// Lists orders for the request's store.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`] and [`CommerceClient::list_orders`].
    pub async fn list_orders(
        &self,
        request: &OrderListingRequest,
    ) -> Result<OrderListingResponse, CommerceError> {
        self.resolve(Some(&request.store_name))?
            .list_orders(request)
            .await
    }

    /// Looks up a product for the request's store.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`] and [`CommerceClient::lookup_product`].
    pub async fn lookup_product(
        &self,
        request: &ProductLookupRequest,
    ) -> Result<ProductLookup, CommerceError> {
        self.resolve(request.store_name.as_deref())?
            .lookup_product(&request.origin_product_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_core::Credential;
    use shopdesk_fetch::FetchContext;

    fn client(name: &str) -> CommerceClient {
        CommerceClient::new(name, Credential::new("app", "secret"), FetchContext::new())
    }

    #[test]
    fn test_single_store_is_default() {
        let mut registry = ShopRegistry::new();
        registry.insert(client("main"));
        assert_eq!(registry.resolve(None).unwrap().name(), "main");
        assert_eq!(registry.resolve(Some("  ")).unwrap().name(), "main");
    }

    #[test]
    fn test_unknown_store_is_invalid_request() {
        let mut registry = ShopRegistry::new();
        registry.insert(client("main"));
        let err = registry.resolve(Some("other")).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidRequest(_)));
    }

    #[test]
    fn test_default_store_among_many() {
        let mut registry = ShopRegistry::new().with_default(Some("b".to_string()));
        registry.insert(client("a"));
        registry.insert(client("b"));
        assert_eq!(registry.resolve(None).unwrap().name(), "b");
        assert_eq!(registry.resolve(Some("a")).unwrap().name(), "a");
        assert_eq!(registry.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_no_default_among_many() {
        let mut registry = ShopRegistry::new();
        registry.insert(client("a"));
        registry.insert(client("b"));
        assert!(registry.resolve(None).is_err());
    }
}

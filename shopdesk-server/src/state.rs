//! Shared application state.

use shopdesk_commerce::{CommerceClient, Endpoints, ShopRegistry};
use shopdesk_fetch::FetchContext;
use shopdesk_store::Settings;
use std::sync::Arc;
use tracing::info;

use crate::error::ServerError;

/// State shared by all handlers. Read-only after start-up.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configured stores.
    pub registry: Arc<ShopRegistry>,
}

impl AppState {
    /// Wraps a registry.
    pub fn new(registry: ShopRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Builds the state from settings.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Startup`] if the settings are inconsistent.
    pub fn from_settings(settings: &Settings) -> Result<Self, ServerError> {
        Ok(Self::new(build_registry(settings)?))
    }
}

/// Builds one client per configured store, all sharing one transport.
///
/// # Errors
///
/// Returns [`ServerError::Startup`] if the settings fail validation.
pub fn build_registry(settings: &Settings) -> Result<ShopRegistry, ServerError> {
    settings
        .validate()
        .map_err(|e| ServerError::Startup(e.to_string()))?;

    let ctx = FetchContext::with_settings(settings.fetch_settings());
    let endpoints = Endpoints::new(&settings.fetch.base_url);
    let mut registry = ShopRegistry::new().with_default(settings.default_store.clone());

    for (name, shop) in &settings.stores {
        registry.insert(
            CommerceClient::new(name, shop.credential(), ctx.clone())
                .with_endpoints(endpoints.clone()),
        );
    }

    info!(stores = registry.len(), base_url = %endpoints.base_url(), "Built store registry");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_store::ShopSettings;

    #[test]
    fn test_registry_from_settings() {
        let mut settings = Settings::default();
        settings.fetch.base_url = "http://localhost:9000/".to_string();
        settings.stores.insert(
            "main".to_string(),
            ShopSettings {
                application_id: "app".to_string(),
                application_secret: "secret".to_string(),
                solution_id: Some("sol".to_string()),
                account_id: None,
            },
        );

        let registry = build_registry(&settings).unwrap();
        let client = registry.resolve(None).unwrap();
        assert_eq!(client.name(), "main");
        assert_eq!(client.endpoints().base_url(), "http://localhost:9000");
        assert_eq!(client.credential().solution_id(), Some("sol"));
    }

    #[test]
    fn test_invalid_settings_fail_startup() {
        let mut settings = Settings::default();
        settings.default_store = Some("ghost".to_string());
        assert!(matches!(build_registry(&settings), Err(ServerError::Startup(_))));
    }
}

//! Configuration management.
//!
//! Settings are loaded once at start-up, overlaid with environment
//! variables, then turned into immutable credentials and fetch settings.

use serde::{Deserialize, Serialize};
use shopdesk_core::Credential;
use shopdesk_fetch::{DEFAULT_MAX_DAYS, FetchSettings};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

/// Store name used when the environment supplies credentials without one.
pub const DEFAULT_STORE_NAME: &str = "default";

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.commerce.naver.com";

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

// ============================================================================
// Environment Variables
// ============================================================================

/// Environment variable names read by [`Settings::apply_env`].
pub mod env {
    /// Application id of the environment-configured store.
    pub const APPLICATION_ID: &str = "SHOPDESK_APPLICATION_ID";
    /// Application secret of the environment-configured store.
    pub const APPLICATION_SECRET: &str = "SHOPDESK_APPLICATION_SECRET";
    /// Solution id of the environment-configured store.
    pub const SOLUTION_ID: &str = "SHOPDESK_SOLUTION_ID";
    /// Account id of the environment-configured store.
    pub const ACCOUNT_ID: &str = "SHOPDESK_ACCOUNT_ID";
    /// Name of the environment-configured store.
    pub const STORE_NAME: &str = "SHOPDESK_STORE_NAME";
    /// API base URL.
    pub const BASE_URL: &str = "SHOPDESK_BASE_URL";
    /// Day cap for listings.
    pub const MAX_DAYS: &str = "SHOPDESK_MAX_DAYS";
}

// ============================================================================
// Settings Types
// ============================================================================

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Store used when a request names none.
    pub default_store: Option<String>,
    /// Credentials per store.
    pub stores: BTreeMap<String, ShopSettings>,
    /// Outbound request settings.
    pub fetch: FetchConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Log level.
    pub log_level: LogLevel,
}

/// Credentials of one store.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
    /// Application id.
    pub application_id: String,
    /// Application secret (a bcrypt salt string).
    pub application_secret: String,
    /// Partner solution id.
    #[serde(alias = "solutionId", alias = "soultionId", skip_serializing_if = "Option::is_none")]
    pub solution_id: Option<String>,
    /// Seller account id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl ShopSettings {
    /// Builds the immutable credential for this store.
    pub fn credential(&self) -> Credential {
        Credential::new(&self.application_id, &self.application_secret)
            .with_solution_id(self.solution_id.clone())
            .with_account_id(self.account_id.clone())
    }
}

impl std::fmt::Debug for ShopSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopSettings")
            .field("application_id", &self.application_id)
            .field("application_secret", &"<redacted>")
            .field("solution_id", &self.solution_id)
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Outbound request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// API base URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of days per listing.
    pub max_days: u32,
    /// Hosts the client may contact; unrestricted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_days: DEFAULT_MAX_DAYS,
            allowed_domains: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Loading & Saving
// ============================================================================

impl Settings {
    /// Loads settings from `path`; a missing file yields defaults.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        match load_json(path).await {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded configuration");
                Ok(settings)
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves settings to `path` with owner-only permissions.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), StoreError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`.
    ///
    /// Credential variables create or update the store named by
    /// `SHOPDESK_STORE_NAME`, falling back to the default store name.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(base_url) = get(env::BASE_URL) {
            self.fetch.base_url = base_url;
        }
        if let Some(max_days) = get(env::MAX_DAYS) {
            self.fetch.max_days = max_days
                .parse()
                .map_err(|_| StoreError::Parse(format!("{}={max_days}", env::MAX_DAYS)))?;
        }

        let application_id = get(env::APPLICATION_ID);
        let application_secret = get(env::APPLICATION_SECRET);
        let solution_id = get(env::SOLUTION_ID);
        let account_id = get(env::ACCOUNT_ID);
        let store_name = get(env::STORE_NAME);

        let touches_store = application_id.is_some()
            || application_secret.is_some()
            || solution_id.is_some()
            || account_id.is_some();
        if !touches_store {
            return Ok(());
        }

        let name = store_name
            .or_else(|| self.default_store.clone())
            .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string());
        debug!(store = %name, "Applying credential overrides from environment");

        let shop = self.stores.entry(name.clone()).or_default();
        if let Some(v) = application_id {
            shop.application_id = v;
        }
        if let Some(v) = application_secret {
            shop.application_secret = v;
        }
        if solution_id.is_some() {
            shop.solution_id = solution_id;
        }
        if account_id.is_some() {
            shop.account_id = account_id;
        }
        if self.default_store.is_none() {
            self.default_store = Some(name);
        }
        Ok(())
    }

    /// Checks the settings for values no operation could work with.
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(default) = &self.default_store {
            if !self.stores.contains_key(default) {
                return Err(StoreError::Config(format!(
                    "default_store \"{default}\" is not configured"
                )));
            }
        }
        if self.fetch.base_url.trim().is_empty() {
            return Err(StoreError::Config("fetch.base_url is empty".to_string()));
        }
        if self.fetch.max_days == 0 {
            return Err(StoreError::Config("fetch.max_days must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Credential of one store.
    pub fn credential(&self, name: &str) -> Result<Credential, StoreError> {
        self.stores
            .get(name)
            .map(ShopSettings::credential)
            .ok_or_else(|| StoreError::StoreNotFound(name.to_string()))
    }

    /// Fetch settings for the transport and listings.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Duration::from_secs(self.fetch.timeout_secs.max(1)),
            max_days: self.fetch.max_days.max(1),
            allowed_domains: self.fetch.allowed_domains.clone(),
        }
    }
}

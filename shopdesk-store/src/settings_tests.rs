//! Settings persistence and environment override tests.

use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

use crate::config::{LogLevel, Settings, ShopSettings, env};
use crate::error::StoreError;
use crate::persistence::{ensure_dir, load_json, save_json};

fn shop(id: &str) -> ShopSettings {
    ShopSettings {
        application_id: id.to_string(),
        application_secret: "$2a$04$abcdefghijklmnopqrstuu".to_string(),
        solution_id: None,
        account_id: None,
    }
}

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_settings_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let mut settings = Settings::default();
    settings.stores.insert("main".to_string(), shop("app"));
    settings.default_store = Some("main".to_string());
    settings.log_level = LogLevel::Debug;

    settings.save_to(&path).await.unwrap();
    let loaded = Settings::load_from(&path).await.unwrap();

    assert_eq!(loaded, settings);
}

#[tokio::test]
async fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let loaded = Settings::load_from(&temp_dir.path().join("absent.json"))
        .await
        .unwrap();
    assert_eq!(loaded, Settings::default());
}

#[tokio::test]
async fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let err = Settings::load_from(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("config.json");

    save_json(&nested, &serde_json::json!({"key": "value"})).await.unwrap();

    assert!(nested.exists());
    let value: serde_json::Value = load_json(&nested).await.unwrap();
    assert_eq!(value["key"], "value");
}

#[cfg(unix)]
#[tokio::test]
async fn test_saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("shopdesk");
    let path = dir.join("config.json");
    Settings::default().save_to(&path).await.unwrap();

    let file_mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    let dir_mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
    assert_eq!(file_mode, 0o600);
    assert_eq!(dir_mode, 0o700);
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("dir");
    ensure_dir(&dir).await.unwrap();
    ensure_dir(&dir).await.unwrap();
    assert!(dir.is_dir());
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_solution_id_aliases() {
    for key in ["solution_id", "solutionId", "soultionId"] {
        let json = format!(r#"{{"application_id": "a", "application_secret": "s", "{key}": "sol"}}"#);
        let parsed: ShopSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.solution_id.as_deref(), Some("sol"), "{key}");
    }
}

#[test]
fn test_partial_file_fills_defaults() {
    let settings: Settings = serde_json::from_str(r#"{"fetch": {"max_days": 7}}"#).unwrap();
    assert_eq!(settings.fetch.max_days, 7);
    assert_eq!(settings.fetch.timeout_secs, 30);
    assert_eq!(settings.server.bind, "127.0.0.1:8787");
    assert_eq!(settings.log_level, LogLevel::Warn);
}

#[test]
fn test_secret_is_redacted_in_debug() {
    let rendered = format!("{:?}", shop("app"));
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("$2a$"));
}

// ============================================================================
// Environment Overrides
// ============================================================================

#[test]
fn test_env_creates_default_store() {
    let mut settings = Settings::default();
    settings
        .apply_env_from(lookup(&[
            (env::APPLICATION_ID, "env-app"),
            (env::APPLICATION_SECRET, "env-secret"),
            (env::SOLUTION_ID, "env-sol"),
        ]))
        .unwrap();

    assert_eq!(settings.default_store.as_deref(), Some("default"));
    let credential = settings.credential("default").unwrap();
    assert_eq!(credential.application_id, "env-app");
    assert_eq!(credential.solution_id(), Some("env-sol"));
}

#[test]
fn test_env_updates_named_store() {
    let mut settings = Settings::default();
    settings.stores.insert("main".to_string(), shop("file-app"));
    settings.default_store = Some("main".to_string());

    settings
        .apply_env_from(lookup(&[
            (env::STORE_NAME, "main"),
            (env::ACCOUNT_ID, "seller-1"),
            (env::BASE_URL, "http://localhost:9000"),
            (env::MAX_DAYS, "7"),
        ]))
        .unwrap();

    let credential = settings.credential("main").unwrap();
    assert_eq!(credential.application_id, "file-app");
    assert_eq!(credential.account_id.as_deref(), Some("seller-1"));
    assert_eq!(settings.fetch.base_url, "http://localhost:9000");
    assert_eq!(settings.fetch_settings().max_days, 7);
}

#[test]
fn test_env_bad_max_days() {
    let mut settings = Settings::default();
    let err = settings
        .apply_env_from(lookup(&[(env::MAX_DAYS, "many")]))
        .unwrap_err();
    assert!(matches!(err, StoreError::Parse(_)));
}

#[test]
fn test_blank_env_values_are_ignored() {
    let mut settings = Settings::default();
    settings
        .apply_env_from(lookup(&[(env::APPLICATION_ID, "  ")]))
        .unwrap();
    assert!(settings.stores.is_empty());
    assert!(settings.default_store.is_none());
}

// ============================================================================
// Validation & Conversion
// ============================================================================

#[test]
fn test_validate_default_store_exists() {
    let mut settings = Settings::default();
    settings.default_store = Some("ghost".to_string());
    assert!(matches!(settings.validate(), Err(StoreError::Config(_))));

    settings.stores.insert("ghost".to_string(), shop("app"));
    assert!(settings.validate().is_ok());
}

#[test]
fn test_unknown_store_credential() {
    let err = Settings::default().credential("nope").unwrap_err();
    assert!(matches!(err, StoreError::StoreNotFound(_)));
}

#[test]
fn test_fetch_settings_conversion() {
    let mut settings = Settings::default();
    settings.fetch.timeout_secs = 0;
    settings.fetch.allowed_domains = Some(vec!["api.commerce.naver.com".to_string()]);

    let fetch = settings.fetch_settings();
    assert_eq!(fetch.timeout, Duration::from_secs(1));
    assert_eq!(fetch.allowed_domains.unwrap().len(), 1);
}

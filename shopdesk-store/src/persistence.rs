//! Config file I/O.
//!
//! The config file holds application secrets: it is replaced atomically and
//! only its owner may read it.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

/// Mode of the config file on Unix.
const FILE_MODE: u32 = 0o600;
/// Mode of a config directory created by [`ensure_dir`] on Unix.
const DIR_MODE: u32 = 0o700;

/// Directory holding `config.json`.
///
/// `~/.config/shopdesk` on Linux, `~/Library/Application Support/shopdesk`
/// on macOS, `%APPDATA%\shopdesk` on Windows; the working directory when
/// the platform has no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join("shopdesk"))
}

/// `config.json` inside [`default_config_dir`].
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("config.json")
}

#[cfg(unix)]
async fn restrict(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    debug!(path = %path.display(), mode = %format!("{mode:o}"), "Restricted permissions");
    Ok(())
}

#[cfg(not(unix))]
async fn restrict(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

/// Writes `data` as pretty JSON, readable by the owner only.
///
/// The content goes to a sibling `.tmp` file first and is renamed into
/// place, so readers never see a half-written config.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let staged = path.with_extension("json.tmp");
    tokio::fs::write(&staged, serde_json::to_vec_pretty(data)?).await?;
    restrict(&staged, FILE_MODE).await?;
    tokio::fs::rename(&staged, path).await?;

    debug!(path = %path.display(), "Wrote JSON file");
    Ok(())
}

/// Reads and parses a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read JSON file");
    Ok(serde_json::from_slice(&bytes)?)
}

/// Creates `path` and its parents if missing; the leaf becomes owner-only.
pub async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if tokio::fs::try_exists(path).await? {
        return Ok(());
    }
    tokio::fs::create_dir_all(path).await?;
    restrict(path, DIR_MODE).await
}

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # `ShopDesk` Store
//!
//! Configuration for the `ShopDesk` backend.
//!
//! This crate provides:
//!
//! - **Settings**: Stores, fetch and server settings, with environment overrides
//! - **Persistence**: Owner-only JSON file I/O
//!
//! ## Usage
//!
//! ```ignore
//! use shopdesk_store::{Settings, default_settings_path};
//!
//! let mut settings = Settings::load_from(&default_settings_path()).await?;
//! settings.apply_env()?;
//! let credential = settings.credential("main")?;
//! ```

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_BIND, DEFAULT_STORE_NAME, FetchConfig, LogLevel, ServerConfig,
    Settings, ShopSettings,
};
pub use error::StoreError;
pub use persistence::{default_config_dir, default_settings_path, ensure_dir, load_json, save_json};

#[cfg(test)]
mod settings_tests;

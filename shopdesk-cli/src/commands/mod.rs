//! CLI command implementations.

pub mod auth;
pub mod config;
pub mod orders;
pub mod plan;
pub mod product;
pub mod serve;

use anyhow::{Context, Result};
use shopdesk_commerce::{CommerceError, ShopRegistry};
use shopdesk_store::{Settings, default_settings_path};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::warn;

use crate::output::{ErrorOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Settings file in effect.
pub fn settings_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(default_settings_path)
}

/// Loads the settings file and applies environment overrides.
pub async fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = settings_path(cli);
    let mut settings = Settings::load_from(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    settings.apply_env()?;
    Ok(settings)
}

/// Builds one client per configured store.
pub async fn load_registry(cli: &Cli) -> Result<ShopRegistry> {
    let settings = load_settings(cli).await?;
    let registry = shopdesk_server::build_registry(&settings)?;
    if registry.is_empty() {
        return Err(CommerceError::Configuration(
            "no store configured; run `shopdesk config init` or set SHOPDESK_APPLICATION_ID and SHOPDESK_APPLICATION_SECRET".to_string(),
        )
        .into());
    }
    Ok(registry)
}

/// Text formatter honoring `--no-color` and `--verbose`.
pub fn text_formatter(cli: &Cli) -> TextFormatter {
    let colors = !cli.no_color && std::io::stdout().is_terminal();
    TextFormatter::new(colors).with_bodies(cli.verbose)
}

/// Prints the attempts a failed operation carries, then hands the error on.
pub fn report_failure(err: CommerceError, cli: &Cli) -> anyhow::Error {
    match cli.format {
        OutputFormat::Json => match JsonFormatter::new(cli.pretty).format(&ErrorOutput::new(&err)) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "Failed to serialize error"),
        },
        OutputFormat::Text => {
            let details = text_formatter(cli).format_failure(&err);
            if !cli.quiet && !details.is_empty() {
                eprintln!("{details}\n");
            }
        }
    }
    err.into()
}

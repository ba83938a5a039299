//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use shopdesk_commerce::SignatureGenerator;
use shopdesk_store::{DEFAULT_STORE_NAME, Settings, ShopSettings, default_config_dir};
use tracing::info;

use super::{load_settings, settings_path, text_formatter};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (secrets redacted).
    Show,

    /// Show configuration paths.
    Path,

    /// Write a configuration file.
    Init(InitArgs),

    /// Validate the configuration and every store's secret, offline.
    Check,
}

/// Arguments for `config init`.
#[derive(Args)]
pub struct InitArgs {
    /// Store name.
    #[arg(long, default_value = DEFAULT_STORE_NAME)]
    pub store: String,

    /// Application id.
    #[arg(long)]
    pub application_id: Option<String>,

    /// Application secret.
    #[arg(long)]
    pub application_secret: Option<String>,

    /// Partner solution id.
    #[arg(long)]
    pub solution_id: Option<String>,

    /// Seller account id.
    #[arg(long)]
    pub account_id: Option<String>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init(init) => init_config(init, cli).await,
        ConfigAction::Check => check_config(cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let settings = redacted(&load_settings(cli).await?);

    match cli.format {
        OutputFormat::Text => println!("{}", text_formatter(cli).format_settings(&settings)),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = settings_path(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn init_config(args: &InitArgs, cli: &Cli) -> Result<()> {
    let path = settings_path(cli);
    if path.exists() && !args.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let settings = initial_settings(args);
    settings.save_to(&path).await?;
    info!(path = %path.display(), "Wrote configuration");

    if !cli.quiet {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

async fn check_config(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    settings.validate()?;

    let problems = store_problems(&settings);
    match cli.format {
        OutputFormat::Text => {
            for name in settings.stores.keys() {
                match problems.iter().find(|(store, _)| store == name) {
                    Some((_, problem)) => println!("✗ {name}: {problem}"),
                    None => println!("✓ {name}"),
                }
            }
        }
        OutputFormat::Json => {
            let stores: serde_json::Map<String, serde_json::Value> = settings
                .stores
                .keys()
                .map(|name| {
                    let problem = problems
                        .iter()
                        .find(|(store, _)| store == name)
                        .map(|(_, p)| p.clone());
                    (name.clone(), serde_json::json!({ "ok": problem.is_none(), "error": problem }))
                })
                .collect();
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&stores)?);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} of {} stores misconfigured", problems.len(), settings.stores.len())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Settings for `config init`: one store, everything else at defaults.
fn initial_settings(args: &InitArgs) -> Settings {
    let shop = ShopSettings {
        application_id: args.application_id.clone().unwrap_or_default(),
        application_secret: args.application_secret.clone().unwrap_or_default(),
        solution_id: args.solution_id.clone(),
        account_id: args.account_id.clone(),
    };

    let mut settings = Settings {
        default_store: Some(args.store.clone()),
        ..Settings::default()
    };
    settings.stores.insert(args.store.clone(), shop);
    settings
}

/// Stores whose credentials cannot produce a signature.
fn store_problems(settings: &Settings) -> Vec<(String, String)> {
    settings
        .stores
        .iter()
        .filter_map(|(name, shop)| {
            let problem = match shop.credential().validate() {
                Err(e) => Some(e.to_string()),
                Ok(()) => SignatureGenerator::from_secret(&shop.application_secret)
                    .err()
                    .map(|e| e.to_string()),
            };
            problem.map(|p| (name.clone(), p))
        })
        .collect()
}

fn redacted(settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    for shop in settings.stores.values_mut() {
        if !shop.application_secret.is_empty() {
            shop.application_secret = "<redacted>".to_string();
        }
    }
    settings
}

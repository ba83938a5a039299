//! Serve command - run the dashboard API.

use anyhow::Result;
use clap::Args;
use shopdesk_server::AppState;
use tracing::warn;

use super::load_settings;
use crate::Cli;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Socket address to listen on (overrides `server.bind`).
    #[arg(long, short)]
    pub bind: Option<String>,
}

/// Runs the serve command.
pub async fn run(args: &ServeArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    let bind = args.bind.clone().unwrap_or_else(|| settings.server.bind.clone());

    let state = AppState::from_settings(&settings)?;
    if state.registry.is_empty() {
        warn!("No store configured; every request will be rejected");
    }

    if !cli.quiet {
        eprintln!("Serving on http://{bind}");
    }
    shopdesk_server::serve(&bind, state).await?;
    Ok(())
}

//! Auth command - acquire a token and show how it was obtained.

use anyhow::Result;
use clap::Args;

use super::{load_registry, report_failure, text_formatter};
use crate::output::{AuthOutput, JsonFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    /// Store whose credentials to use (the default store when omitted).
    #[arg(long, short)]
    pub store: Option<String>,
}

/// Runs the auth command.
pub async fn run(args: &AuthArgs, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;
    let client = registry.resolve(args.store.as_deref())?;

    let acquisition = match client.acquire_token().await {
        Ok(acquisition) => acquisition,
        Err(e) => return Err(report_failure(e, cli)),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("{}", text_formatter(cli).format_auth(client.name(), &acquisition));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&AuthOutput::new(client.name(), &acquisition))?);
        }
    }

    Ok(())
}

//! Plan command - show the token-attempt matrix and check the secret.
//!
//! Nothing is sent: the plan is built and every candidate signed locally.

use anyhow::Result;
use clap::Args;

use super::{load_registry, text_formatter};
use crate::output::{JsonFormatter, PlanOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Store whose credentials to use (the default store when omitted).
    #[arg(long, short)]
    pub store: Option<String>,
}

/// Runs the plan command.
pub async fn run(args: &PlanArgs, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;
    let client = registry.resolve(args.store.as_deref())?;

    let plan = client.attempt_plan();
    let check = client.prepare_attempts();
    let secret_error = check.as_ref().err().map(ToString::to_string);

    match cli.format {
        OutputFormat::Text => {
            let formatter = text_formatter(cli);
            println!(
                "{}",
                formatter.format_plan(client.name(), plan.candidates(), secret_error.as_deref())
            );
        }
        OutputFormat::Json => {
            let output = PlanOutput {
                store: client.name(),
                secret_valid: secret_error.is_none(),
                secret_error: secret_error.clone(),
                attempts: plan.candidates(),
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    check?;
    Ok(())
}

// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ShopDesk CLI - seller API client from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Orders paid during the first week of March
//! shopdesk orders --from 2024-03-01 --to 2024-03-07
//!
//! # Orders for a specific store, as JSON
//! shopdesk orders --store main --from 2024-03-01 --to 2024-03-01 --format json --pretty
//!
//! # Product detail by channel or origin id
//! shopdesk product 1234567890
//!
//! # Which token request shape works for this account
//! shopdesk auth --store main
//!
//! # Validate the secret and print the token-attempt matrix (no network)
//! shopdesk plan
//!
//! # Serve the dashboard API
//! shopdesk serve --bind 0.0.0.0:8787
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use shopdesk_commerce::CommerceError;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{auth, config, orders, plan, product, serve};

// ============================================================================
// CLI Definition
// ============================================================================

/// ShopDesk CLI - commerce platform seller API client.
#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(about = "Commerce platform seller API client")]
#[command(long_about = r#"
ShopDesk talks to the commerce platform's seller API: it signs token
requests, probes the accepted request shapes, and lists orders day by day.

Examples:
  shopdesk orders --from 2024-03-01 --to 2024-03-07
  shopdesk product 1234567890
  shopdesk auth                  # Acquire a token, show every attempt
  shopdesk plan                  # Token-attempt matrix, no network
  shopdesk config show           # Current configuration (secrets redacted)
  shopdesk serve                 # Dashboard API
"#)]
#[command(version)]
#[command(author = "ShopDesk Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, short = 'c', env = "SHOPDESK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List orders for a date range.
    #[command(visible_alias = "o")]
    Orders(orders::OrdersArgs),

    /// Look up a product by channel or origin id.
    #[command(visible_alias = "p")]
    Product(product::ProductArgs),

    /// Acquire a token and show every attempt.
    Auth(auth::AuthArgs),

    /// Show the token-attempt matrix and check the secret locally.
    Plan(plan::PlanArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),

    /// Serve the dashboard API.
    Serve(serve::ServeArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Bad configuration or arguments.
    Usage = 2,
    /// The platform refused or failed the request.
    Upstream = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CommerceError>() {
            Some(CommerceError::Configuration(_) | CommerceError::InvalidRequest(_)) => {
                Self::Usage
            }
            Some(_) => Self::Upstream,
            None => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("shopdesk=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopdesk=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Orders(args) => orders::run(args, &cli).await,
        Commands::Product(args) => product::run(args, &cli).await,
        Commands::Auth(args) => auth::run(args, &cli).await,
        Commands::Plan(args) => plan::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
        Commands::Serve(args) => serve::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

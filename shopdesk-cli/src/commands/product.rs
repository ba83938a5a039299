//! Product command - look up a product by channel or origin id.

use anyhow::Result;
use clap::Args;
use shopdesk_core::ProductLookupRequest;

use super::{load_registry, report_failure, text_formatter};
use crate::output::{JsonFormatter, ProductOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Channel product id or origin product id.
    pub id: String,

    /// Store to query (the default store when omitted).
    #[arg(long, short)]
    pub store: Option<String>,
}

/// Runs the product command.
pub async fn run(args: &ProductArgs, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;
    let request = ProductLookupRequest {
        origin_product_id: args.id.clone(),
        store_name: args.store.clone(),
    };

    let lookup = match registry.lookup_product(&request).await {
        Ok(lookup) => lookup,
        Err(e) => return Err(report_failure(e, cli)),
    };

    match cli.format {
        OutputFormat::Text => println!("{}", text_formatter(cli).format_product(&lookup)),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&ProductOutput::new(&lookup))?);
        }
    }

    Ok(())
}

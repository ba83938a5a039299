//! Orders command - list orders for a date range.

use anyhow::Result;
use clap::Args;
use shopdesk_core::OrderListingRequest;
use tracing::info;

use super::{load_registry, report_failure, text_formatter};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Store to query (the default store when omitted).
    #[arg(long, short)]
    pub store: Option<String>,

    /// First day, YYYY-MM-DD (inclusive).
    #[arg(long)]
    pub from: String,

    /// Last day, YYYY-MM-DD (inclusive). Defaults to --from.
    #[arg(long)]
    pub to: Option<String>,

    /// Which timestamp the range applies to.
    #[arg(long)]
    pub range_type: Option<String>,

    /// Product-order status filter (repeatable or comma-separated).
    #[arg(long = "status", value_delimiter = ',')]
    pub statuses: Vec<String>,

    /// Claim status filter (repeatable or comma-separated).
    #[arg(long = "claim-status", value_delimiter = ',')]
    pub claim_statuses: Vec<String>,

    /// Show per-day results and every attempt.
    #[arg(long)]
    pub trail: bool,
}

impl OrdersArgs {
    fn request(&self) -> OrderListingRequest {
        let to = self.to.as_deref().unwrap_or(&self.from);
        let mut request =
            OrderListingRequest::new(self.store.clone().unwrap_or_default(), &self.from, to);
        request.range_type.clone_from(&self.range_type);
        request.product_order_status.clone_from(&self.statuses);
        request.claim_status.clone_from(&self.claim_statuses);
        request
    }
}

/// Runs the orders command.
pub async fn run(args: &OrdersArgs, cli: &Cli) -> Result<()> {
    let registry = load_registry(cli).await?;
    let request = args.request();
    info!(from = %request.date_from, to = %request.date_to, "Listing orders");

    let listing = match registry.list_orders(&request).await {
        Ok(listing) => listing,
        Err(e) => return Err(report_failure(e, cli)),
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = text_formatter(cli);
            println!("{}", formatter.format_listing(&listing));
            if args.trail || cli.verbose {
                println!();
                println!("{}", formatter.format_day_results(&listing.debug.day_results));
                println!();
                println!(
                    "{}",
                    formatter.format_trail("Token attempts", &listing.debug.token_attempts)
                );
                println!();
                println!(
                    "{}",
                    formatter.format_trail("Order fetch attempts", &listing.debug.order_fetch_attempts)
                );
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&listing)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(to: Option<&str>) -> OrdersArgs {
        OrdersArgs {
            store: None,
            from: "2024-03-01".to_string(),
            to: to.map(ToString::to_string),
            range_type: Some("PAYED_DATETIME".to_string()),
            statuses: vec!["PAYED".to_string(), "DELIVERING".to_string()],
            claim_statuses: vec![],
            trail: false,
        }
    }

    #[test]
    fn test_single_day_when_to_is_omitted() {
        let request = args(None).request();
        assert_eq!(request.date_from, "2024-03-01");
        assert_eq!(request.date_to, "2024-03-01");
        assert_eq!(request.store_name, "");
    }

    #[test]
    fn test_filters_are_forwarded() {
        let request = args(Some("2024-03-07")).request();
        assert_eq!(request.date_to, "2024-03-07");
        assert_eq!(request.range_type.as_deref(), Some("PAYED_DATETIME"));
        assert_eq!(request.product_order_status, vec!["PAYED", "DELIVERING"]);
        assert!(request.claim_status.is_empty());
    }
}

//! Text output formatting with colors.

use shopdesk_commerce::{CommerceError, ProductLookup, Resolution, TokenAcquisition};
use shopdesk_core::{
    AttemptCandidate, AttemptOutcome, DayResult, DiagnosticTrail, Order, OrderListingResponse,
    TrailEntry,
};
use shopdesk_store::Settings;

use super::describe_miss;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Longest body excerpt shown per trail entry.
const BODY_EXCERPT: usize = 160;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    show_bodies: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            show_bodies: false,
        }
    }

    /// Include response bodies in trails.
    pub fn with_bodies(mut self, show_bodies: bool) -> Self {
        self.show_bodies = show_bodies;
        self
    }

    // ------------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------------

    /// Formats an order listing.
    pub fn format_listing(&self, listing: &OrderListingResponse) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(&format!(
            "Orders {} to {}",
            listing.date_from, listing.date_to
        )));
        lines.push("─".repeat(40));

        if listing.orders.is_empty() {
            lines.push(self.dim("No orders"));
        }
        for order in &listing.orders {
            lines.push(self.format_order(order));
        }

        lines.push(String::new());
        let attempted = listing.debug.day_results.len();
        lines.push(format!(
            "{} orders from {} of {} days",
            listing.orders.len(),
            listing.fetched_days.len(),
            attempted
        ));

        if !listing.sources.is_empty() {
            lines.push(format!("Sources: {}", listing.sources.join(", ")));
        }

        if !listing.debug.failed_days.is_empty() {
            lines.push(self.yellow(&format!(
                "Failed days: {}",
                join_days(&listing.debug.failed_days)
            )));
        }

        if let Some(abort) = &listing.debug.aborted_at {
            lines.push(self.red(&format!(
                "Stopped at {} with HTTP {}",
                abort.day, abort.status
            )));
            if !listing.debug.skipped_days.is_empty() {
                lines.push(self.red(&format!(
                    "Not attempted: {}",
                    join_days(&listing.debug.skipped_days)
                )));
            }
        }

        if listing.debug.truncated {
            lines.push(self.yellow(&format!(
                "Range truncated: {} days beyond the cap were not fetched",
                listing.debug.omitted_days
            )));
        }

        lines.join("\n")
    }

    /// Formats one order row.
    pub fn format_order(&self, order: &Order) -> String {
        let masked = if order.is_masked() { "*" } else { " " };
        format!(
            "{:<22} {:<20} {:<12} {:<18} {:>12} {}",
            order.order_id,
            order.ordered_at.as_deref().unwrap_or("-"),
            order.buyer_name.as_deref().unwrap_or("-"),
            order.status.as_deref().unwrap_or("-"),
            order.payment_amount.map_or_else(|| "-".to_string(), format_amount),
            masked,
        )
    }

    /// Formats the per-day outcome table.
    pub fn format_day_results(&self, results: &[DayResult]) -> String {
        let mut lines = vec![self.bold("Days")];
        for result in results {
            let line = match &result.candidate {
                Some(candidate) => format!(
                    "  {} {}  {} rows via {}",
                    self.green("✓"),
                    result.day,
                    result.rows,
                    candidate
                ),
                None => format!("  {} {}  no data", self.red("✗"), result.day),
            };
            lines.push(line);
        }
        lines.join("\n")
    }

    // ------------------------------------------------------------------------
    // Trails
    // ------------------------------------------------------------------------

    /// Formats a diagnostic trail under a heading.
    pub fn format_trail(&self, title: &str, trail: &DiagnosticTrail) -> String {
        let mut lines = vec![self.bold(&format!("{title} ({} sent)", trail.sent_count()))];
        if trail.is_empty() {
            lines.push(self.dim("  none"));
        }
        for entry in trail.iter() {
            lines.push(self.format_entry(entry));
            if self.show_bodies && entry.outcome != AttemptOutcome::Untried {
                lines.push(self.dim(&format!("      {}", excerpt(&entry.body.to_string()))));
            }
        }
        lines.join("\n")
    }

    fn format_entry(&self, entry: &TrailEntry) -> String {
        let marker = match entry.outcome {
            AttemptOutcome::Succeeded => self.green("✓"),
            AttemptOutcome::Failed => self.yellow("✗"),
            AttemptOutcome::Aborted => self.red("!"),
            AttemptOutcome::Untried => self.dim("-"),
        };
        let status = match (entry.outcome, entry.status) {
            (AttemptOutcome::Untried, _) => self.dim("untried"),
            (_, Some(status)) => status.to_string(),
            (_, None) => "no response".to_string(),
        };
        match entry.day {
            Some(day) => format!("  {marker} {day} {:<36} {status}", entry.name),
            None => format!("  {marker} {:<36} {status}", entry.name),
        }
    }

    /// Formats the attempts carried by a failed operation.
    ///
    /// Returns an empty string when the error carries none.
    pub fn format_failure(&self, err: &CommerceError) -> String {
        let mut sections = Vec::new();
        if let Some(trail) = err.token_trail() {
            sections.push(self.format_trail("Token attempts", trail));
        }
        if let Some(trail) = err.fetch_trail() {
            sections.push(self.format_trail("Order fetch attempts", trail));
        }
        if let CommerceError::TotalFailure { failed_days, .. } = err {
            if !failed_days.is_empty() {
                sections.push(self.yellow(&format!("Failed days: {}", join_days(failed_days))));
            }
        }
        sections.join("\n\n")
    }

    // ------------------------------------------------------------------------
    // Products & Tokens
    // ------------------------------------------------------------------------

    /// Formats a product lookup.
    pub fn format_product(&self, lookup: &ProductLookup) -> String {
        let product = &lookup.product;
        let mut lines = vec![
            self.bold(&product.product_name),
            "─".repeat(40),
            format!("Origin id:  {}", product.origin_product_id),
        ];

        match &lookup.resolution {
            Resolution::Resolved { input, .. } if input != &product.origin_product_id => {
                lines.push(self.dim(&format!("            resolved from {input}")));
            }
            Resolution::Fallback { reason, .. } => {
                lines.push(self.dim(&format!("            {}", describe_miss(reason))));
            }
            Resolution::Resolved { .. } => {}
        }

        if !product.category_path.is_empty() {
            lines.push(format!("Category:   {}", product.category_path));
        } else if !product.category.is_empty() {
            lines.push(format!("Category:   {}", product.category));
        }
        if !product.tags.is_empty() {
            lines.push(format!("Tags:       {}", product.tags.join(", ")));
        }
        lines.push(format!("Images:     {}", product.images.len()));
        for image in &product.images {
            lines.push(self.dim(&format!("  {image}")));
        }
        if !product.detail_content.is_empty() {
            lines.push(format!(
                "Detail:     {} characters",
                product.detail_content.chars().count()
            ));
        }

        lines.join("\n")
    }

    /// Formats a token acquisition. The token itself is never shown.
    pub fn format_auth(&self, store: &str, acquisition: &TokenAcquisition) -> String {
        let token = &acquisition.token;
        let mut lines = vec![
            format!("{} Token issued for {store}", self.green("✓")),
            format!("Candidate:  {}", acquisition.candidate),
            format!("Type:       {}", token.token_type),
        ];
        if let Some(expires_in) = token.expires_in {
            lines.push(format!("Expires in: {expires_in}s"));
        }
        if let Some(scope) = &token.scope {
            lines.push(format!("Scope:      {scope}"));
        }
        lines.push(String::new());
        lines.push(self.format_trail("Token attempts", &acquisition.trail));
        lines.join("\n")
    }

    /// Formats the token-attempt plan and the local secret check.
    pub fn format_plan(
        &self,
        store: &str,
        candidates: &[AttemptCandidate],
        secret_error: Option<&str>,
    ) -> String {
        let mut lines = vec![
            self.bold(&format!("Token attempts for {store}")),
            "─".repeat(40),
        ];

        for (index, candidate) in candidates.iter().enumerate() {
            let extras: Vec<String> = candidate
                .extra_params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            let mut line = format!(
                "{:>2}. {:<28} {:<9} client_id={} timestamp={}",
                index + 1,
                candidate.name,
                candidate.account_type,
                candidate.client_id,
                candidate.timestamp_text
            );
            if !extras.is_empty() {
                line.push(' ');
                line.push_str(&extras.join(" "));
            }
            lines.push(line);
        }

        lines.push(String::new());
        match secret_error {
            None => lines.push(format!("{} Secret accepted", self.green("✓"))),
            Some(err) => lines.push(format!("{} {err}", self.red("✗"))),
        }
        lines.join("\n")
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Formats settings. Secrets are never shown.
    pub fn format_settings(&self, settings: &Settings) -> String {
        let mut lines = vec![self.bold("ShopDesk Configuration"), "─".repeat(40), String::new()];

        lines.push("Stores:".to_string());
        if settings.stores.is_empty() {
            lines.push(self.dim("  none"));
        }
        for (name, shop) in &settings.stores {
            let default = if settings.default_store.as_deref() == Some(name.as_str()) {
                " (default)"
            } else {
                ""
            };
            lines.push(format!("  • {name}{default}"));
            lines.push(format!("      application id: {}", shop.application_id));
            let secret = if shop.application_secret.is_empty() {
                self.red("missing")
            } else {
                "set".to_string()
            };
            lines.push(format!("      secret:         {secret}"));
            if let Some(solution_id) = &shop.solution_id {
                lines.push(format!("      solution id:    {solution_id}"));
            }
            if let Some(account_id) = &shop.account_id {
                lines.push(format!("      account id:     {account_id}"));
            }
        }

        lines.push(String::new());
        lines.push(format!("Base URL:   {}", settings.fetch.base_url));
        lines.push(format!("Timeout:    {}s", settings.fetch.timeout_secs));
        lines.push(format!("Max days:   {}", settings.fetch.max_days));
        if let Some(domains) = &settings.fetch.allowed_domains {
            lines.push(format!("Domains:    {}", domains.join(", ")));
        }
        lines.push(format!("Bind:       {}", settings.server.bind));
        lines.push(format!("Log level:  {}", settings.log_level));

        lines.join("\n")
    }

    // ------------------------------------------------------------------------
    // Color helpers
    // ------------------------------------------------------------------------

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn join_days(days: &[chrono::NaiveDate]) -> String {
    days.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whole amounts without decimals, others with two.
pub(crate) fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= BODY_EXCERPT {
        text.to_string()
    } else {
        let head: String = text.chars().take(BODY_EXCERPT).collect();
        format!("{head}…")
    }
}

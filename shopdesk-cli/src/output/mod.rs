//! Output formatting for CLI.

mod json;
mod text;

pub use json::{AuthOutput, ErrorOutput, JsonFormatter, PlanOutput, ProductOutput};
pub use text::TextFormatter;

use shopdesk_commerce::SearchMiss;

/// One-line explanation of why a product search did not resolve the id.
pub fn describe_miss(miss: &SearchMiss) -> String {
    match miss {
        SearchMiss::NoMatch => "search found no origin id".to_string(),
        SearchMiss::Status(status) => format!("search returned HTTP {status}"),
        SearchMiss::Transport(err) => format!("search failed: {err}"),
    }
}

//! Helpers shared by unit tests.

use chrono::{TimeZone, Utc};
use shopdesk_fetch::{FetchContext, FixedClock, HttpTransport};
use std::sync::Arc;

/// A well-formed bcrypt salt string.
pub const SECRET: &str = "$2a$04$abcdefghijklmnopqrstuu";

/// Context over `transport` with a frozen clock.
pub fn context(transport: Arc<dyn HttpTransport>) -> FetchContext {
    FetchContext::builder()
        .http(transport)
        .clock(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        )))
        .build()
}

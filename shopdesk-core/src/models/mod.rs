//! Domain models for `ShopDesk`.
//!
//! ## Submodules
//!
//! - [`credential`] - Credentials, attempt candidates, access tokens
//! - [`window`] - Calendar-day windows and timestamp encodings
//! - [`trail`] - Diagnostic trail of attempted requests
//! - [`order`] - Canonical order record
//! - [`product`] - Canonical product record
//! - [`api`] - Inbound request/response bodies

mod api;
mod credential;
mod order;
mod product;
mod trail;
mod window;

pub use api::{
    AbortInfo, DayResult, ListingDebug, OrderListingRequest, OrderListingResponse, ProductLookupRequest,
    parse_request_date,
};
pub use credential::{AccountType, AttemptCandidate, Credential, TimestampPrecision, Token};
pub use order::{MaskFlags, Order};
pub use product::Product;
pub use trail::{AttemptOutcome, DiagnosticTrail, TrailEntry, parse_body};
pub use window::{DateWindow, TimestampEncoding, platform_offset};
#[cfg(test)]
mod serde_tests;

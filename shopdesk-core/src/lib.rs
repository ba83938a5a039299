// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ShopDesk` Core
//!
//! Core types and models for the `ShopDesk` seller dashboard backend.
//!
//! This crate provides the data model shared by the fetch engine, the
//! commerce client, the HTTP server and the CLI:
//!
//! ## Key Types
//!
//! ### Credentials & Tokens
//! - [`Credential`] - Application id, salted secret, optional solution/account ids
//! - [`AttemptCandidate`] - One token-request parameter set in the attempt matrix
//! - [`AccountType`] / [`TimestampPrecision`] - Dimensions of the attempt matrix
//! - [`Token`] - Access token returned by the platform
//!
//! ### Time
//! - [`DateWindow`] - A single local calendar day in the platform's zone
//! - [`TimestampEncoding`] - The textual forms the order API may accept
//!
//! ### Diagnostics
//! - [`DiagnosticTrail`] / [`TrailEntry`] - Ordered record of every attempt
//!
//! ### Canonical Records
//! - [`Order`] / [`MaskFlags`] - Normalized order rows
//! - [`Product`] - Normalized product detail
//!
//! ### Inbound API
//! - [`OrderListingRequest`] / [`OrderListingResponse`]
//! - [`ProductLookupRequest`]

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Inbound API
    AbortInfo,
    DayResult,
    ListingDebug,
    OrderListingRequest,
    OrderListingResponse,
    ProductLookupRequest,
    parse_request_date,
    // Credentials & tokens
    AccountType,
    AttemptCandidate,
    Credential,
    TimestampPrecision,
    Token,
    // Time
    DateWindow,
    TimestampEncoding,
    platform_offset,
    // Diagnostics
    AttemptOutcome,
    DiagnosticTrail,
    TrailEntry,
    parse_body,
    // Canonical records
    MaskFlags,
    Order,
    Product,
};

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ShopDesk` Fetch
//!
//! HTTP transport and the ordered-candidate pipeline.
//!
//! The commerce platform accepts an undocumented, account-dependent subset
//! of request shapes. This crate provides the machinery for probing them:
//!
//! ## Host APIs
//!
//! - [`host::http`] - [`HttpTransport`] trait and the reqwest-backed [`HttpClient`]
//! - `host::scripted` - Recording transport for tests (`testing` feature)
//!
//! ## Candidate Pipeline
//!
//! - [`strategy::Candidate`] - One request shape to try
//! - [`strategy::CandidateRunner`] - Sends a candidate and judges the response
//! - [`pipeline::CandidatePipeline`] - Tries candidates in order, keeping a full trail
//! - [`context::FetchContext`] - Transport, clock and settings for an operation
//!
//! ## Example
//!
//! ```ignore
//! use shopdesk_fetch::{CandidatePipeline, FetchContext};
//!
//! let ctx = FetchContext::new();
//! let pipeline = CandidatePipeline::new(candidates).record_untried();
//! let outcome = pipeline.execute(&runner).await;
//! println!("{} attempts", outcome.trail.len());
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod strategy;

// Errors
pub use error::{FetchError, HttpError};

// Host APIs
pub use host::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
#[cfg(any(test, feature = "testing"))]
pub use host::scripted::ScriptedTransport;

// Context, strategy & pipeline
pub use context::{
    Clock, DEFAULT_MAX_DAYS, FetchContext, FetchContextBuilder, FetchSettings, FixedClock,
    SystemClock,
};
pub use pipeline::{Accepted, CandidatePipeline, PipelineOutcome};
pub use strategy::{AttemptReport, Candidate, CandidateRunner, Verdict};

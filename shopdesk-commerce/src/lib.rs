// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::result_large_err)]

//! # `ShopDesk` Commerce
//!
//! Client for the commerce platform's seller API.
//!
//! ## Token Acquisition
//!
//! - [`auth::SignatureGenerator`] - bcrypt-based request signature
//! - [`auth::AttemptPlan`] - Ordered token request shapes
//! - [`auth::TokenAcquirer`] - Probes the plan until a token is issued
//!
//! ## Orders
//!
//! - [`orders::DateRangeChunker`] - One window per calendar day
//! - [`orders::day_candidates`] - Version × method × path × encoding matrix
//! - [`orders::OrderFetcher`] - Day-by-day fetch with hard-abort on 401/403
//! - [`orders::ResponseNormalizer`] - Alias-driven row mapping
//!
//! ## Products
//!
//! - [`products::ProductResolver`] - Channel id to origin id
//! - [`products::fetch_product_detail`] - Detail fetch with status mapping
//! - [`products::normalize_product`] - Detail mapping
//!
//! ## Entry Points
//!
//! - [`CommerceClient`] - All operations for one store
//! - [`ShopRegistry`] - Clients keyed by store name
//!
//! ## Example
//!
//! ```ignore
//! use shopdesk_commerce::CommerceClient;
//! use shopdesk_core::{Credential, OrderListingRequest};
//! use shopdesk_fetch::FetchContext;
//!
//! let credential = Credential::new(app_id, secret);
//! let client = CommerceClient::new("main", credential, FetchContext::new());
//! let listing = client
//!     .list_orders(&OrderListingRequest::new("main", "2024-03-01", "2024-03-07"))
//!     .await?;
//! println!("{} orders", listing.orders.len());
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod extract;
pub mod orders;
pub mod products;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{DEFAULT_BASE_URL, Endpoints};
pub use auth::{AttemptPlan, SignatureGenerator, TokenAcquirer, TokenAcquisition};
pub use client::{CommerceClient, ProductLookup};
pub use error::CommerceError;
pub use orders::{DateRangeChunker, DayOutcome, OrderFetcher, ResponseNormalizer};
pub use products::{ProductResolver, Resolution, SearchMiss};
pub use registry::ShopRegistry;

// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ShopDesk` Server
//!
//! JSON-over-HTTP boundary for the dashboard.
//!
//! - [`routes::router`] - `POST /api/orders`, `POST /api/products/lookup`, `GET /api/health`
//! - [`state::AppState`] - Read-only store registry shared by handlers
//! - [`error::ServerError`] - Error-to-status mapping that preserves upstream statuses

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ServerError;
pub use routes::{HealthResponse, router};
pub use server::serve;
pub use state::{AppState, build_registry};

//! HTTP routes.
//!
//! - `POST /api/orders` - order listing
//! - `POST /api/products/lookup` - product lookup
//! - `GET /api/health` - configured stores

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use shopdesk_core::{OrderListingRequest, OrderListingResponse, Product, ProductLookupRequest};
use tracing::{info, instrument};

use crate::error::ServerError;
use crate::state::AppState;

/// Health response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: &'static str,
    /// Configured store names.
    pub stores: Vec<String>,
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", post(list_orders))
        .route("/api/products/lookup", post(lookup_product))
        .route("/api/health", get(health))
        .with_state(state)
}

/// POST /api/orders
#[instrument(skip_all)]
async fn list_orders(
    State(state): State<AppState>,
    Json(request): Json<OrderListingRequest>,
) -> Result<Json<OrderListingResponse>, ServerError> {
    let listing = state.registry.list_orders(&request).await?;
    info!(
        days = listing.fetched_days.len(),
        orders = listing.orders.len(),
        "Served order listing"
    );
    Ok(Json(listing))
}

/// POST /api/products/lookup
#[instrument(skip_all)]
async fn lookup_product(
    State(state): State<AppState>,
    Json(request): Json<ProductLookupRequest>,
) -> Result<Json<Product>, ServerError> {
    let lookup = state.registry.lookup_product(&request).await?;
    info!(
        origin_product_id = %lookup.product.origin_product_id,
        resolved = lookup.resolution.is_resolved(),
        "Served product lookup"
    );
    Ok(Json(lookup.product))
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        stores: state
            .registry
            .names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    })
}

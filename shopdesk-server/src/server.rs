//! Listener.

use tokio::net::TcpListener;
use tracing::info;

use crate::error::ServerError;
use crate::routes::router;
use crate::state::AppState;

/// Serves the API on `addr` until the process is stopped.
///
/// # Errors
///
/// Returns [`ServerError::Io`] if the address cannot be bound.
pub async fn serve(addr: &str, state: AppState) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create the API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Search
        .route("/buscar", post(handlers::buscar))
        // Probes
        .route("/health", get(handlers::health))
        .route("/diagnostics", get(handlers::diagnostics))
        .with_state(state)
}

//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::lifecycle::AgentHandle;
use crate::api::routes;
use crate::config::AppConfig;
use crate::Result;

/// Start the API server
pub async fn serve_api(
    config: Arc<AppConfig>,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("🚀 Starting Vivi IA RAG API server...");

    let agent = Arc::new(AgentHandle::new(config.clone()));
    let state = AppState { config, agent };

    let api_router = routes::api_routes(state);

    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{addr}");
    info!("Available endpoints:");
    info!("  POST /api/buscar       - Execute a search");
    info!("  GET  /api/health       - Health check");
    info!("  GET  /api/diagnostics  - Agent state and environment report");

    axum::serve(listener, app).await?;

    Ok(())
}

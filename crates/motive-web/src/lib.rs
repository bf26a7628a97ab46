//! Motive Relay Web Server
//!
//! Axum-based HTTP front for the motive relay.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use motive_core::Relay;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::ApiError;
pub use state::AppState;

/// Create the application router.
///
/// `/models` is only routed for revisions that can list backend models.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/analyze", post(routes::analyze::analyze_story))
        .route("/health", get(routes::health::health_check));

    if state.revision().lists_models() {
        router = router.route("/models", get(routes::models::list_models));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(relay: Arc<dyn Relay>, host: &str, port: u16) -> anyhow::Result<()> {
    let revision = relay.revision();
    let app = create_router(AppState::new(relay));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!(%revision, "Relay listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

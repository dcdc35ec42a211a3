pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::pipeline::AppState;

/// Builds the front-end's axum router: `/scrape`, `/status/{task_id}`,
/// `/result/{task_id}`, plus a bare `/health` used by the demo client and
/// readiness probes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/scrape", get(routes::scrape::scrape).post(routes::scrape::scrape_body))
        .route("/status/{task_id}", get(routes::status::status))
        .route("/result/{task_id}", get(routes::result::result))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

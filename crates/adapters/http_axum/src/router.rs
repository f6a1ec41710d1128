//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use eigerdash_app::ports::StatusApi;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api` and dashboard routes at `/`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<A: StatusApi>(state: AppState<A>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve indicator icons and other static files from `dir` under `/img`.
#[must_use]
pub fn with_assets(router: Router, dir: &Path) -> Router {
    router.nest_service("/img", ServeDir::new(dir))
}

async fn health_check() -> &'static str {
    "OK"
}

//! JSON view of the dashboard for programmatic clients.

pub mod page;
pub mod sse;

use axum::Router;
use axum::routing::get;

use eigerdash_app::ports::StatusApi;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<A: StatusApi>() -> Router<AppState<A>> {
    Router::new()
        .route("/page", get(page::get::<A>))
        .route("/updates/stream", get(sse::stream::<A>))
}

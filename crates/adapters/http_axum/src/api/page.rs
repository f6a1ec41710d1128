//! `GET /api/page`: the rendered page as JSON.

use axum::Json;
use axum::extract::State;

use eigerdash_app::dashboard::Snapshot;
use eigerdash_app::ports::StatusApi;

use crate::state::AppState;

/// Current title, visible panel, API version and every rendered cell.
pub async fn get<A: StatusApi>(State(state): State<AppState<A>>) -> Json<Snapshot> {
    Json(state.dashboard.snapshot())
}

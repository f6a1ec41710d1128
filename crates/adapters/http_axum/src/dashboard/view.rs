//! View links: the server-side counterpart of location fragment changes.

use axum::extract::{Path, State};
use axum::response::Redirect;

use eigerdash_app::ports::StatusApi;

use crate::state::AppState;

/// `GET /view`: no segment, i.e. the home panel.
pub async fn home<A: StatusApi>(State(state): State<AppState<A>>) -> Redirect {
    state.navigator.navigate("").await;
    Redirect::to("/")
}

/// `GET /view/{*path}`: `path` plays the role of the fragment `#/<path>`.
pub async fn show<A: StatusApi>(
    State(state): State<AppState<A>>,
    Path(path): Path<String>,
) -> Redirect {
    let fragment = format!("#/{path}");
    let transition = state.navigator.navigate(&fragment).await;
    tracing::debug!(%fragment, panel = %transition.to, "view link followed");
    Redirect::to("/")
}

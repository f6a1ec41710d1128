//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! - `GET /`: every panel, the visible one shown
//! - `GET /view`, `GET /view/{*path}`: navigate, then redirect to `/`
//! - `POST /detector/{exposure,period,nimages}`: set a detector value (PRG)
//! - `POST /detector/command/{action}`: detector state machine command (PRG)
//! - `POST /processor/{params,start,stop}`: file writer controls (PRG)

pub mod forms;
pub mod page;
pub mod view;

use axum::Router;
use axum::routing::{get, post};

use eigerdash_app::ports::StatusApi;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<A: StatusApi>() -> Router<AppState<A>> {
    Router::new()
        .route("/", get(page::index::<A>))
        .route("/view", get(view::home::<A>))
        .route("/view/{*path}", get(view::show::<A>))
        .route("/detector/exposure", post(forms::set_exposure::<A>))
        .route("/detector/period", post(forms::set_period::<A>))
        .route("/detector/nimages", post(forms::set_image_count::<A>))
        .route("/detector/command/{action}", post(forms::detector_command::<A>))
        .route("/processor/params", post(forms::processor_params::<A>))
        .route("/processor/start", post(forms::start_writing::<A>))
        .route("/processor/stop", post(forms::stop_writing::<A>))
}

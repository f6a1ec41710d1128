//! Form actions (PRG): parse the input, dispatch the command, wait for its
//! PUTs to settle, then redirect so the next page shows any alert.

use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use serde::Deserialize;

use eigerdash_app::ports::StatusApi;
use eigerdash_domain::command::{Command, DetectorAction};
use eigerdash_domain::error::ValidationError;

use crate::error::DashboardError;
use crate::state::AppState;

/// Single-value form data.
#[derive(Deserialize)]
pub struct ValueForm {
    #[serde(default)]
    pub value: String,
}

/// File writer parameters.
#[derive(Deserialize)]
pub struct ProcessorForm {
    #[serde(default)]
    pub frames: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub filename: String,
}

async fn submit<A: StatusApi>(
    state: &AppState<A>,
    input: Result<Command, ValidationError>,
) -> Redirect {
    if let Some(dispatch) = state.commands.dispatch_input(input) {
        let failures = dispatch.settled().await;
        if failures > 0 {
            tracing::debug!(failures, "command completed with failures");
        }
    }
    Redirect::to("/")
}

/// `POST /detector/exposure`
pub async fn set_exposure<A: StatusApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<ValueForm>,
) -> Redirect {
    submit(&state, Command::exposure(&form.value)).await
}

/// `POST /detector/period`
pub async fn set_period<A: StatusApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<ValueForm>,
) -> Redirect {
    submit(&state, Command::period(&form.value)).await
}

/// `POST /detector/nimages`
pub async fn set_image_count<A: StatusApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<ValueForm>,
) -> Redirect {
    submit(&state, Command::image_count(&form.value)).await
}

/// `POST /detector/command/{action}`
pub async fn detector_command<A: StatusApi>(
    State(state): State<AppState<A>>,
    Path(action): Path<String>,
) -> Result<Redirect, DashboardError> {
    let action =
        DetectorAction::from_name(&action).ok_or(DashboardError::UnknownAction(action))?;
    Ok(submit(&state, Ok(Command::Detector(action))).await)
}

/// `POST /processor/params`
pub async fn processor_params<A: StatusApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<ProcessorForm>,
) -> Redirect {
    let input = Command::processor_params(&form.frames, &form.path, &form.filename);
    submit(&state, input).await
}

/// `POST /processor/start`
pub async fn start_writing<A: StatusApi>(State(state): State<AppState<A>>) -> Redirect {
    submit(&state, Ok(Command::StartWriting)).await
}

/// `POST /processor/stop`
pub async fn stop_writing<A: StatusApi>(State(state): State<AppState<A>>) -> Redirect {
    submit(&state, Ok(Command::StopWriting)).await
}

//! Server-Sent Events (SSE) stream for real-time dashboard updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use eigerdash_app::ports::StatusApi;
use eigerdash_app::update_bus::DashboardUpdate;

use crate::state::AppState;

fn event_name(update: &DashboardUpdate) -> &'static str {
    match update {
        DashboardUpdate::Rendered { .. } => "rendered",
        DashboardUpdate::Navigated { .. } => "navigated",
        DashboardUpdate::Alert { .. } => "alert",
    }
}

/// `GET /api/updates/stream`: SSE stream of dashboard updates.
///
/// Subscribes to the update bus and sends each update as a JSON `data:`
/// frame, named after its type. The stream continues until the client
/// disconnects.
pub async fn stream<A: StatusApi>(
    State(state): State<AppState<A>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let updates = BroadcastStream::new(state.dashboard.bus().subscribe());
    let events = updates.filter_map(|result| match result {
        Ok(update) => match serde_json::to_string(&update) {
            Ok(json) => Some(Ok(Event::default().event(event_name(&update)).data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize dashboard update for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE subscriber lagged, some updates were dropped");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

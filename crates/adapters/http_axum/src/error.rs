//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body returned by failing handlers.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors raised by dashboard handlers before any command is issued.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// `POST /detector/command/{action}` with an action the detector does not know.
    #[error("unknown detector command {0:?}")]
    UnknownAction(String),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownAction(_) => StatusCode::NOT_FOUND,
        };
        tracing::debug!(error = %self, "dashboard request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

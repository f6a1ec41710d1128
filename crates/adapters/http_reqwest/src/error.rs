//! Client-specific error type wrapping reqwest errors.

use eigerdash_domain::error::DashError;

/// Errors originating from the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// The request could not be sent or no response arrived in time.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// A success response whose body is not JSON.
    #[error("response body is not JSON")]
    Body(#[from] serde_json::Error),

    /// The client itself could not be built.
    #[error("invalid client configuration")]
    Build(#[source] reqwest::Error),
}

impl From<HttpClientError> for DashError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::Rejected { message, .. } => Self::Rejected(message),
            other => Self::Transport(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_server_text_when_rejected() {
        let err: DashError = HttpClientError::Rejected {
            status: 400,
            message: "Value out of range".to_string(),
        }
        .into();

        assert!(matches!(&err, DashError::Rejected(_)));
        assert_eq!(err.user_message(), "Value out of range");
    }

    #[test]
    fn should_map_body_errors_to_transport() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: DashError = HttpClientError::Body(source).into();

        assert!(matches!(err, DashError::Transport(_)));
    }
}

//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DashError`]
//! through `From` impls.

/// Top-level error for everything that talks to the detector control server.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// The request never produced a response (connection refused, timeout, …).
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-success status.
    ///
    /// Carries the server-reported `error` text verbatim when one was sent.
    #[error("{0}")]
    Rejected(String),

    /// The response body does not match the schema of its endpoint.
    #[error("schema violation")]
    Schema(#[from] SchemaError),

    /// User input could not be turned into a command.
    #[error("invalid input")]
    Validation(#[from] ValidationError),
}

impl DashError {
    /// Message shown to the user when a command fails.
    ///
    /// Rejections surface the exact server text; other kinds surface the
    /// innermost error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Transport(err) => err.to_string(),
            Self::Schema(err) => err.to_string(),
            Self::Validation(err) => err.to_string(),
        }
    }
}

/// A response body that does not match the expected shape.
#[derive(Debug, thiserror::Error)]
#[error("response from {endpoint} does not match its schema: {source}")]
pub struct SchemaError {
    /// Short name of the endpoint the response came from.
    pub endpoint: &'static str,
    /// Underlying deserialization failure.
    #[source]
    pub source: serde_json::Error,
}

/// Invalid user input for a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The field must hold a finite, non-negative number.
    #[error("{field} must be a non-negative number, got {input:?}")]
    NotANumber { field: &'static str, input: String },

    /// The field must hold a non-negative whole number.
    #[error("{field} must be a non-negative integer, got {input:?}")]
    NotAnInteger { field: &'static str, input: String },

    /// The field must not be blank.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

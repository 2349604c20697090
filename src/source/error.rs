//! Errors produced by news sources.

use reqwest::StatusCode;

/// Everything that can go wrong while talking to a news source.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Connection, TLS or timeout failure.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}{}", api_suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// The body was not the JSON shape we expect.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Search query cannot be empty")]
    BlankQuery,
}

impl GatewayError {
    /// Human-readable message for the UI, if this error carries one.
    ///
    /// A bare status code with no API message is not worth showing; callers
    /// substitute their own per-operation text.
    pub fn message(&self) -> Option<String> {
        match self {
            GatewayError::Status { message, .. } => {
                message.as_ref().filter(|m| !m.trim().is_empty()).cloned()
            }
            other => Some(other.to_string()),
        }
    }
}

// Request URLs carry the API key, so they never make it into the error.
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.without_url())
    }
}

fn api_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

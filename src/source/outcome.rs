//! The three-state result of an asynchronous gateway call.

use std::sync::Arc;

use super::GatewayError;

/// Progress or result of one gateway call.
///
/// Outcomes are transient: the coordinator folds them into the UI state and
/// never stores them.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Loading,
    Success(T),
    Error {
        message: String,
        /// Underlying failure, kept for diagnostics.
        cause: Option<Arc<GatewayError>>,
    },
}

impl<T> Outcome<T> {
    /// Wrap a gateway error, falling back to `default_message` when the
    /// error itself has nothing to say.
    pub fn from_error(err: GatewayError, default_message: &str) -> Self {
        let message = err
            .message()
            .unwrap_or_else(|| default_message.to_string());
        Outcome::Error {
            message,
            cause: Some(Arc::new(err)),
        }
    }

    /// Fold a fetch result into a terminal outcome.
    pub fn from_result(result: Result<T, GatewayError>, default_message: &str) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Self::from_error(err, default_message),
        }
    }
}

//! Client-side error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to '{url}': {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("failed to send message: {0}")]
    SendFailed(String),

    #[error("could not start the input editor: {0}")]
    InputUnavailable(String),
}

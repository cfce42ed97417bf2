use heliodesk_core::envelope::ShapeError;
use thiserror::Error;

/// Failure taxonomy for backend calls.
///
/// Keeping these as distinct variants lets composed workflows branch on the
/// failure kind instead of pattern-matching notification strings.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response body was not valid JSON: {0}")]
    MalformedBody(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Message suitable for showing an operator. Server-provided messages are
    /// passed through; transport and decoding failures get a generic line.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) | Self::Status { message, .. } => message.clone(),
            Self::Transport(_) => "could not reach the backend".to_string(),
            Self::MalformedBody(_) | Self::Shape(_) => {
                "the backend returned an unexpected response".to_string()
            }
        }
    }
}

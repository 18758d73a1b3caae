//! API error types

use thiserror::Error;

use storefront_session::AuthFailure;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not signed in")]
    NotSignedIn,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<ApiError> for AuthFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => AuthFailure::from_status(status, message),
            ApiError::Transport(e) => AuthFailure::Transport(e.to_string()),
            ApiError::Decode(e) => AuthFailure::MalformedResponse(e.to_string()),
            ApiError::InvalidUrl(e) => AuthFailure::Transport(e.to_string()),
            ApiError::NotSignedIn => AuthFailure::Unauthorized { message: None },
        }
    }
}

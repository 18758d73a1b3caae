//! Backend auth service seam

use async_trait::async_trait;
use thiserror::Error;

use crate::accounts::{SignInForm, SignUpForm};
use crate::session::StoredSession;

/// Closed set of ways an auth call can fail.
///
/// Session code matches on this exhaustively; adding a variant forces every
/// recovery branch to decide what it means.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Unauthorized")]
    Unauthorized { message: Option<String> },

    #[error("Not found")]
    NotFound { message: Option<String> },

    #[error("HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AuthFailure {
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => AuthFailure::Unauthorized { message },
            404 => AuthFailure::NotFound { message },
            _ => AuthFailure::Status { status, message },
        }
    }

    /// Server-supplied message, if the response carried one
    pub fn message(&self) -> Option<&str> {
        match self {
            AuthFailure::Unauthorized { message }
            | AuthFailure::NotFound { message }
            | AuthFailure::Status { message, .. } => message.as_deref(),
            AuthFailure::Transport(_) | AuthFailure::MalformedResponse(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AuthFailure::Unauthorized { .. } => Some(401),
            AuthFailure::NotFound { .. } => Some(404),
            AuthFailure::Status { status, .. } => Some(*status),
            AuthFailure::Transport(_) | AuthFailure::MalformedResponse(_) => None,
        }
    }
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `GET /auth/authenticate` with the token as bearer credential
    async fn authenticate(&self, token: &str) -> Result<StoredSession, AuthFailure>;

    /// `POST /auth/refresh`; the refresh credential travels out of band
    async fn refresh(&self) -> Result<StoredSession, AuthFailure>;

    async fn login(&self, form: &SignInForm) -> Result<StoredSession, AuthFailure>;

    async fn signup(&self, form: &SignUpForm) -> Result<(), AuthFailure>;

    async fn logout(&self) -> Result<(), AuthFailure>;
}

//! Storefront Session Management
//!
//! - A [`StoredSession`] in client storage means "logged in"; absence means
//!   logged out
//! - Start-up validates the stored token once against the backend
//! - A rejected token gets exactly one refresh attempt
//! - An unrecoverable refresh destroys the session and resets the host
//!
//! Storage, the backend and the host UI are all injected, so the same
//! [`SessionManager`] runs under a desktop shell, a terminal or a test.

mod accounts;
mod backend;
mod error;
mod host;
mod manager;
mod session;
mod state;
#[cfg(test)]
mod testing;

pub use accounts::{AccountService, SignInForm, SignUpForm};
pub use backend::{AuthBackend, AuthFailure};
pub use error::SessionError;
pub use host::{AppShell, Notification, NotificationKind, Notifier, Route};
pub use manager::{SessionManager, SESSION_KEY};
pub use session::StoredSession;
pub use state::SessionState;

pub type Result<T> = std::result::Result<T, SessionError>;

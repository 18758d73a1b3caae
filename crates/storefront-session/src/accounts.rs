//! Login, signup and logout flows

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SessionError;
use crate::host::{Notification, Route};
use crate::manager::SessionManager;
use crate::session::StoredSession;
use crate::Result;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: String,
}

impl std::fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpForm")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Account operations that start or end a session.
///
/// Every outcome is reported to the user exactly once through the notifier;
/// the `Result` is for callers that need to branch on it.
pub struct AccountService {
    sessions: SessionManager,
}

impl AccountService {
    pub fn new(sessions: SessionManager) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub async fn sign_in(&self, form: &SignInForm) -> Result<StoredSession> {
        require("Email", &form.email)?;
        require("Password", &form.password)?;

        match self.sessions.backend().login(form).await {
            Ok(user) => {
                self.sessions.persist(&user)?;
                self.sessions.shell().navigate(Route::Home);
                self.sessions.notifier().notify(
                    Notification::success("login", "Signed in.")
                        .with_timer(Duration::from_millis(1000)),
                );

                tracing::info!(session_email = %user.email, "Signed in");
                Ok(user)
            }
            Err(failure) => {
                let message = failure.message().unwrap_or("Sign in failed.").to_string();
                self.sessions
                    .notifier()
                    .notify(Notification::failed("login", message));

                tracing::warn!(email = %form.email, error = %failure, "Sign in failed");
                Err(failure.into())
            }
        }
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> Result<()> {
        require("Email", &form.email)?;
        require("Name", &form.name)?;
        require("Password", &form.password)?;

        match self.sessions.backend().signup(form).await {
            Ok(()) => {
                self.sessions.notifier().notify(Notification::success(
                    "signup",
                    "Sign up complete. Please sign in.",
                ));
                self.sessions.shell().navigate(Route::Login);

                tracing::info!(email = %form.email, "Signed up");
                Ok(())
            }
            Err(failure) => {
                let message = failure.message().unwrap_or("Sign up failed.").to_string();
                self.sessions
                    .notifier()
                    .notify(Notification::failed("signup", message));

                tracing::warn!(email = %form.email, error = %failure, "Sign up failed");
                Err(failure.into())
            }
        }
    }

    /// Local session is dropped before the backend is told, so a failed
    /// logout request still leaves the client signed out.
    pub async fn sign_out(&self) -> Result<()> {
        self.sessions.clear()?;

        match self.sessions.backend().logout().await {
            Ok(()) => {
                self.sessions
                    .notifier()
                    .notify(Notification::success("logout", "Signed out."));
                self.sessions.shell().navigate(Route::Home);
                self.sessions.shell().reload();

                tracing::info!("Signed out");
                Ok(())
            }
            Err(failure) => {
                self.sessions.notifier().notify(Notification::failed(
                    "logout",
                    "Signed out locally, but the server could not be reached.",
                ));

                tracing::warn!(error = %failure, "Logout request failed");
                Err(failure.into())
            }
        }
    }
}

impl Clone for AccountService {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SessionError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AuthFailure;
    use crate::host::NotificationKind;
    use crate::state::SessionState;
    use crate::testing::{harness, HostEvent};

    fn sign_in_form() -> SignInForm {
        SignInForm {
            email: "kim@x.com".to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_persists_and_navigates_home() {
        let h = harness();
        let accounts = AccountService::new(h.manager.clone());
        let user = StoredSession::new("kim@x.com", "Kim", "tok1");
        h.backend.on_login(Ok(user.clone()));

        let signed_in = accounts.sign_in(&sign_in_form()).await.unwrap();

        assert_eq!(signed_in, user);
        assert_eq!(h.manager.load(), Some(user));
        assert_eq!(h.manager.state(), SessionState::LoggedIn);
        assert_eq!(h.host.events(), vec![HostEvent::Navigate(Route::Home)]);

        let toasts = h.host.notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
        assert_eq!(toasts[0].timer, Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_sign_in_failure_shows_server_message() {
        let h = harness();
        let accounts = AccountService::new(h.manager.clone());
        h.backend.on_login(Err(AuthFailure::Status {
            status: 400,
            message: Some("Wrong password".to_string()),
        }));

        let err = accounts.sign_in(&sign_in_form()).await.unwrap_err();

        assert!(matches!(err, SessionError::Auth(AuthFailure::Status { status: 400, .. })));
        assert!(h.manager.load().is_none());
        let toasts = h.host.notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Failed);
        assert_eq!(toasts[0].message, "Wrong password");
        assert!(h.host.events().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_rejects_blank_fields_without_network() {
        let h = harness();
        let accounts = AccountService::new(h.manager.clone());
        let form = SignInForm {
            email: "  ".to_string(),
            password: "pw".to_string(),
        };

        let err = accounts.sign_in(&form).await.unwrap_err();

        assert!(matches!(err, SessionError::EmptyField("Email")));
        assert_eq!(*h.backend.login_calls.lock(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_navigates_to_login() {
        let h = harness();
        let accounts = AccountService::new(h.manager.clone());
        h.backend.on_signup(Ok(()));

        let form = SignUpForm {
            email: "kim@x.com".to_string(),
            name: "Kim".to_string(),
            password: "pw".to_string(),
            phone: "010-1234-5678".to_string(),
        };
        accounts.sign_up(&form).await.unwrap();

        assert!(h.manager.load().is_none());
        assert_eq!(h.host.events(), vec![HostEvent::Navigate(Route::Login)]);
        assert_eq!(h.host.notifications()[0].kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_sign_out_clears_before_backend_call() {
        let h = harness();
        let accounts = AccountService::new(h.manager.clone());
        h.manager
            .persist(&StoredSession::new("kim@x.com", "Kim", "tok1"))
            .unwrap();
        h.backend
            .on_logout(Err(AuthFailure::Transport("offline".to_string())));

        assert!(accounts.sign_out().await.is_err());

        assert!(h.manager.load().is_none());
        assert_eq!(h.manager.state(), SessionState::LoggedOut);
        assert_eq!(*h.backend.logout_calls.lock(), 1);
        assert_eq!(h.host.notifications()[0].kind, NotificationKind::Failed);
    }

    #[tokio::test]
    async fn test_sign_out_success_reloads() {
        let h = harness();
        let accounts = AccountService::new(h.manager.clone());
        h.manager
            .persist(&StoredSession::new("kim@x.com", "Kim", "tok1"))
            .unwrap();

        accounts.sign_out().await.unwrap();

        assert!(h.manager.load().is_none());
        assert_eq!(
            h.host.events(),
            vec![HostEvent::Navigate(Route::Home), HostEvent::Reload]
        );
    }

    #[test]
    fn test_forms_hide_passwords_in_debug() {
        let printed = format!("{:?}", sign_in_form());
        assert!(!printed.contains("pw\""));
        assert!(printed.contains("kim@x.com"));
    }
}

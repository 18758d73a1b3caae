//! Session Manager
//!
//! Single owner of the persisted session. Validation and refresh failures are
//! resolved here (state change, notification, host reset) and never surface
//! to callers, who only ever see a session or `None`.

use parking_lot::RwLock;
use std::sync::Arc;

use storefront_storage::{KeyValueStore, KeyValueStoreExt};

use crate::backend::{AuthBackend, AuthFailure};
use crate::host::{AppShell, Notification, Notifier, Route};
use crate::session::StoredSession;
use crate::state::SessionState;
use crate::Result;

/// Storage slot holding the serialized [`StoredSession`]
pub const SESSION_KEY: &str = "user";

const RELOGIN_PROMPT: &str = "Please sign in again.";

pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn AuthBackend>,
    notifier: Arc<dyn Notifier>,
    shell: Arc<dyn AppShell>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn AuthBackend>,
        notifier: Arc<dyn Notifier>,
        shell: Arc<dyn AppShell>,
    ) -> Self {
        let manager = Self {
            store,
            backend,
            notifier,
            shell,
            state: Arc::new(RwLock::new(SessionState::LoggedOut)),
        };

        if manager.load().is_some() {
            *manager.state.write() = SessionState::LoggedIn;
        }

        manager
    }

    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Read the persisted session. Unreadable storage counts as logged out.
    pub fn load(&self) -> Option<StoredSession> {
        match self.store.get_json::<StoredSession>(SESSION_KEY) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Stored session unreadable, treating as logged out");
                None
            }
        }
    }

    /// Bearer token of the persisted session, if any
    pub fn token(&self) -> Option<String> {
        self.load()
            .filter(StoredSession::has_token)
            .map(|session| session.token)
    }

    /// Overwrite the persisted session; last write wins
    pub fn persist(&self, session: &StoredSession) -> Result<()> {
        self.store.set_json(SESSION_KEY, session)?;
        self.transition(SessionState::LoggedIn);

        tracing::debug!(session_email = %session.email, "Persisted session");

        Ok(())
    }

    /// Delete the persisted session; idempotent
    pub fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        self.transition(SessionState::LoggedOut);

        tracing::debug!("Cleared session");

        Ok(())
    }

    /// Validate a session against the backend.
    ///
    /// Does not persist the returned copy; that is the caller's call (see
    /// [`SessionManager::restore`]). A 401 gets exactly one refresh, which
    /// does persist on success.
    pub async fn authenticate(&self, session: Option<&StoredSession>) -> Option<StoredSession> {
        let session = session?;

        self.transition(SessionState::Validating);

        match self.backend.authenticate(&session.token).await {
            Ok(validated) => {
                self.transition(SessionState::LoggedIn);
                tracing::info!(session_email = %validated.email, "Session validated");
                Some(validated)
            }
            Err(AuthFailure::Unauthorized { .. }) => {
                tracing::info!(session_email = %session.email, "Stored token rejected, refreshing");
                self.refresh().await
            }
            Err(
                failure @ (AuthFailure::NotFound { .. }
                | AuthFailure::Status { .. }
                | AuthFailure::Transport(_)
                | AuthFailure::MalformedResponse(_)),
            ) => {
                // Token was not rejected outright; keep it for the next attempt
                tracing::warn!(
                    session_email = %session.email,
                    error = %failure,
                    "Session validation inconclusive"
                );
                self.transition(SessionState::LoggedIn);
                None
            }
        }
    }

    /// Exchange an expired session for a new one. Never retried.
    async fn refresh(&self) -> Option<StoredSession> {
        self.transition(SessionState::Refreshing);

        match self.backend.refresh().await {
            Ok(session) => {
                if let Err(e) = self.persist(&session) {
                    tracing::error!(error = %e, "Failed to persist refreshed session");
                    self.transition(SessionState::LoggedIn);
                }

                self.notifier
                    .notify(Notification::success("reauthenticated", "Signed in again."));

                tracing::info!(session_email = %session.email, "Session refreshed");
                Some(session)
            }
            Err(AuthFailure::Unauthorized { .. }) => {
                tracing::info!("Refresh rejected, signing out");
                self.force_logout(false);
                None
            }
            Err(AuthFailure::NotFound { .. }) => {
                tracing::info!("Refresh target not found, signing out and reloading");
                self.force_logout(true);
                None
            }
            Err(
                failure @ (AuthFailure::Status { .. }
                | AuthFailure::Transport(_)
                | AuthFailure::MalformedResponse(_)),
            ) => {
                // The stored token is already known to be expired
                tracing::warn!(error = %failure, "Refresh failed, discarding session");
                self.discard();
                self.notifier.notify(Notification::failed(
                    "reauthentication failed",
                    "Could not restore your session. Please sign in again.",
                ));
                None
            }
        }
    }

    /// Start-up sequence: validate whatever is stored and keep the server copy
    pub async fn restore(&self) -> Option<StoredSession> {
        let Some(stored) = self.load() else {
            self.discard();
            return None;
        };

        let validated = self.authenticate(Some(&stored)).await?;

        if let Err(e) = self.persist(&validated) {
            tracing::error!(error = %e, "Failed to persist validated session");
        }

        Some(validated)
    }

    pub(crate) fn backend(&self) -> &Arc<dyn AuthBackend> {
        &self.backend
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub(crate) fn shell(&self) -> &Arc<dyn AppShell> {
        &self.shell
    }

    fn force_logout(&self, reload: bool) {
        self.discard();
        self.shell.alert(RELOGIN_PROMPT);
        self.shell.navigate(Route::Home);
        if reload {
            self.shell.reload();
        }
    }

    fn discard(&self) {
        if let Err(e) = self.clear() {
            tracing::error!(error = %e, "Failed to clear stored session");
            self.transition(SessionState::LoggedOut);
        }
    }

    fn transition(&self, target: SessionState) {
        let mut state = self.state.write();
        if !state.can_transition_to(target) {
            tracing::warn!(from = %*state, to = %target, "Unexpected session state transition");
        }
        *state = target;
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            backend: Arc::clone(&self.backend),
            notifier: Arc::clone(&self.notifier),
            shell: Arc::clone(&self.shell),
            state: Arc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NotificationKind;
    use crate::testing::{harness, HostEvent};
    use storefront_storage::{MemoryStore, StorageError};

    fn kim() -> StoredSession {
        StoredSession::new("kim@x.com", "Kim", "tok1")
    }

    #[test]
    fn test_load_on_empty_storage() {
        let h = harness();
        assert!(h.manager.load().is_none());
        assert_eq!(h.manager.state(), SessionState::LoggedOut);
    }

    #[test]
    fn test_load_with_unavailable_storage() {
        struct Unavailable;

        impl KeyValueStore for Unavailable {
            fn get(&self, _key: &str) -> storefront_storage::Result<Option<String>> {
                Err(StorageError::Unavailable("no window".to_string()))
            }
            fn set(&self, _key: &str, _value: &str) -> storefront_storage::Result<()> {
                Err(StorageError::Unavailable("no window".to_string()))
            }
            fn remove(&self, _key: &str) -> storefront_storage::Result<()> {
                Err(StorageError::Unavailable("no window".to_string()))
            }
        }

        let h = harness();
        let manager = SessionManager::new(
            Arc::new(Unavailable),
            h.backend.clone(),
            h.host.clone(),
            h.host.clone(),
        );

        assert!(manager.load().is_none());
        assert!(manager.persist(&kim()).is_err());
    }

    #[test]
    fn test_load_with_corrupt_slot() {
        let h = harness();
        h.store.set(SESSION_KEY, "not json").unwrap();
        assert!(h.manager.load().is_none());
    }

    #[test]
    fn test_persist_last_write_wins() {
        let h = harness();
        let s1 = kim();
        let s2 = StoredSession::new("lee@x.com", "Lee", "tok9");

        h.manager.persist(&s1).unwrap();
        h.manager.persist(&s2).unwrap();

        assert_eq!(h.manager.load(), Some(s2));
        assert_eq!(h.manager.state(), SessionState::LoggedIn);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let h = harness();
        h.manager.persist(&kim()).unwrap();

        h.manager.clear().unwrap();
        h.manager.clear().unwrap();

        assert!(h.manager.load().is_none());
        assert!(h.store.is_empty());
        assert_eq!(h.manager.state(), SessionState::LoggedOut);
    }

    #[test]
    fn test_initial_state_follows_storage() {
        let store = MemoryStore::new();
        store.set_json(SESSION_KEY, &kim()).unwrap();

        let h = harness();
        let manager = SessionManager::new(
            Arc::new(store),
            h.backend.clone(),
            h.host.clone(),
            h.host.clone(),
        );
        assert_eq!(manager.state(), SessionState::LoggedIn);
        assert_eq!(manager.token().as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_authenticate_absent_makes_no_call() {
        let h = harness();
        assert!(h.manager.authenticate(None).await.is_none());
        assert_eq!(h.backend.authenticate_calls(), 0);
        assert_eq!(h.backend.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn test_authenticate_success_does_not_touch_storage() {
        let h = harness();
        let server_copy = StoredSession::new("kim@x.com", "Kim", "tok1").with_phone("010");
        h.backend.on_authenticate(Ok(server_copy.clone()));

        let result = h.manager.authenticate(Some(&kim())).await;

        assert_eq!(result, Some(server_copy));
        assert!(h.manager.load().is_none());
        assert_eq!(
            h.backend.authenticate_tokens.lock().as_slice(),
            &["tok1".to_string()]
        );
        assert_eq!(h.manager.state(), SessionState::LoggedIn);
    }

    #[tokio::test]
    async fn test_unauthorized_triggers_exactly_one_refresh() {
        let h = harness();
        h.backend
            .on_authenticate(Err(AuthFailure::Unauthorized { message: None }));
        h.backend
            .on_refresh(Err(AuthFailure::Status { status: 500, message: None }));
        // A second scripted reply must never be consumed
        h.backend.on_refresh(Ok(kim()));

        let result = h.manager.authenticate(Some(&kim())).await;

        assert!(result.is_none());
        assert_eq!(h.backend.refresh_calls(), 1);
        assert_eq!(h.backend.authenticate_calls(), 1);
    }

    #[tokio::test]
    async fn test_other_validation_failure_keeps_storage() {
        let h = harness();
        h.manager.persist(&kim()).unwrap();
        h.backend
            .on_authenticate(Err(AuthFailure::Transport("connection refused".to_string())));

        let result = h.manager.authenticate(Some(&kim())).await;

        assert!(result.is_none());
        assert_eq!(h.backend.refresh_calls(), 0);
        assert_eq!(h.manager.load(), Some(kim()));
        assert!(h.host.notifications().is_empty());
        assert!(h.host.events().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_other_status_discards_session() {
        let h = harness();
        h.manager.persist(&kim()).unwrap();
        h.backend
            .on_authenticate(Err(AuthFailure::Unauthorized { message: None }));
        h.backend
            .on_refresh(Err(AuthFailure::Status { status: 502, message: None }));

        assert!(h.manager.authenticate(Some(&kim())).await.is_none());

        assert!(h.manager.load().is_none());
        assert_eq!(h.manager.state(), SessionState::LoggedOut);
        let toasts = h.host.notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Failed);
        // No blocking prompt for a transient failure
        assert!(h.host.events().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_not_found_reloads() {
        let h = harness();
        h.manager.persist(&kim()).unwrap();
        h.backend
            .on_authenticate(Err(AuthFailure::Unauthorized { message: None }));
        h.backend
            .on_refresh(Err(AuthFailure::NotFound { message: None }));

        assert!(h.manager.authenticate(Some(&kim())).await.is_none());

        assert!(h.manager.load().is_none());
        assert_eq!(
            h.host.events(),
            vec![
                HostEvent::Alert(RELOGIN_PROMPT.to_string()),
                HostEvent::Navigate(Route::Home),
                HostEvent::Reload,
            ]
        );
    }

    #[tokio::test]
    async fn test_restore_valid_token() {
        // Stored token valid -> server copy replaces storage
        let h = harness();
        h.manager.persist(&kim()).unwrap();
        let server_copy = StoredSession {
            id: Some(7),
            email: "kim@x.com".to_string(),
            name: "Kim".to_string(),
            token: String::new(),
            role: None,
            phone: None,
        };
        h.backend.on_authenticate(Ok(server_copy.clone()));

        let restored = h.manager.restore().await;

        assert_eq!(restored, Some(server_copy.clone()));
        assert_eq!(h.manager.load(), Some(server_copy));
        assert_eq!(h.manager.state(), SessionState::LoggedIn);
        // A copy without a token leaves later requests unauthenticated
        assert_eq!(h.manager.token(), None);
    }

    #[tokio::test]
    async fn test_restore_expired_token_refreshes() {
        // Stored token expired -> refresh persists the new token, one toast
        let h = harness();
        h.manager.persist(&kim()).unwrap();
        h.backend
            .on_authenticate(Err(AuthFailure::Unauthorized { message: None }));
        h.backend
            .on_refresh(Ok(StoredSession::new("kim@x.com", "Kim", "tok2")));

        let restored = h.manager.restore().await;

        assert_eq!(restored.map(|s| s.token), Some("tok2".to_string()));
        assert_eq!(h.manager.load().map(|s| s.token), Some("tok2".to_string()));

        let toasts = h.host.notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::Success);
        assert!(h.host.events().is_empty());
    }

    #[tokio::test]
    async fn test_restore_refresh_rejected_signs_out() {
        // Stored token expired, refresh rejected -> empty storage, prompt, home
        let h = harness();
        h.manager.persist(&kim()).unwrap();
        h.backend
            .on_authenticate(Err(AuthFailure::Unauthorized { message: None }));
        h.backend
            .on_refresh(Err(AuthFailure::Unauthorized { message: None }));

        let restored = h.manager.restore().await;

        assert!(restored.is_none());
        assert!(h.manager.load().is_none());
        assert!(h.store.is_empty());
        assert_eq!(h.manager.state(), SessionState::LoggedOut);
        assert_eq!(
            h.host.events(),
            vec![
                HostEvent::Alert(RELOGIN_PROMPT.to_string()),
                HostEvent::Navigate(Route::Home),
            ]
        );
        assert!(h.host.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_restore_without_stored_session() {
        let h = harness();
        assert!(h.manager.restore().await.is_none());
        assert_eq!(h.backend.authenticate_calls(), 0);
        assert_eq!(h.manager.state(), SessionState::LoggedOut);
    }
}

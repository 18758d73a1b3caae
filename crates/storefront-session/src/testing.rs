//! In-process fakes for the backend and host

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use storefront_storage::MemoryStore;

use crate::accounts::{SignInForm, SignUpForm};
use crate::backend::{AuthBackend, AuthFailure};
use crate::host::{AppShell, Notification, Notifier, Route};
use crate::manager::SessionManager;
use crate::session::StoredSession;

type Reply<T> = Result<T, AuthFailure>;

#[derive(Default)]
pub struct FakeBackend {
    pub authenticate_replies: Mutex<VecDeque<Reply<StoredSession>>>,
    pub refresh_replies: Mutex<VecDeque<Reply<StoredSession>>>,
    pub login_replies: Mutex<VecDeque<Reply<StoredSession>>>,
    pub signup_replies: Mutex<VecDeque<Reply<()>>>,
    pub logout_replies: Mutex<VecDeque<Reply<()>>>,
    pub authenticate_tokens: Mutex<Vec<String>>,
    pub refresh_calls: Mutex<usize>,
    pub login_calls: Mutex<usize>,
    pub logout_calls: Mutex<usize>,
}

impl FakeBackend {
    pub fn on_authenticate(&self, reply: Reply<StoredSession>) {
        self.authenticate_replies.lock().push_back(reply);
    }

    pub fn on_refresh(&self, reply: Reply<StoredSession>) {
        self.refresh_replies.lock().push_back(reply);
    }

    pub fn on_login(&self, reply: Reply<StoredSession>) {
        self.login_replies.lock().push_back(reply);
    }

    pub fn on_signup(&self, reply: Reply<()>) {
        self.signup_replies.lock().push_back(reply);
    }

    pub fn on_logout(&self, reply: Reply<()>) {
        self.logout_replies.lock().push_back(reply);
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_tokens.lock().len()
    }

    pub fn refresh_calls(&self) -> usize {
        *self.refresh_calls.lock()
    }
}

fn unscripted<T>() -> Reply<T> {
    Err(AuthFailure::Transport("no scripted reply".to_string()))
}

#[async_trait]
impl AuthBackend for FakeBackend {
    async fn authenticate(&self, token: &str) -> Reply<StoredSession> {
        self.authenticate_tokens.lock().push(token.to_string());
        self.authenticate_replies
            .lock()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn refresh(&self) -> Reply<StoredSession> {
        *self.refresh_calls.lock() += 1;
        self.refresh_replies.lock().pop_front().unwrap_or_else(unscripted)
    }

    async fn login(&self, _form: &SignInForm) -> Reply<StoredSession> {
        *self.login_calls.lock() += 1;
        self.login_replies.lock().pop_front().unwrap_or_else(unscripted)
    }

    async fn signup(&self, _form: &SignUpForm) -> Reply<()> {
        self.signup_replies.lock().pop_front().unwrap_or_else(unscripted)
    }

    async fn logout(&self) -> Reply<()> {
        *self.logout_calls.lock() += 1;
        self.logout_replies.lock().pop_front().unwrap_or(Ok(()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Alert(String),
    Navigate(Route),
    Reload,
}

#[derive(Default)]
pub struct RecordingHost {
    pub notifications: Mutex<Vec<Notification>>,
    pub events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().clone()
    }
}

impl Notifier for RecordingHost {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

impl AppShell for RecordingHost {
    fn alert(&self, message: &str) {
        self.events.lock().push(HostEvent::Alert(message.to_string()));
    }

    fn navigate(&self, route: Route) {
        self.events.lock().push(HostEvent::Navigate(route));
    }

    fn reload(&self) {
        self.events.lock().push(HostEvent::Reload);
    }
}

pub struct Harness {
    pub store: MemoryStore,
    pub backend: Arc<FakeBackend>,
    pub host: Arc<RecordingHost>,
    pub manager: SessionManager,
}

pub fn harness() -> Harness {
    let store = MemoryStore::new();
    let backend = Arc::new(FakeBackend::default());
    let host = Arc::new(RecordingHost::default());
    let manager = SessionManager::new(
        Arc::new(store.clone()),
        backend.clone(),
        host.clone(),
        host.clone(),
    );

    Harness {
        store,
        backend,
        host,
        manager,
    }
}

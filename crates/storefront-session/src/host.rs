//! Capabilities supplied by the host environment

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failed,
}

/// Transient toast-style message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Dedup key; the host may replace an on-screen toast with the same id
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(with = "millis")]
    pub timer: Duration,
}

impl Notification {
    const DEFAULT_TIMER: Duration = Duration::from_millis(2000);

    pub fn success(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NotificationKind::Success,
            message: message.into(),
            timer: Self::DEFAULT_TIMER,
        }
    }

    pub fn failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NotificationKind::Failed,
            message: message.into(),
            timer: Self::DEFAULT_TIMER,
        }
    }

    pub fn with_timer(mut self, timer: Duration) -> Self {
        self.timer = timer;
        self
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Entry views the session layer can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/auth/login",
        }
    }
}

/// Navigation and modal primitives of the host application
pub trait AppShell: Send + Sync {
    /// Blocking prompt; returns once the user has acknowledged it
    fn alert(&self, message: &str);

    fn navigate(&self, route: Route);

    /// Drop all in-memory application state and start over
    fn reload(&self);
}

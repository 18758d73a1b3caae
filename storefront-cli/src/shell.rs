//! Terminal host: toasts, alerts and navigation as stderr lines

use parking_lot::RwLock;

use storefront_core::{AppShell, Notification, NotificationKind, Notifier, Route};

/// Writes each event to stderr, or only records it when `events` is set
pub struct TerminalShell {
    events: Option<RwLock<Vec<String>>>,
}

impl TerminalShell {
    pub fn new() -> Self {
        Self { events: None }
    }

    /// Keeps events in memory without writing to stderr
    #[cfg(test)]
    pub fn recording() -> Self {
        Self {
            events: Some(RwLock::new(Vec::new())),
        }
    }

    #[cfg(test)]
    pub fn events(&self) -> Vec<String> {
        self.events
            .as_ref()
            .map(|events| events.read().clone())
            .unwrap_or_default()
    }

    fn emit(&self, line: String) {
        match &self.events {
            Some(events) => events.write().push(line),
            None => eprintln!("{line}"),
        }
    }
}

impl Default for TerminalShell {
    fn default() -> Self {
        Self::new()
    }
}

fn render(notification: &Notification) -> String {
    let tag = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Failed => "failed",
    };
    format!("[{tag}] {}", notification.message)
}

impl Notifier for TerminalShell {
    fn notify(&self, notification: Notification) {
        tracing::debug!(id = %notification.id, "Toast");
        self.emit(render(&notification));
    }
}

impl AppShell for TerminalShell {
    fn alert(&self, message: &str) {
        self.emit(format!("[alert] {message}"));
    }

    fn navigate(&self, route: Route) {
        self.emit(format!("[navigate] {}", route.path()));
    }

    // Nothing cached between invocations
    fn reload(&self) {
        self.emit("[reload]".to_string());
    }
}

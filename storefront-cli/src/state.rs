//! Application state management
use std::sync::Arc;

use storefront_core::{AppShell, Config, Notifier, Result, Storefront};

/// Host-side wrapper around the storefront
pub struct AppState {
    storefront: Storefront,
}

impl AppState {
    pub fn new<H>(config: Config, host: Arc<H>) -> Result<Self>
    where
        H: Notifier + AppShell + 'static,
    {
        let storefront = Storefront::new(config, host.clone(), host)?;
        Ok(Self { storefront })
    }

    #[cfg(test)]
    pub fn with_store<H>(
        config: Config,
        store: Arc<dyn storefront_core::KeyValueStore>,
        host: Arc<H>,
    ) -> Result<Self>
    where
        H: Notifier + AppShell + 'static,
    {
        let storefront = Storefront::with_store(config, store, host.clone(), host)?;
        Ok(Self { storefront })
    }

    /// Restore the previous session before any command runs
    pub async fn initialize(&self) {
        match self.storefront.initialize().await {
            Some(user) => tracing::debug!(email = %user.email, "Session restored"),
            None => tracing::debug!("No session to restore"),
        }
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }
}

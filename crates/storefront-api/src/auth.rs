//! `/auth/*` endpoints
//!
//! One envelope per endpoint: `{ user }` for authenticate and login,
//! `{ refreshUser }` for refresh.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use storefront_session::{AuthBackend, AuthFailure, SignInForm, SignUpForm, StoredSession};

use crate::client::ApiClient;

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: StoredSession,
}

#[derive(Debug, Deserialize)]
struct RefreshEnvelope {
    #[serde(rename = "refreshUser")]
    refresh_user: StoredSession,
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn authenticate(&self, token: &str) -> Result<StoredSession, AuthFailure> {
        let builder = self.request(Method::GET, "/auth/authenticate", Some(token))?;
        let envelope: UserEnvelope = self.execute(builder).await?;
        Ok(envelope.user)
    }

    async fn refresh(&self) -> Result<StoredSession, AuthFailure> {
        let builder = self.request(Method::POST, "/auth/refresh", None)?;
        let envelope: RefreshEnvelope = self.execute(builder).await?;
        Ok(envelope.refresh_user)
    }

    async fn login(&self, form: &SignInForm) -> Result<StoredSession, AuthFailure> {
        let builder = self.request(Method::POST, "/auth/login", None)?.json(form);
        let envelope: UserEnvelope = self.execute(builder).await?;
        Ok(envelope.user)
    }

    async fn signup(&self, form: &SignUpForm) -> Result<(), AuthFailure> {
        let builder = self.request(Method::POST, "/auth/signup", None)?.json(form);
        Ok(self.execute_empty(builder).await?)
    }

    async fn logout(&self) -> Result<(), AuthFailure> {
        let builder = self.request(Method::POST, "/auth/logout", None)?;
        Ok(self.execute_empty(builder).await?)
    }
}

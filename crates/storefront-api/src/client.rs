//! HTTP plumbing shared by every endpoint

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::SET_COOKIE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use storefront_storage::KeyValueStore;

use crate::error::ApiError;
use crate::Result;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage slot holding the backend's cookies as a `Cookie` header value
pub const COOKIE_KEY: &str = "cookies";

/// Client for the storefront backend.
///
/// Keeps a cookie jar so the refresh credential the backend sets on login is
/// replayed on `POST /auth/refresh`. With [`ApiClient::with_cookie_store`]
/// the jar outlives the process.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
    cookie_store: Option<Arc<dyn KeyValueStore>>,
}

/// Error body; validation errors send a list of messages
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn into_string(self) -> String {
        match self {
            ErrorMessage::One(message) => message,
            ErrorMessage::Many(messages) => messages.join(", "),
        }
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            jar,
            cookie_store: None,
        })
    }

    /// Load cookies saved by an earlier client and keep `store` in sync
    /// whenever the backend sets new ones
    pub fn with_cookie_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        match store.get(COOKIE_KEY) {
            Ok(Some(header)) => self.load_cookies(&header),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Stored cookies unreadable, starting without"),
        }

        self.cookie_store = Some(store);
        self
    }

    fn load_cookies(&self, header: &str) {
        let pairs = header.split(';').map(str::trim).filter(|p| !p.is_empty());
        for pair in pairs {
            self.jar.add_cookie_str(pair, &self.base_url);
        }
    }

    fn save_cookies(&self) {
        let Some(store) = &self.cookie_store else {
            return;
        };

        let header = self
            .jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string));
        let result = match header {
            Some(header) => store.set(COOKIE_KEY, &header),
            None => store.remove(COOKIE_KEY),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to save cookies");
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(method, url);

        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send and decode a JSON body
    pub(crate) async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let bytes = self.send(builder).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and ignore whatever body comes back
    pub(crate) async fn execute_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "Request failed");
            ApiError::Transport(e)
        })?;

        if response.headers().contains_key(SET_COOKIE) {
            self.save_cookies();
        }

        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(method = %method, url = %url, status = status.as_u16(), "Response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .map(ErrorMessage::into_string);

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(bytes.to_vec())
    }
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            jar: Arc::clone(&self.jar),
            cookie_store: self.cookie_store.clone(),
        }
    }
}

/// Bearer token for calls the backend refuses anonymously
pub(crate) fn require_token(token: Option<&str>) -> Result<&str> {
    token.filter(|t| !t.is_empty()).ok_or(ApiError::NotSignedIn)
}

//! The reqwest-backed backend client.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::auth::SessionStore;
use crate::shared::error::{flatten_error_body, AppError, AppResult};

#[cfg(debug_assertions)]
const DEFAULT_API_BASE: &str = "http://localhost:8008";

#[cfg(not(debug_assertions))]
const DEFAULT_API_BASE: &str = "https://api.translateprompt.com";

/// Env var overriding the backend base URL.
pub const API_BASE_ENV: &str = "TRANSLATE_PROMPT_API";

/// Every backend call carries this client-side timeout. No automatic retry
/// anywhere; retry is always a user action.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Client for an explicit base URL, unauthenticated.
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("translate-prompt/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Client configured from the environment: base URL from
    /// `TRANSLATE_PROMPT_API` (build-time default otherwise), session token
    /// from the OS keyring when one is stored.
    pub fn from_env() -> AppResult<Self> {
        let base = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let mut client = Self::new(base)?;
        if let Some(token) = SessionStore::load()? {
            client.token = Some(token);
        }
        Ok(client)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body.
    ///
    /// 401 maps to `AppError::Auth`; other non-success statuses have their
    /// body flattened into `AppError::Api`. Timeouts and connection failures
    /// are `AppError::Network`.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Network("Request timed out after 30s".to_string())
            } else {
                AppError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(flatten_error_body(&body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message: flatten_error_body(&body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Unknown(format!("Failed to parse response: {}", e)))
    }
}

//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use std::sync::Arc;

/// Source of bearer tokens, with a refresh hook for the 401 retry flow
///
/// Implemented by [`crate::Session`]; tests may provide their own.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Current bearer token, if any
    async fn token(&self) -> Option<String>;

    /// Refresh the session and return the new bearer token
    async fn refresh(&self) -> ClientResult<String>;
}

/// HTTP client for making requests to the reservation-block API
///
/// Every response is expected to carry the standard
/// `{ success, data, errorMsg }` envelope, which is unwrapped here so
/// services deal in payload types only.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    token_source: Option<Arc<dyn TokenSource>>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .field("has_token_source", &self.token_source.is_some())
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            token_source: None,
        }
    }

    /// Set a fixed bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach a token source; enables the 401 refresh-and-retry flow
    pub fn with_token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Get the fixed token, if one was set
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn bearer(&self) -> Option<String> {
        if let Some(source) = &self.token_source {
            if let Some(token) = source.token().await {
                return Some(token);
            }
        }
        self.token.clone()
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request::<T, ()>(reqwest::Method::GET, path, None, true)
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(reqwest::Method::POST, path, Some(body), true)
            .await
    }

    /// Make a POST request without the 401 refresh-and-retry flow
    ///
    /// Login and refresh endpoints answer 401 for bad credentials, not for
    /// an expired session, so retrying them would loop.
    pub async fn post_no_retry<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(reqwest::Method::POST, path, Some(body), false)
            .await
    }

    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        allow_refresh: bool,
    ) -> ClientResult<T> {
        let token = self.bearer().await;
        let response = self.send(method.clone(), path, body, token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if let (true, Some(source)) = (allow_refresh, &self.token_source) {
                tracing::debug!(path, "401 received, refreshing token and retrying once");
                let fresh = source.refresh().await?;
                let retried = self.send(method, path, body, Some(fresh)).await?;
                return Self::handle_response(retried).await;
            }
            return Err(ClientError::Unauthorized);
        }

        Self::handle_response(response).await
    }

    async fn send<B: serde::Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        token: Option<String>,
    ) -> ClientResult<reqwest::Response> {
        let mut request = self.client.request(method, self.url(path));

        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        Ok(request.send().await?)
    }

    /// Map the HTTP response to a payload, unwrapping the API envelope
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            // Error bodies still carry the envelope when the server produced
            // them; fall back to raw text for proxies and the like.
            let text = response.text().await?;
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .ok()
                .and_then(|env| env.error_msg)
                .unwrap_or(text);

            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
                    Err(ClientError::Validation(message))
                }
                _ => Err(ClientError::Internal(message)),
            };
        }

        let envelope: ApiResponse<T> = response.json().await?;
        envelope.into_result().map_err(Into::into)
    }
}

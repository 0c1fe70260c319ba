//! Session state: bearer/refresh tokens and logout invalidation

use crate::cache::Invalidate;
use crate::{ClientConfig, ClientError, ClientResult, HttpClient, TokenSource};
use async_trait::async_trait;
use shared::client::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
use shared::models::UserDetail;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Tokens {
    token: String,
    refresh_token: String,
}

/// Authenticated session against the reservation-block API
///
/// Owns the bearer and refresh tokens and implements [`TokenSource`] so an
/// [`HttpClient`] can transparently refresh on 401. Caches registered via
/// [`Session::register_cache`] are flushed on logout.
pub struct Session {
    http: HttpClient,
    tokens: RwLock<Option<Tokens>>,
    caches: Mutex<Vec<Arc<dyn Invalidate>>>,
}

impl Session {
    /// Create an unauthenticated session
    ///
    /// The internal HTTP client deliberately has no token source: auth
    /// endpoints must not recurse into the refresh flow.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: HttpClient::new(config),
            tokens: RwLock::new(None),
            caches: Mutex::new(Vec::new()),
        }
    }

    /// Register a cache to be flushed when the session ends
    pub fn register_cache(&self, cache: Arc<dyn Invalidate>) {
        self.caches.lock().expect("cache registry poisoned").push(cache);
    }

    /// Log in and store the issued tokens
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserDetail> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.http.post_no_retry("api/auth/login", &request).await?;

        *self.tokens.write().await = Some(Tokens {
            token: response.token,
            refresh_token: response.refresh_token,
        });

        tracing::info!(username, "session established");
        Ok(response.user)
    }

    /// Whether the session currently holds a token
    pub async fn is_logged_in(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Drop tokens and flush every registered cache
    pub async fn logout(&self) {
        *self.tokens.write().await = None;
        for cache in self.caches.lock().expect("cache registry poisoned").iter() {
            cache.invalidate_all();
        }
        tracing::info!("session cleared");
    }
}

#[async_trait]
impl TokenSource for Session {
    async fn token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.token.clone())
    }

    async fn refresh(&self) -> ClientResult<String> {
        let refresh_token = {
            let guard = self.tokens.read().await;
            guard
                .as_ref()
                .map(|t| t.refresh_token.clone())
                .ok_or(ClientError::Unauthorized)?
        };

        let request = RefreshTokenRequest { refresh_token };
        let response: RefreshTokenResponse = self
            .http
            .post_no_retry("api/auth/refresh-token", &request)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "token refresh failed"))?;

        let token = response.token.clone();
        *self.tokens.write().await = Some(Tokens {
            token: response.token,
            refresh_token: response.refresh_token,
        });

        tracing::debug!("session token refreshed");
        Ok(token)
    }
}

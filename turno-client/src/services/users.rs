//! User detail service

use crate::cache::QueryCache;
use crate::{ClientResult, HttpClient};
use shared::models::UserDetail;
use std::sync::Arc;

/// Typed wrapper for the `/api/usuarios` endpoints
///
/// An optional injected [`QueryCache`] short-circuits repeated lookups of
/// the same user (leader names are resolved often by the dashboards).
#[derive(Clone)]
pub struct UsersApi {
    http: HttpClient,
    cache: Option<Arc<QueryCache<i64, UserDetail>>>,
}

impl UsersApi {
    /// Create the service over an existing HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self { http, cache: None }
    }

    /// Attach an owned lookup cache
    pub fn with_cache(mut self, cache: Arc<QueryCache<i64, UserDetail>>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fetch a user's detail (areas, groups, roles)
    pub async fn user_by_id(&self, id: i64) -> ClientResult<UserDetail> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&id) {
                tracing::debug!(id, "user detail served from cache");
                return Ok(hit);
            }
        }

        let user: UserDetail = self.http.get(&format!("api/usuarios/{}", id)).await?;

        if let Some(cache) = &self.cache {
            cache.insert(id, user.clone());
        }
        Ok(user)
    }
}

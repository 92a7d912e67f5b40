//! HTTP client for the LogisticsFlow API.
//!
//! Every request runs through the same pipeline: attach the current bearer
//! token, dispatch, and on a 401 funnel through a single-flight refresh and
//! retry once. Auth endpoints bypass the pipeline entirely so a failing
//! login or refresh can never recurse into another refresh.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::auth::AuthService;
use crate::error::ApiError;
use crate::http;

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: String,
    http: reqwest::Client,
    auth: Arc<AuthService>,
    // Holder performs the one in-flight refresh; waiters queue here (FIFO)
    // and re-read the store instead of refreshing again.
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    pub fn new(base_url: &str, auth: Arc<AuthService>) -> Self {
        ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                http: reqwest::Client::new(),
                auth,
                refresh_gate: Mutex::new(()),
            }),
        }
    }

    pub fn auth(&self) -> &Arc<AuthService> {
        &self.inner.auth
    }

    // ==================== Verb helpers ====================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::GET, path, &[], None).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request_json(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request_json(Method::POST, path, &[], Some(to_body(body)?)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::POST, path, &[], Some(Value::Object(Default::default())))
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request_json(Method::PUT, path, &[], Some(to_body(body)?)).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request_json(Method::PUT, path, &[], Some(Value::Object(Default::default())))
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request_json(Method::PATCH, path, &[], Some(to_body(body)?)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.dispatch(Method::DELETE, path, &[], None).await?;
        http::unit_or_error(response).await
    }

    // ==================== Pipeline ====================

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(method, path, query, body).await?;
        http::json_or_error(response).await
    }

    /// Dispatch with bearer attach and refresh-and-retry-once on 401.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        // Auth endpoints pass through unmodified; a 401 from them is final.
        if is_auth_endpoint(path) {
            return Ok(self.send(method, path, query, body.as_ref(), None).await?);
        }

        let token = self.inner.auth.tokens().access();
        let response = self
            .send(method.clone(), path, query, body.as_ref(), token.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let fresh = self.refreshed_access(token).await?;
        tracing::debug!(%path, "retrying request with refreshed token");
        Ok(self.send(method, path, query, body.as_ref(), Some(&fresh)).await?)
    }

    /// Single-flight refresh coordination. `stale` is the token the caller
    /// just failed with (if any). At most one `AuthService::refresh` call is
    /// made no matter how many requests fail concurrently; the rest queue on
    /// the gate and pick up the outcome from the token store.
    async fn refreshed_access(&self, stale: Option<String>) -> Result<String, ApiError> {
        let _gate = self.inner.refresh_gate.lock().await;

        match (self.inner.auth.tokens().access(), &stale) {
            // A refresh settled while this request was queued.
            (Some(current), Some(stale)) if current != *stale => return Ok(current),
            // Someone logged in since this request was built.
            (Some(current), None) => return Ok(current),
            // A queued-ahead refresh failed and tore the session down.
            (None, Some(_)) => return Err(ApiError::RefreshRejected),
            _ => {}
        }

        tracing::debug!("access token rejected, refreshing");
        let pair = self.inner.auth.refresh().await?;
        Ok(pair.access_token)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut request = self.inner.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request.send().await
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Endpoints that must never enter the refresh path.
fn is_auth_endpoint(path: &str) -> bool {
    const AUTH_PATHS: [&str; 4] = [
        "/auth/login",
        "/auth/register",
        "/auth/refreshtoken",
        "/auth/logout",
    ];
    AUTH_PATHS.iter().any(|p| path.contains(p)) || path.contains("/protocol/openid-connect/")
}

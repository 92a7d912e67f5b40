//! Identity backends.
//!
//! Two deployments exist: one where the LogisticsFlow API itself issues
//! tokens (`LocalBackend`), one where a Keycloak realm does
//! (`KeycloakBackend`). Exactly one is selected per deployment via
//! `AppConfig`; everything above this trait is variant-agnostic.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::auth::identity;
use crate::config::KeycloakConfig;
use crate::error::ApiError;
use crate::http;
use crate::models::{
    Claims, Credentials, RegisterRequest, TokenPair, TokenRefreshRequest, User, UserRole,
};

/// How a login attempt concluded on the backend side.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Tokens were issued directly (local variant).
    Session(TokenPair),
    /// The caller must navigate the browser to this URL; the session is
    /// established on return-redirect, never locally.
    Redirect(String),
}

#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    Created(User),
    Redirect(String),
}

#[async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError>;
    /// Best-effort server-side session termination.
    async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), ApiError>;
    /// Exchange the refresh token for a new pair. A server-side refusal is
    /// `RefreshRejected`, which callers treat as terminal.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;
    /// Produce the `User` behind an access token.
    async fn resolve_user(&self, access_token: &str) -> Result<User, ApiError>;
}

// ==================== Local variant ====================

/// Credential exchange against the LogisticsFlow API's own auth endpoints.
pub struct LocalBackend {
    http: reqwest::Client,
    base_url: String,
}

impl LocalBackend {
    pub fn new(base_url: &str) -> Self {
        LocalBackend {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl IdentityBackend for LocalBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(credentials)
            .send()
            .await?;
        let pair: TokenPair = http::json_or_error(response).await?;
        Ok(LoginOutcome::Session(pair))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await?;
        let user: User = http::json_or_error(response).await?;
        Ok(RegisterOutcome::Created(user))
    }

    async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/logout"))
            .header("Authorization", format!("Bearer {access_token}"))
            .json(&serde_json::json!({
                "token": access_token,
                "refreshToken": refresh_token,
            }))
            .send()
            .await?;
        http::unit_or_error(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let request = TokenRefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/refreshtoken"))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "refresh token rejected by server");
            return Err(ApiError::RefreshRejected);
        }
        response
            .json::<TokenPair>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn resolve_user(&self, access_token: &str) -> Result<User, ApiError> {
        // Local tokens are self-describing; unset roles default to CLIENT.
        let user = identity::decode_user(access_token, UserRole::Client)?;
        Ok(user)
    }
}

// ==================== Keycloak variant ====================

/// The fields we need from Keycloak's token endpoint response.
#[derive(Debug, Deserialize)]
struct KeycloakTokens {
    access_token: String,
    refresh_token: String,
}

/// Delegated identity against a Keycloak realm. Login and registration are
/// browser redirects to the realm's pages; refresh and userinfo talk to the
/// standard OpenID Connect endpoints.
pub struct KeycloakBackend {
    http: reqwest::Client,
    config: KeycloakConfig,
}

impl KeycloakBackend {
    pub fn new(config: KeycloakConfig) -> Self {
        KeycloakBackend {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/{}",
            self.config.url.trim_end_matches('/'),
            self.config.realm,
            name
        )
    }

    fn redirect_url(&self, endpoint: &str) -> Result<String, ApiError> {
        let mut url =
            Url::parse(&self.endpoint(endpoint)).map_err(|e| ApiError::Parse(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid");
        Ok(url.into())
    }
}

#[async_trait]
impl IdentityBackend for KeycloakBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        // Credentials are collected by Keycloak's own login page.
        Ok(LoginOutcome::Redirect(self.redirect_url("auth")?))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        Ok(RegisterOutcome::Redirect(self.redirect_url("registrations")?))
    }

    async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("Authorization", format!("Bearer {access_token}"))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;
        http::unit_or_error(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let response = self
            .http
            .post(self.endpoint("token"))
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.config.client_id.as_str()),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "keycloak rejected the refresh token");
            return Err(ApiError::RefreshRejected);
        }
        let tokens: KeycloakTokens = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(TokenPair {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    async fn resolve_user(&self, access_token: &str) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.endpoint("userinfo"))
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| ApiError::ProfileUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ApiError::ProfileUnavailable(format!(
                "userinfo returned {}",
                response.status()
            )));
        }
        let claims: Claims = response
            .json()
            .await
            .map_err(|e| ApiError::ProfileUnavailable(e.to_string()))?;
        Ok(identity::user_from_claims(&claims, UserRole::User))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keycloak() -> KeycloakBackend {
        KeycloakBackend::new(KeycloakConfig {
            url: "http://localhost:8080".into(),
            realm: "logistics-realm".into(),
            client_id: "logistics-frontend".into(),
            redirect_uri: "http://localhost:4200/".into(),
        })
    }

    #[tokio::test]
    async fn keycloak_login_is_a_redirect_to_the_authorization_endpoint() {
        let backend = keycloak();
        let outcome = backend
            .login(&Credentials { email: String::new(), password: String::new() })
            .await
            .unwrap();

        match outcome {
            LoginOutcome::Redirect(url) => {
                assert!(url.starts_with(
                    "http://localhost:8080/realms/logistics-realm/protocol/openid-connect/auth?"
                ));
                assert!(url.contains("client_id=logistics-frontend"));
                assert!(url.contains("response_type=code"));
                assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A4200%2F"));
            }
            LoginOutcome::Session(_) => panic!("delegated login must not resolve locally"),
        }
    }

    #[tokio::test]
    async fn keycloak_register_redirects_to_the_registration_page() {
        let backend = keycloak();
        let outcome = backend
            .register(&RegisterRequest {
                email: "x@x.dev".into(),
                password: "pw".into(),
                name: "X".into(),
                contact: String::new(),
                role: None,
                active: None,
            })
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::Redirect(url) if url.contains("/registrations?")));
    }
}

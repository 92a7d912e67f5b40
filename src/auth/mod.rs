//! Authentication: token storage, identity resolution, observable state and
//! the login/register/logout/refresh operations.

pub mod backend;
pub mod identity;
pub mod state;
pub mod token_store;

pub use backend::{IdentityBackend, KeycloakBackend, LocalBackend, LoginOutcome, RegisterOutcome};
pub use state::{AuthContext, AuthSnapshot, SessionStatus};
pub use token_store::{MemoryStorage, StorageBackend, TokenStore};

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{Credentials, RegisterRequest, TokenPair, User};

/// Result of a login attempt as seen by the caller.
#[derive(Debug, Clone)]
pub enum LoginResult {
    Authenticated(User),
    /// Delegated variant: navigate the browser here; no local session yet.
    RedirectTo(String),
}

/// The auth operations. Sole writer of `TokenStore` and `AuthContext`.
pub struct AuthService {
    backend: Arc<dyn IdentityBackend>,
    tokens: TokenStore,
    context: AuthContext,
}

impl AuthService {
    pub fn new(backend: Arc<dyn IdentityBackend>, tokens: TokenStore, context: AuthContext) -> Self {
        AuthService {
            backend,
            tokens,
            context,
        }
    }

    pub fn context(&self) -> &AuthContext {
        &self.context
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub async fn login(&self, credentials: Credentials) -> Result<LoginResult, ApiError> {
        self.context.begin_login();

        match self.backend.login(&credentials).await {
            Ok(LoginOutcome::Session(pair)) => {
                self.tokens.save(&pair);
                match self.backend.resolve_user(&pair.access_token).await {
                    Ok(user) => {
                        self.tokens.save_user(&user);
                        self.context.logged_in(user.clone());
                        tracing::info!(user = %user.email, role = user.role.as_str(), "login succeeded");
                        Ok(LoginResult::Authenticated(user))
                    }
                    Err(err) => {
                        // Tokens we cannot resolve an identity from are unusable.
                        self.tokens.clear();
                        self.context.reset();
                        tracing::warn!(error = %err, "login token could not be resolved to a user");
                        Err(err)
                    }
                }
            }
            Ok(LoginOutcome::Redirect(url)) => {
                self.context.reset();
                Ok(LoginResult::RedirectTo(url))
            }
            Err(err) => {
                self.context.reset();
                tracing::warn!(error = %err, "login failed");
                Err(err)
            }
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        self.backend.register(&request).await
    }

    /// Clears the local session unconditionally; the server call is
    /// best-effort. Safe to call when already logged out.
    pub async fn logout(&self) {
        if let Some(pair) = self.tokens.pair() {
            if let Err(err) = self
                .backend
                .logout(&pair.access_token, &pair.refresh_token)
                .await
            {
                tracing::warn!(error = %err, "server-side logout failed, clearing local session anyway");
            }
        }
        self.tokens.clear();
        self.context.reset();
        tracing::info!("logged out");
    }

    /// Exchange the stored refresh token for a new pair. Any failure is
    /// terminal: the session is fully cleared before the error is returned.
    pub async fn refresh(&self) -> Result<TokenPair, ApiError> {
        let Some(refresh_token) = self.tokens.refresh() else {
            self.tokens.clear();
            self.context.reset();
            return Err(ApiError::NoRefreshToken);
        };

        self.context.begin_refresh();
        match self.backend.refresh(&refresh_token).await {
            Ok(pair) => {
                self.tokens.save(&pair);
                match self.backend.resolve_user(&pair.access_token).await {
                    Ok(user) => {
                        self.tokens.save_user(&user);
                        self.context.logged_in(user);
                    }
                    // Keep the session on a stale identity rather than drop
                    // freshly issued tokens.
                    Err(_) => {
                        if let Some(user) = self.tokens.user() {
                            self.context.logged_in(user);
                        }
                    }
                }
                tracing::debug!("token refresh succeeded");
                Ok(pair)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, forcing logout");
                self.tokens.clear();
                self.context.reset();
                Err(err)
            }
        }
    }

    /// Passive session restoration at startup. Never fails loudly: a stale
    /// or undecodable session degrades to "not authenticated".
    pub async fn restore(&self) -> bool {
        if let Some(access) = self.tokens.access() {
            if self.tokens.has_valid_access() {
                match self.backend.resolve_user(&access).await {
                    Ok(user) => {
                        self.tokens.save_user(&user);
                        self.context.logged_in(user);
                        tracing::info!("session restored from stored tokens");
                        return true;
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "stored access token not resolvable");
                    }
                }
            }
            if self.tokens.refresh().is_some() {
                return self.refresh().await.is_ok();
            }
        }
        self.tokens.clear();
        self.context.reset();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use async_trait::async_trait;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn mint_token(email: &str, role: &str, exp: i64) -> String {
        encode(
            &Header::default(),
            &json!({ "sub": email, "email": email, "name": "Test", "role": role, "exp": exp }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    /// Programmable backend double.
    struct StubBackend {
        login_response: Option<LoginOutcome>,
        refresh_response: Option<TokenPair>,
        refresh_calls: AtomicUsize,
        logout_calls: AtomicUsize,
    }

    impl StubBackend {
        fn logging_in_as(role: &str) -> Self {
            StubBackend {
                login_response: Some(LoginOutcome::Session(TokenPair {
                    access_token: mint_token("a@x.dev", role, future_exp()),
                    refresh_token: "r1".into(),
                })),
                refresh_response: None,
                refresh_calls: AtomicUsize::new(0),
                logout_calls: AtomicUsize::new(0),
            }
        }

        fn refusing_everything() -> Self {
            StubBackend {
                login_response: None,
                refresh_response: None,
                refresh_calls: AtomicUsize::new(0),
                logout_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityBackend for StubBackend {
        async fn login(&self, _c: &Credentials) -> Result<LoginOutcome, ApiError> {
            self.login_response.clone().ok_or(ApiError::Unauthorized)
        }

        async fn register(&self, _r: &RegisterRequest) -> Result<RegisterOutcome, ApiError> {
            Err(ApiError::Conflict("duplicate".into()))
        }

        async fn logout(&self, _a: &str, _r: &str) -> Result<(), ApiError> {
            self.logout_calls.fetch_add(1, Ordering::SeqCst);
            // server-side logout failing must not matter
            Err(ApiError::Server { status: 500, message: "boom".into() })
        }

        async fn refresh(&self, _token: &str) -> Result<TokenPair, ApiError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.refresh_response.clone().ok_or(ApiError::RefreshRejected)
        }

        async fn resolve_user(&self, access_token: &str) -> Result<User, ApiError> {
            let user = identity::decode_user(access_token, UserRole::Client)?;
            Ok(user)
        }
    }

    fn service(backend: StubBackend) -> AuthService {
        AuthService::new(
            Arc::new(backend),
            TokenStore::new(Arc::new(MemoryStorage::new())),
            AuthContext::new(),
        )
    }

    #[tokio::test]
    async fn successful_login_stores_tokens_and_enters_logged_in() {
        let auth = service(StubBackend::logging_in_as("ADMIN"));
        let result = auth
            .login(Credentials { email: "a@x.dev".into(), password: "pw".into() })
            .await
            .unwrap();

        match result {
            LoginResult::Authenticated(user) => assert_eq!(user.role, UserRole::Admin),
            LoginResult::RedirectTo(_) => panic!("local login must resolve a session"),
        }
        let snap = auth.context().snapshot();
        assert_eq!(snap.status, SessionStatus::LoggedIn);
        assert!(snap.is_authenticated());
        assert!(auth.tokens().access().is_some());
        assert_eq!(auth.tokens().refresh().as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn failed_login_returns_to_logged_out() {
        let auth = service(StubBackend::refusing_everything());
        let err = auth
            .login(Credentials { email: "a@x.dev".into(), password: "bad".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let snap = auth.context().snapshot();
        assert_eq!(snap.status, SessionStatus::LoggedOut);
        assert!(!snap.is_loading);
        assert!(auth.tokens().access().is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_surfaces_conflict() {
        let auth = service(StubBackend::refusing_everything());
        let err = auth
            .register(RegisterRequest {
                email: "dup@x.dev".into(),
                password: "pw".into(),
                name: "Dup".into(),
                contact: String::new(),
                role: None,
                active: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn logout_is_idempotent_and_survives_server_failure() {
        let auth = service(StubBackend::logging_in_as("CLIENT"));
        auth.login(Credentials { email: "a@x.dev".into(), password: "pw".into() })
            .await
            .unwrap();

        // server-side logout errors; local state must clear regardless
        auth.logout().await;
        assert!(auth.tokens().access().is_none());
        assert_eq!(auth.context().snapshot(), AuthSnapshot::default());

        // logging out again when already logged out is a no-op
        auth.logout().await;
        assert!(auth.tokens().access().is_none());
        assert_eq!(auth.context().snapshot(), AuthSnapshot::default());
    }

    #[tokio::test]
    async fn refresh_without_a_stored_token_fails_and_resets() {
        let auth = service(StubBackend::refusing_everything());
        let err = auth.refresh().await.unwrap_err();
        assert!(matches!(err, ApiError::NoRefreshToken));
        assert_eq!(auth.context().snapshot(), AuthSnapshot::default());
    }

    #[tokio::test]
    async fn rejected_refresh_forces_full_logout() {
        let auth = service(StubBackend::logging_in_as("CLIENT"));
        auth.login(Credentials { email: "a@x.dev".into(), password: "pw".into() })
            .await
            .unwrap();

        let err = auth.refresh().await.unwrap_err();
        assert!(matches!(err, ApiError::RefreshRejected));
        assert!(auth.tokens().access().is_none());
        assert!(auth.tokens().user().is_none());
        assert_eq!(auth.context().snapshot(), AuthSnapshot::default());
    }

    #[tokio::test]
    async fn restore_accepts_a_valid_stored_session() {
        let auth = service(StubBackend::refusing_everything());
        auth.tokens().save(&TokenPair {
            access_token: mint_token("m@x.dev", "WAREHOUSE_MANAGER", future_exp()),
            refresh_token: "r1".into(),
        });

        assert!(auth.restore().await);
        let snap = auth.context().snapshot();
        assert!(snap.is_authenticated());
        assert_eq!(snap.role(), Some(UserRole::WarehouseManager));
    }

    #[tokio::test]
    async fn restore_degrades_silently_on_garbage_tokens() {
        let auth = service(StubBackend::refusing_everything());
        auth.tokens().save(&TokenPair {
            access_token: "not.a.jwt".into(),
            refresh_token: "r1".into(),
        });

        // undecodable access token and a refresh the backend refuses
        assert!(!auth.restore().await);
        assert!(auth.tokens().access().is_none());
        assert!(!auth.context().snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn restore_refreshes_an_expired_session() {
        let expired = mint_token("c@x.dev", "CLIENT", chrono::Utc::now().timestamp() - 5);
        let fresh = TokenPair {
            access_token: mint_token("c@x.dev", "CLIENT", future_exp()),
            refresh_token: "r2".into(),
        };
        let backend = StubBackend {
            login_response: None,
            refresh_response: Some(fresh.clone()),
            refresh_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        };
        let auth = service(backend);
        auth.tokens().save(&TokenPair { access_token: expired, refresh_token: "r1".into() });

        assert!(auth.restore().await);
        assert_eq!(auth.tokens().pair(), Some(fresh));
        assert!(auth.context().snapshot().is_authenticated());
    }
}

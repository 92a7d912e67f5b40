//! LogisticsFlow client core.
//!
//! The authenticated-request plumbing of the LogisticsFlow warehouse
//! management front-end: token storage, identity resolution (local JWT or
//! Keycloak-delegated), observable auth state, navigation guards, and an
//! HTTP client whose pipeline survives token expiry with a single-flight
//! refresh shared by all concurrently failing requests.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod guards;
pub mod models;

mod http;

pub use api::ApiClient;
pub use auth::{
    AuthContext, AuthService, AuthSnapshot, IdentityBackend, KeycloakBackend, LocalBackend,
    LoginResult, MemoryStorage, SessionStatus, StorageBackend, TokenStore,
};
pub use config::{AppConfig, AuthVariant, KeycloakConfig};
pub use error::{ApiError, DecodeError};
pub use guards::{
    auth_guard, dashboard_redirect_guard, guest_guard, role_guard, GuardDecision,
};

use std::sync::Arc;

/// Wire the auth service and API client together for the configured
/// identity variant, with in-memory token storage.
pub fn bootstrap(config: &AppConfig) -> (Arc<AuthService>, ApiClient) {
    bootstrap_with_storage(config, Arc::new(MemoryStorage::new()))
}

/// Same as [`bootstrap`] but with caller-provided token storage.
pub fn bootstrap_with_storage(
    config: &AppConfig,
    storage: Arc<dyn StorageBackend>,
) -> (Arc<AuthService>, ApiClient) {
    let tokens = TokenStore::new(storage);
    let context = AuthContext::new();

    let backend: Arc<dyn IdentityBackend> = match config.variant {
        AuthVariant::Local => Arc::new(LocalBackend::new(&config.api_url)),
        AuthVariant::Keycloak => Arc::new(KeycloakBackend::new(config.keycloak.clone())),
    };

    let auth = Arc::new(AuthService::new(backend, tokens, context));
    let client = ApiClient::new(&config.api_url, auth.clone());
    (auth, client)
}

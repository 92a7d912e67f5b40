//! Deployment configuration, loaded from the environment.

use std::env;

/// Which identity backend this deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVariant {
    /// The LogisticsFlow API issues tokens itself.
    Local,
    /// A Keycloak realm issues tokens; the client only consumes them.
    Keycloak,
}

#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
    pub redirect_uri: String,
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        KeycloakConfig {
            url: "http://localhost:8080".to_string(),
            realm: "logistics-realm".to_string(),
            client_id: "logistics-frontend".to_string(),
            redirect_uri: "http://localhost:4200/".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub variant: AuthVariant,
    pub keycloak: KeycloakConfig,
}

impl AppConfig {
    /// Local-variant config pointing at the given API base URL.
    pub fn local(api_url: &str) -> Self {
        AppConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            variant: AuthVariant::Local,
            keycloak: KeycloakConfig::default(),
        }
    }

    /// Load from environment variables (and `.env` when present), falling
    /// back to the development defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("LOGISTICS_API_URL")
            .unwrap_or_else(|_| "http://localhost:8093".to_string());
        let variant = match env::var("LOGISTICS_AUTH_VARIANT").as_deref() {
            Ok("keycloak") => AuthVariant::Keycloak,
            _ => AuthVariant::Local,
        };

        let defaults = KeycloakConfig::default();
        let keycloak = KeycloakConfig {
            url: env::var("KEYCLOAK_URL").unwrap_or(defaults.url),
            realm: env::var("KEYCLOAK_REALM").unwrap_or(defaults.realm),
            client_id: env::var("KEYCLOAK_CLIENT_ID").unwrap_or(defaults.client_id),
            redirect_uri: env::var("KEYCLOAK_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
        };

        AppConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            variant,
            keycloak,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Login credentials; consumed once, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Access/refresh token pair as returned by the auth endpoints.
/// Either both fields are present or the session does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    pub role: UserRole,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Client,
    WarehouseManager,
    /// Fallback when no role claim can be determined.
    User,
}

impl UserRole {
    pub fn from_claim(claim: &str) -> Option<UserRole> {
        match claim {
            "ADMIN" => Some(UserRole::Admin),
            "CLIENT" => Some(UserRole::Client),
            "WAREHOUSE_MANAGER" => Some(UserRole::WarehouseManager),
            "USER" => Some(UserRole::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Client => "CLIENT",
            UserRole::WarehouseManager => "WAREHOUSE_MANAGER",
            UserRole::User => "USER",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn is_manager_or_above(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::WarehouseManager)
    }
}

/// Claims carried by a LogisticsFlow or Keycloak access token. Only the
/// fields the client maps to a `User` are modeled; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub preferred_username: Option<String>,
    pub role: Option<String>,
    pub roles: Option<Vec<String>>,
    pub realm_access: Option<RealmAccess>,
    pub exp: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealmAccess {
    pub roles: Vec<String>,
}

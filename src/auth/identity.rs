//! Local bearer-token decoding.
//!
//! Tokens are decoded without signature verification: the client only needs
//! the identity claims and the expiry instant, the backend remains the
//! authority on token validity.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::DecodeError;
use crate::models::{Claims, User, UserRole};

/// Decode the payload segment of a JWT into its claims.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(DecodeError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| DecodeError::InvalidPayload(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| DecodeError::InvalidPayload(e.to_string()))
}

/// Decode a token into a `User`, falling back to `fallback_role` when no
/// role claim can be determined.
pub fn decode_user(token: &str, fallback_role: UserRole) -> Result<User, DecodeError> {
    let claims = decode_claims(token)?;
    Ok(user_from_claims(&claims, fallback_role))
}

/// Map a claim set to the `User` shape.
pub fn user_from_claims(claims: &Claims, fallback_role: UserRole) -> User {
    let id = claims.sub.clone().unwrap_or_default();
    let email = claims.email.clone().or_else(|| claims.sub.clone()).unwrap_or_default();
    let name = claims
        .name
        .clone()
        .or_else(|| claims.preferred_username.clone())
        .unwrap_or_else(|| email.clone());

    User {
        id,
        email,
        name,
        contact: String::new(),
        role: role_from_claims(claims).unwrap_or(fallback_role),
        active: true,
    }
}

/// Pick the main role from the claim set: a direct `role` claim wins,
/// otherwise the highest-priority entry of the role lists
/// (ADMIN > WAREHOUSE_MANAGER > CLIENT).
fn role_from_claims(claims: &Claims) -> Option<UserRole> {
    if let Some(role) = claims.role.as_deref().and_then(UserRole::from_claim) {
        return Some(role);
    }

    let mut listed: Vec<&str> = Vec::new();
    if let Some(roles) = &claims.roles {
        listed.extend(roles.iter().map(String::as_str));
    }
    if let Some(realm) = &claims.realm_access {
        listed.extend(realm.roles.iter().map(String::as_str));
    }

    for candidate in ["ADMIN", "WAREHOUSE_MANAGER", "CLIENT"] {
        if listed.contains(&candidate) {
            return UserRole::from_claim(candidate);
        }
    }
    None
}

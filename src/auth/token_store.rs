//! Session token persistence.
//!
//! The store is the single source of truth for "is a session active". Writes
//! replace the whole token pair under one lock so readers never observe a
//! half-updated session.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::auth::identity;
use crate::models::{TokenPair, User};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key/value persistence seam. Deployments back this with whatever durable
/// client-side storage they have; tests and headless use get `MemoryStorage`.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<TokenStoreInner>,
}

struct TokenStoreInner {
    backend: Arc<dyn StorageBackend>,
    // Spans every multi-key write so save/clear are atomic towards readers.
    guard: RwLock<()>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        TokenStore {
            inner: Arc::new(TokenStoreInner {
                backend,
                guard: RwLock::new(()),
            }),
        }
    }

    /// Persist both tokens as one atomic replace.
    pub fn save(&self, pair: &TokenPair) {
        let _w = self.inner.guard.write().unwrap_or_else(|e| e.into_inner());
        self.inner.backend.set(ACCESS_TOKEN_KEY, &pair.access_token);
        self.inner.backend.set(REFRESH_TOKEN_KEY, &pair.refresh_token);
    }

    pub fn access(&self) -> Option<String> {
        let _r = self.inner.guard.read().unwrap_or_else(|e| e.into_inner());
        self.inner.backend.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh(&self) -> Option<String> {
        let _r = self.inner.guard.read().unwrap_or_else(|e| e.into_inner());
        self.inner.backend.get(REFRESH_TOKEN_KEY)
    }

    pub fn pair(&self) -> Option<TokenPair> {
        let _r = self.inner.guard.read().unwrap_or_else(|e| e.into_inner());
        let access_token = self.inner.backend.get(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.inner.backend.get(REFRESH_TOKEN_KEY)?;
        Some(TokenPair { access_token, refresh_token })
    }

    /// Remove tokens and the cached user record. Idempotent.
    pub fn clear(&self) {
        let _w = self.inner.guard.write().unwrap_or_else(|e| e.into_inner());
        self.inner.backend.remove(ACCESS_TOKEN_KEY);
        self.inner.backend.remove(REFRESH_TOKEN_KEY);
        self.inner.backend.remove(CURRENT_USER_KEY);
    }

    /// Whether the stored access token exists and its `exp` claim is in the
    /// future. Fails closed: absence, decode failure or a missing `exp` all
    /// read as "not valid".
    pub fn has_valid_access(&self) -> bool {
        let Some(token) = self.access() else {
            return false;
        };
        match identity::decode_claims(&token) {
            Ok(claims) => match claims.exp {
                Some(exp) => exp > Utc::now().timestamp(),
                None => false,
            },
            Err(_) => false,
        }
    }

    pub fn save_user(&self, user: &User) {
        if let Ok(serialized) = serde_json::to_string(user) {
            let _w = self.inner.guard.write().unwrap_or_else(|e| e.into_inner());
            self.inner.backend.set(CURRENT_USER_KEY, &serialized);
        }
    }

    pub fn user(&self) -> Option<User> {
        let _r = self.inner.guard.read().unwrap_or_else(|e| e.into_inner());
        let serialized = self.inner.backend.get(CURRENT_USER_KEY)?;
        serde_json::from_str(&serialized).ok()
    }
}

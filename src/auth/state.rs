//! Observable authentication state.
//!
//! One `AuthContext` is created at process start and injected wherever the
//! state is needed; it is only mutated by the auth operations and read by
//! guards and views through snapshots or a watch subscription.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    LoggedOut,
    LoggingIn,
    LoggedIn,
    RefreshingSilently,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub status: SessionStatus,
    pub current_user: Option<User>,
    pub is_loading: bool,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        AuthSnapshot {
            status: SessionStatus::LoggedOut,
            current_user: None,
            is_loading: false,
        }
    }
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::LoggedIn | SessionStatus::RefreshingSilently)
            && self.current_user.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.current_user.as_ref().map(|u| u.role)
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }
}

#[derive(Clone)]
pub struct AuthContext {
    tx: Arc<watch::Sender<AuthSnapshot>>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSnapshot::default());
        AuthContext { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes; receivers see every transition.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    pub(crate) fn begin_login(&self) {
        self.tx.send_replace(AuthSnapshot {
            status: SessionStatus::LoggingIn,
            current_user: None,
            is_loading: true,
        });
    }

    pub(crate) fn begin_refresh(&self) {
        self.tx.send_modify(|s| {
            s.status = SessionStatus::RefreshingSilently;
        });
    }

    pub(crate) fn logged_in(&self, user: User) {
        self.tx.send_replace(AuthSnapshot {
            status: SessionStatus::LoggedIn,
            current_user: Some(user),
            is_loading: false,
        });
    }

    /// Back to `{LoggedOut, None, false}`; used by logout and by any
    /// irrecoverable refresh failure.
    pub(crate) fn reset(&self) {
        self.tx.send_replace(AuthSnapshot::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: "u-1".into(),
            email: "a@x.dev".into(),
            name: "A".into(),
            contact: String::new(),
            role: UserRole::Admin,
            active: true,
        }
    }

    #[test]
    fn default_snapshot_is_logged_out() {
        let ctx = AuthContext::new();
        let snap = ctx.snapshot();
        assert_eq!(snap.status, SessionStatus::LoggedOut);
        assert!(snap.current_user.is_none());
        assert!(!snap.is_loading);
        assert!(!snap.is_authenticated());
    }

    #[test]
    fn silent_refresh_keeps_the_session_authenticated() {
        let ctx = AuthContext::new();
        ctx.logged_in(admin());
        ctx.begin_refresh();

        let snap = ctx.snapshot();
        assert_eq!(snap.status, SessionStatus::RefreshingSilently);
        assert!(snap.is_authenticated());
    }

    #[test]
    fn reset_clears_everything() {
        let ctx = AuthContext::new();
        ctx.logged_in(admin());
        ctx.reset();
        assert_eq!(ctx.snapshot(), AuthSnapshot::default());
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let ctx = AuthContext::new();
        let mut rx = ctx.subscribe();

        ctx.logged_in(admin());
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_authenticated());

        ctx.reset();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_authenticated());
    }

    #[test]
    fn role_helpers_match_the_current_user() {
        let ctx = AuthContext::new();
        ctx.logged_in(admin());
        let snap = ctx.snapshot();
        assert!(snap.has_role(UserRole::Admin));
        assert!(snap.has_any_role(&[UserRole::Client, UserRole::Admin]));
        assert!(!snap.has_any_role(&[UserRole::Client]));
    }
}

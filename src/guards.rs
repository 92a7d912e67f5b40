//! Navigation guards: pure predicates over an `AuthSnapshot`. The router
//! integration applies the returned decision; nothing here performs I/O.

use crate::auth::AuthSnapshot;
use crate::models::UserRole;

pub const LOGIN_ROUTE: &str = "/auth/login";
pub const ACCESS_DENIED_ROUTE: &str = "/access-denied";
pub const ADMIN_DASHBOARD_ROUTE: &str = "/admin/dashboard";
pub const MANAGER_DASHBOARD_ROUTE: &str = "/manager/dashboard";
pub const CLIENT_DASHBOARD_ROUTE: &str = "/client/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

fn login_redirect(return_url: &str) -> GuardDecision {
    GuardDecision::Redirect(format!("{LOGIN_ROUTE}?returnUrl={return_url}"))
}

/// Dashboard route for the current role: ADMIN > WAREHOUSE_MANAGER > CLIENT,
/// anything else lands on access-denied.
fn dashboard_route(snapshot: &AuthSnapshot) -> &'static str {
    match snapshot.role() {
        Some(UserRole::Admin) => ADMIN_DASHBOARD_ROUTE,
        Some(UserRole::WarehouseManager) => MANAGER_DASHBOARD_ROUTE,
        Some(UserRole::Client) => CLIENT_DASHBOARD_ROUTE,
        _ => ACCESS_DENIED_ROUTE,
    }
}

/// Requires an authenticated session; otherwise redirect to login carrying
/// the requested URL for the post-login return.
pub fn auth_guard(snapshot: &AuthSnapshot, requested_url: &str) -> GuardDecision {
    if snapshot.is_authenticated() {
        GuardDecision::Allow
    } else {
        login_redirect(requested_url)
    }
}

/// Login/registration pages: already-authenticated users are sent to their
/// dashboard instead.
pub fn guest_guard(snapshot: &AuthSnapshot) -> GuardDecision {
    if snapshot.is_authenticated() {
        GuardDecision::Redirect(dashboard_route(snapshot).to_string())
    } else {
        GuardDecision::Allow
    }
}

/// Requires authentication plus one of `required_roles`. An empty role set
/// only requires authentication.
pub fn role_guard(
    snapshot: &AuthSnapshot,
    requested_url: &str,
    required_roles: &[UserRole],
) -> GuardDecision {
    if !snapshot.is_authenticated() {
        return login_redirect(requested_url);
    }
    if required_roles.is_empty() || snapshot.has_any_role(required_roles) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(ACCESS_DENIED_ROUTE.to_string())
    }
}

/// The bare `/dashboard` entry: never renders, always redirects by role.
pub fn dashboard_redirect_guard(snapshot: &AuthSnapshot) -> GuardDecision {
    if snapshot.is_authenticated() {
        GuardDecision::Redirect(dashboard_route(snapshot).to_string())
    } else {
        login_redirect("/dashboard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStatus;
    use crate::models::User;

    fn logged_in_as(role: UserRole) -> AuthSnapshot {
        AuthSnapshot {
            status: SessionStatus::LoggedIn,
            current_user: Some(User {
                id: "u-1".into(),
                email: "u@x.dev".into(),
                name: "U".into(),
                contact: String::new(),
                role,
                active: true,
            }),
            is_loading: false,
        }
    }

    #[test]
    fn auth_guard_redirects_anonymous_users_with_return_url() {
        let decision = auth_guard(&AuthSnapshot::default(), "/admin/warehouses");
        assert_eq!(
            decision,
            GuardDecision::Redirect("/auth/login?returnUrl=/admin/warehouses".into())
        );
        assert_eq!(
            auth_guard(&logged_in_as(UserRole::Client), "/client/orders"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn guest_guard_sends_authenticated_users_to_their_dashboard() {
        assert_eq!(guest_guard(&AuthSnapshot::default()), GuardDecision::Allow);
        assert_eq!(
            guest_guard(&logged_in_as(UserRole::Admin)),
            GuardDecision::Redirect(ADMIN_DASHBOARD_ROUTE.into())
        );
        assert_eq!(
            guest_guard(&logged_in_as(UserRole::WarehouseManager)),
            GuardDecision::Redirect(MANAGER_DASHBOARD_ROUTE.into())
        );
    }

    #[test]
    fn role_guard_denies_wrong_role_and_allows_matching_role() {
        let client = logged_in_as(UserRole::Client);
        assert_eq!(
            role_guard(&client, "/admin/reports", &[UserRole::Admin]),
            GuardDecision::Redirect(ACCESS_DENIED_ROUTE.into())
        );

        let admin = logged_in_as(UserRole::Admin);
        assert_eq!(
            role_guard(&admin, "/admin/reports", &[UserRole::Admin]),
            GuardDecision::Allow
        );
    }

    #[test]
    fn role_guard_requires_authentication_first() {
        let decision = role_guard(&AuthSnapshot::default(), "/admin/reports", &[UserRole::Admin]);
        assert!(matches!(decision, GuardDecision::Redirect(url) if url.starts_with(LOGIN_ROUTE)));
    }

    #[test]
    fn empty_required_roles_only_needs_authentication() {
        assert_eq!(
            role_guard(&logged_in_as(UserRole::Client), "/profile", &[]),
            GuardDecision::Allow
        );
    }

    #[test]
    fn dashboard_redirect_picks_highest_priority_role() {
        assert_eq!(
            dashboard_redirect_guard(&logged_in_as(UserRole::Admin)),
            GuardDecision::Redirect(ADMIN_DASHBOARD_ROUTE.into())
        );
        assert_eq!(
            dashboard_redirect_guard(&logged_in_as(UserRole::Client)),
            GuardDecision::Redirect(CLIENT_DASHBOARD_ROUTE.into())
        );
        // fallback USER role never gets a dashboard
        assert_eq!(
            dashboard_redirect_guard(&logged_in_as(UserRole::User)),
            GuardDecision::Redirect(ACCESS_DENIED_ROUTE.into())
        );
        // anonymous goes to login
        assert!(matches!(
            dashboard_redirect_guard(&AuthSnapshot::default()),
            GuardDecision::Redirect(url) if url.starts_with(LOGIN_ROUTE)
        ));
    }
}

//! Route table and the access guard in front of every page.

use crate::model::user::{User, UserRole};
use crate::session::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    Home,
    Dashboard,
    Agent,
    Buyer,
    Admin,
    Unauthorized,
}

impl AppRoute {
    /// Resolves a location path. Unknown paths land on home.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "/login" => AppRoute::Login,
            "/dashboard" => AppRoute::Dashboard,
            "/agent" => AppRoute::Agent,
            "/buyer" => AppRoute::Buyer,
            "/admin" => AppRoute::Admin,
            "/unauthorized" => AppRoute::Unauthorized,
            _ => AppRoute::Home,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            AppRoute::Login => "/login",
            AppRoute::Home => "/",
            AppRoute::Dashboard => "/dashboard",
            AppRoute::Agent => "/agent",
            AppRoute::Buyer => "/buyer",
            AppRoute::Admin => "/admin",
            AppRoute::Unauthorized => "/unauthorized",
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, AppRoute::Login | AppRoute::Unauthorized)
    }

    /// Role a route is reserved for, if any.
    pub fn required_role(&self) -> Option<UserRole> {
        match self {
            AppRoute::Agent => Some(UserRole::Agent),
            AppRoute::Buyer => Some(UserRole::Buyer),
            AppRoute::Admin => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn permits(&self, role: UserRole) -> bool {
        self.required_role().map_or(true, |required| required == role)
    }
}

pub fn dashboard_for(role: UserRole) -> AppRoute {
    match role {
        UserRole::Agent => AppRoute::Agent,
        UserRole::Buyer => AppRoute::Buyer,
        UserRole::Admin => AppRoute::Admin,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    /// Session is still being validated.
    Pending,
    Redirect {
        to: AppRoute,
        /// Where the user was headed; login returns there.
        from: Option<AppRoute>,
    },
}

fn redirect(to: AppRoute) -> GuardOutcome {
    GuardOutcome::Redirect { to, from: None }
}

pub fn guard(route: AppRoute, session: &SessionSnapshot) -> GuardOutcome {
    if session.is_loading && route != AppRoute::Unauthorized {
        return GuardOutcome::Pending;
    }
    let user = session.user.as_ref();
    match (route, user) {
        (AppRoute::Unauthorized, _) => GuardOutcome::Render,
        (AppRoute::Login, None) => GuardOutcome::Render,
        (AppRoute::Login | AppRoute::Home, Some(user)) => redirect(dashboard_for(user.role)),
        (route, None) => GuardOutcome::Redirect {
            to: AppRoute::Login,
            from: Some(route),
        },
        (route, Some(user)) if route.permits(user.role) => GuardOutcome::Render,
        (_, Some(_)) => redirect(AppRoute::Unauthorized),
    }
}

/// Landing route after a successful login.
pub fn after_login(user: &User, from: Option<AppRoute>) -> AppRoute {
    match from {
        Some(route)
            if route.is_protected() && route != AppRoute::Home && route.permits(user.role) =>
        {
            route
        }
        _ => dashboard_for(user.role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record_id::RecordId;

    fn user(role: UserRole) -> User {
        User {
            id: RecordId::from(1_i64),
            email: "someone@test.io".into(),
            role,
        }
    }

    fn signed_in(role: UserRole) -> SessionSnapshot {
        SessionSnapshot {
            user: Some(user(role)),
            is_loading: false,
        }
    }

    #[test]
    fn paths_resolve_and_unknown_goes_home() {
        for route in [
            AppRoute::Login,
            AppRoute::Home,
            AppRoute::Dashboard,
            AppRoute::Agent,
            AppRoute::Buyer,
            AppRoute::Admin,
            AppRoute::Unauthorized,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/buyer/"), AppRoute::Buyer);
        assert_eq!(AppRoute::from_path("/login?next=x"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/nowhere"), AppRoute::Home);
    }

    #[test]
    fn anonymous_user_is_sent_to_login() {
        let anonymous = SessionSnapshot::default();
        assert_eq!(
            guard(AppRoute::Buyer, &anonymous),
            GuardOutcome::Redirect {
                to: AppRoute::Login,
                from: Some(AppRoute::Buyer)
            }
        );
        assert_eq!(guard(AppRoute::Login, &anonymous), GuardOutcome::Render);
        assert_eq!(guard(AppRoute::Unauthorized, &anonymous), GuardOutcome::Render);
    }

    #[test]
    fn loading_session_holds_protected_routes() {
        let loading = SessionSnapshot {
            user: None,
            is_loading: true,
        };
        assert_eq!(guard(AppRoute::Admin, &loading), GuardOutcome::Pending);
        assert_eq!(guard(AppRoute::Login, &loading), GuardOutcome::Pending);
    }

    #[test]
    fn wrong_role_is_unauthorized() {
        let agent = signed_in(UserRole::Agent);
        assert_eq!(guard(AppRoute::Agent, &agent), GuardOutcome::Render);
        assert_eq!(guard(AppRoute::Dashboard, &agent), GuardOutcome::Render);
        assert_eq!(guard(AppRoute::Admin, &agent), redirect(AppRoute::Unauthorized));
    }

    #[test]
    fn signed_in_user_skips_login_and_home() {
        let buyer = signed_in(UserRole::Buyer);
        assert_eq!(guard(AppRoute::Login, &buyer), redirect(AppRoute::Buyer));
        assert_eq!(guard(AppRoute::Home, &buyer), redirect(AppRoute::Buyer));
    }

    #[test]
    fn login_returns_to_permitted_origin() {
        let admin = user(UserRole::Admin);
        assert_eq!(after_login(&admin, Some(AppRoute::Admin)), AppRoute::Admin);
        assert_eq!(after_login(&admin, Some(AppRoute::Buyer)), AppRoute::Admin);
        assert_eq!(after_login(&admin, Some(AppRoute::Login)), AppRoute::Admin);
        assert_eq!(after_login(&admin, None), AppRoute::Admin);
    }
}

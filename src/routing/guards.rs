//! Route admission checks consulted by the router before activating a view
//!
//! A guard returns a boolean; `false` is always paired with exactly one
//! fallback navigation before it returns. Denial is normal control flow,
//! never an error.

use std::sync::Arc;

use crate::auth::Role;
use crate::constants::RETURN_URL_PARAM;
use crate::routing::navigator::Navigator;
use crate::security_logger::{log_security_event, SecurityEvent};
use crate::session::store::SessionStore;

/// A route activation request as the router presents it
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub path: String,
    /// Role allow-list declared on the route; empty means unrestricted
    pub allowed_roles: Vec<Role>,
}

impl RouteRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            allowed_roles: Vec::new(),
        }
    }

    pub fn with_roles(path: impl Into<String>, allowed_roles: Vec<Role>) -> Self {
        Self {
            path: path.into(),
            allowed_roles,
        }
    }
}

/// Admits only authenticated sessions.
/// Denial redirects to login carrying the requested path as the return target.
pub struct AuthGuard {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl AuthGuard {
    pub fn new(store: Arc<SessionStore>, navigator: Arc<dyn Navigator>, login_route: String) -> Self {
        Self {
            store,
            navigator,
            login_route,
        }
    }

    pub fn can_activate(&self, route: &RouteRequest) -> bool {
        if self.store.is_authenticated() {
            return true;
        }

        log_security_event(SecurityEvent::RouteDenied {
            path: route.path.clone(),
            role: None,
        });
        self.navigator
            .navigate(&self.login_route, &[(RETURN_URL_PARAM, route.path.as_str())]);
        false
    }
}

/// Admits authenticated sessions whose role is on the route's allow-list.
/// Authenticated-but-unauthorized users land on the default page, not login.
pub struct RoleGuard {
    auth: AuthGuard,
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    home_route: String,
}

impl RoleGuard {
    pub fn new(
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        login_route: String,
        home_route: String,
    ) -> Self {
        let auth = AuthGuard::new(Arc::clone(&store), Arc::clone(&navigator), login_route);
        Self {
            auth,
            store,
            navigator,
            home_route,
        }
    }

    pub fn can_activate(&self, route: &RouteRequest) -> bool {
        if !self.auth.can_activate(route) {
            return false;
        }

        if route.allowed_roles.is_empty() {
            return true;
        }

        if self.store.has_any_role(&route.allowed_roles) {
            return true;
        }

        log_security_event(SecurityEvent::RouteDenied {
            path: route.path.clone(),
            role: self.store.current_role().map(|role| role.to_string()),
        });
        self.navigator.navigate(&self.home_route, &[]);
        false
    }
}

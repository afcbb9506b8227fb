mod common;

use std::sync::Arc;

use common::{sample_session, RecordingNavigator, HOME_ROUTE, LOGIN_ROUTE};
use opsgate::auth::Role;
use opsgate::routing::{AuthGuard, Navigator, RoleGuard, RouteRequest};
use opsgate::session::SessionStore;
use opsgate::storage::MemoryCredentialStore;

fn empty_store() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Arc::new(MemoryCredentialStore::new())))
}

async fn store_with_role(role: Role) -> Arc<SessionStore> {
    let store = empty_store();
    store.set(sample_session(role, "T")).await;
    store
}

#[tokio::test]
async fn test_auth_guard_permits_authenticated_sessions() {
    let store = store_with_role(Role::Provider).await;
    let navigator = Arc::new(RecordingNavigator::new());
    let guard = AuthGuard::new(store, Arc::clone(&navigator) as Arc<dyn Navigator>, LOGIN_ROUTE.to_string());

    assert!(guard.can_activate(&RouteRequest::new("/reports/weekly")));
    assert!(navigator.calls().is_empty());
}

#[tokio::test]
async fn test_auth_guard_denies_and_redirects_with_return_target() {
    let store = empty_store();
    let navigator = Arc::new(RecordingNavigator::new());
    let guard = AuthGuard::new(store, Arc::clone(&navigator) as Arc<dyn Navigator>, LOGIN_ROUTE.to_string());

    assert!(!guard.can_activate(&RouteRequest::new("/reports/weekly")));

    let calls = navigator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, LOGIN_ROUTE);
    assert_eq!(
        calls[0].1,
        vec![("returnUrl".to_string(), "/reports/weekly".to_string())]
    );
}

#[tokio::test]
async fn test_role_guard_permits_allow_listed_role() {
    let store = store_with_role(Role::Admin).await;
    let navigator = Arc::new(RecordingNavigator::new());
    let guard = RoleGuard::new(
        store,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        LOGIN_ROUTE.to_string(),
        HOME_ROUTE.to_string(),
    );
    let route = RouteRequest::with_roles("/plans", vec![Role::Admin, Role::Supervisor]);

    assert!(guard.can_activate(&route));
    assert!(navigator.calls().is_empty());
}

#[tokio::test]
async fn test_role_guard_denies_unlisted_role_toward_home() {
    let store = store_with_role(Role::Provider).await;
    let navigator = Arc::new(RecordingNavigator::new());
    let guard = RoleGuard::new(
        store,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        LOGIN_ROUTE.to_string(),
        HOME_ROUTE.to_string(),
    );
    let route = RouteRequest::with_roles("/plans", vec![Role::Admin, Role::Supervisor]);

    assert!(!guard.can_activate(&route));

    // Authenticated but unauthorized: the landing page, not login
    let calls = navigator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (HOME_ROUTE.to_string(), Vec::new()));
}

#[tokio::test]
async fn test_role_guard_with_empty_allow_list_permits_any_role() {
    let store = store_with_role(Role::Other("AUDITOR".to_string())).await;
    let navigator = Arc::new(RecordingNavigator::new());
    let guard = RoleGuard::new(
        store,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        LOGIN_ROUTE.to_string(),
        HOME_ROUTE.to_string(),
    );

    assert!(guard.can_activate(&RouteRequest::new("/products")));
    assert!(navigator.calls().is_empty());
}

#[tokio::test]
async fn test_role_guard_requires_authentication_first() {
    let store = empty_store();
    let navigator = Arc::new(RecordingNavigator::new());
    let guard = RoleGuard::new(
        store,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        LOGIN_ROUTE.to_string(),
        HOME_ROUTE.to_string(),
    );
    let route = RouteRequest::with_roles("/plans", vec![Role::Admin]);

    assert!(!guard.can_activate(&route));

    // The unauthenticated branch redirects to login, exactly once
    let calls = navigator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, LOGIN_ROUTE);
    assert_eq!(
        calls[0].1,
        vec![("returnUrl".to_string(), "/plans".to_string())]
    );
}

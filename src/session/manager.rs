//! Session lifecycle orchestration: login, logout, and the post-login redirect

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::http::backend::{AuthBackend, Credentials, LoginRequest, LoginResponse, LogoutResponse};
use crate::routing::Navigator;
use crate::security_logger::{log_security_event, SecurityEvent};
use crate::session::activity::ActivitySource;
use crate::session::inactivity::InactivityMonitor;
use crate::session::store::{Session, SessionStore};

/// Orchestrates the session lifecycle against the authentication backend
pub struct SessionManager {
    store: Arc<SessionStore>,
    backend: Arc<dyn AuthBackend>,
    navigator: Arc<dyn Navigator>,
    monitor: InactivityMonitor,
    home_route: String,
}

impl SessionManager {
    pub fn new(
        store: Arc<SessionStore>,
        backend: Arc<dyn AuthBackend>,
        navigator: Arc<dyn Navigator>,
        source: Arc<dyn ActivitySource>,
        inactivity_window: Duration,
        login_route: String,
        home_route: String,
    ) -> Self {
        let monitor = InactivityMonitor::new(
            Arc::clone(&store),
            Arc::clone(&backend),
            Arc::clone(&navigator),
            source,
            inactivity_window,
            login_route,
        );
        Self {
            store,
            backend,
            navigator,
            monitor,
            home_route,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Authenticate against the backend.
    ///
    /// A usable response (success, user record, non-empty access token)
    /// installs the session and arms the inactivity watchdog; anything else
    /// leaves the session cleared. The raw backend response is returned to
    /// the caller either way; transport failures propagate without touching
    /// session state.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = LoginRequest::from(credentials);
        let response = self.backend.login(&request).await?;

        if !response.success {
            log_security_event(SecurityEvent::LoginRejected {
                identity: credentials.identity_label(),
                reason: response
                    .message
                    .clone()
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            });
            return Ok(response);
        }

        let token = response
            .tokens
            .as_ref()
            .map(|tokens| tokens.access_token.as_str())
            .filter(|token| !token.is_empty());

        match (response.user.as_ref(), token) {
            (Some(user), Some(token)) => {
                let user = user.clone().into_authenticated();
                log_security_event(SecurityEvent::LoginSucceeded {
                    user_id: user.id.clone(),
                    role: user.role.to_string(),
                });
                self.store
                    .set(Session {
                        user,
                        token: token.to_string(),
                    })
                    .await;
                self.monitor.arm();
            }
            _ => {
                log_security_event(SecurityEvent::LoginRejected {
                    identity: credentials.identity_label(),
                    reason: "response missing user record or access token".to_string(),
                });
            }
        }

        Ok(response)
    }

    /// Tear the session down.
    ///
    /// The local session is always cleared; a backend failure is still
    /// reported so callers can surface it.
    pub async fn logout(&self) -> Result<LogoutResponse> {
        self.monitor.disarm();
        terminate_session(&self.store, self.backend.as_ref()).await
    }

    /// Post-login landing. Every role, known or unknown, currently routes to
    /// the same destination.
    pub fn redirect_by_role(&self) {
        self.navigator.navigate(&self.home_route, &[]);
    }
}

/// Clears the session unconditionally; contacts the backend only when a
/// token exists. A backend failure surfaces to the caller after the local
/// clear has already happened.
pub(crate) async fn terminate_session(
    store: &SessionStore,
    backend: &dyn AuthBackend,
) -> Result<LogoutResponse> {
    let token = match store.current_token() {
        Some(token) => token,
        None => {
            // Nothing to revoke; clearing an absent session still succeeds
            store.clear().await;
            return Ok(LogoutResponse {
                success: true,
                message: None,
            });
        }
    };

    let user_id = store.current_user().map(|user| user.id);
    let outcome = backend.logout(&token).await;
    store.clear().await;

    match outcome {
        Ok(response) => Ok(response),
        Err(e) => {
            log_security_event(SecurityEvent::LogoutFailed {
                user_id,
                reason: e.to_string(),
            });
            Err(e)
        }
    }
}

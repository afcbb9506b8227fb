//! Reactive session state with a durable mirror
//!
//! The in-memory signal is the source of truth once initialized; durable
//! storage is a mirror the store writes and restores from, never reads back
//! during normal operation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::auth::{AuthenticatedUser, Role};
use crate::constants::{ACCESS_TOKEN_KEY, CURRENT_USER_KEY};
use crate::security_logger::{log_security_event, SecurityEvent};
use crate::storage::CredentialStore;

/// Authenticated session state.
/// The user record and its bearer credential travel together; neither exists
/// without the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: AuthenticatedUser,
    pub token: String,
}

/// Owns the in-memory session signal and mirrors it to durable storage
pub struct SessionStore {
    state: watch::Sender<Option<Session>>,
    mirror: Arc<dyn CredentialStore>,
}

impl SessionStore {
    pub fn new(mirror: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(None);
        Self { state, mirror }
    }

    /// Rehydrate the session from durable storage at process start.
    ///
    /// Partial or unparseable stored state fails open to logged-out: the
    /// remnants are discarded and `None` is returned, never an error.
    pub async fn restore(&self) -> Option<Session> {
        let token = self.mirror_read(ACCESS_TOKEN_KEY).await;
        let user_raw = self.mirror_read(CURRENT_USER_KEY).await;

        let (token, user_raw) = match (token, user_raw) {
            (Some(token), Some(user_raw)) => (token, user_raw),
            (None, None) => return None,
            _ => {
                log_security_event(SecurityEvent::StoredSessionDiscarded {
                    reason: "partial credential state".to_string(),
                });
                self.discard_mirror().await;
                return None;
            }
        };

        match serde_json::from_str::<AuthenticatedUser>(&user_raw) {
            Ok(user) => {
                let session = Session { user, token };
                log_security_event(SecurityEvent::SessionRestored {
                    user_id: session.user.id.clone(),
                });
                self.state.send_replace(Some(session.clone()));
                Some(session)
            }
            Err(e) => {
                log_security_event(SecurityEvent::StoredSessionDiscarded {
                    reason: format!("unparseable user record: {}", e),
                });
                self.discard_mirror().await;
                None
            }
        }
    }

    /// Install a session: durable mirror first, then the in-memory signal.
    ///
    /// Both writes complete before this returns, so a read in the same task
    /// observes the new session. Mirror failures are logged and absorbed;
    /// in-memory state stays authoritative.
    pub async fn set(&self, session: Session) {
        match serde_json::to_string(&session.user) {
            Ok(user_json) => {
                self.mirror_write(ACCESS_TOKEN_KEY, &session.token).await;
                self.mirror_write(CURRENT_USER_KEY, &user_json).await;
            }
            Err(e) => log::warn!("Failed to serialize user record for the durable mirror: {}", e),
        }
        self.state.send_replace(Some(session));
    }

    /// Clear session state everywhere. Idempotent.
    pub async fn clear(&self) {
        self.discard_mirror().await;
        self.state.send_replace(None);
    }

    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.state.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn current_token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn current_role(&self) -> Option<Role> {
        self.state.borrow().as_ref().map(|s| s.user.role.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.current_role().as_ref() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        match self.current_role() {
            Some(role) => roles.contains(&role),
            None => false,
        }
    }

    /// Change notifications for guards, header UI, and the request authorizer
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    async fn mirror_read(&self, key: &str) -> Option<String> {
        match self.mirror.read(key).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Durable read of '{}' failed: {}", key, e);
                None
            }
        }
    }

    async fn mirror_write(&self, key: &str, value: &str) {
        if let Err(e) = self.mirror.write(key, value).await {
            log::warn!("Durable write of '{}' failed: {}", key, e);
        }
    }

    async fn discard_mirror(&self) {
        for key in [ACCESS_TOKEN_KEY, CURRENT_USER_KEY] {
            if let Err(e) = self.mirror.remove(key).await {
                log::warn!("Durable removal of '{}' failed: {}", key, e);
            }
        }
    }
}

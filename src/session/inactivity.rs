//! Inactivity watchdog
//!
//! Forces logout after a quiet window with no observed user interaction.
//! Armed on login, disarmed on explicit logout; at most one countdown is
//! ever live.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::constants::{INACTIVITY_PARAM, INACTIVITY_REASON};
use crate::http::backend::AuthBackend;
use crate::routing::Navigator;
use crate::security_logger::{log_security_event, SecurityEvent};
use crate::session::activity::{ActivityKind, ActivitySource, INTERACTION_EVENTS};
use crate::session::manager::terminate_session;
use crate::session::store::SessionStore;

/// Timer-driven watchdog that tears the session down after inactivity
pub struct InactivityMonitor {
    store: Arc<SessionStore>,
    backend: Arc<dyn AuthBackend>,
    navigator: Arc<dyn Navigator>,
    source: Arc<dyn ActivitySource>,
    window: Duration,
    login_route: String,
    watchdog: Mutex<Option<JoinHandle<()>>>,
}

impl InactivityMonitor {
    pub fn new(
        store: Arc<SessionStore>,
        backend: Arc<dyn AuthBackend>,
        navigator: Arc<dyn Navigator>,
        source: Arc<dyn ActivitySource>,
        window: Duration,
        login_route: String,
    ) -> Self {
        Self {
            store,
            backend,
            navigator,
            source,
            window,
            login_route,
            watchdog: Mutex::new(None),
        }
    }

    /// Arm the watchdog: register interaction listeners and start the
    /// countdown. Always cancels a previous countdown first.
    pub fn arm(&self) {
        let (sink, events) = mpsc::unbounded_channel();
        self.source.register(&INTERACTION_EVENTS, sink);

        let store = Arc::clone(&self.store);
        let backend = Arc::clone(&self.backend);
        let navigator = Arc::clone(&self.navigator);
        let source = Arc::clone(&self.source);
        let window = self.window;
        let login_route = self.login_route.clone();

        let handle = tokio::spawn(async move {
            watch_for_timeout(store, backend, navigator, source, window, login_route, events).await;
        });

        if let Ok(mut watchdog) = self.watchdog.lock() {
            if let Some(previous) = watchdog.replace(handle) {
                previous.abort();
            }
        }
    }

    /// Cancel the countdown and remove interaction listeners
    pub fn disarm(&self) {
        if let Ok(mut watchdog) = self.watchdog.lock() {
            if let Some(handle) = watchdog.take() {
                handle.abort();
            }
        }
        self.source.unregister();
    }
}

async fn watch_for_timeout(
    store: Arc<SessionStore>,
    backend: Arc<dyn AuthBackend>,
    navigator: Arc<dyn Navigator>,
    source: Arc<dyn ActivitySource>,
    window: Duration,
    login_route: String,
    mut events: mpsc::UnboundedReceiver<ActivityKind>,
) {
    'countdown: loop {
        let timer = tokio::time::sleep(window);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                _ = &mut timer => break 'countdown,
                event = events.recv() => match event {
                    // Activity only restarts the countdown while a session exists
                    Some(_) if store.is_authenticated() => continue 'countdown,
                    Some(_) => {}
                    // Event source dropped the sink; nothing left to watch
                    None => return,
                },
            }
        }
    }

    source.unregister();

    // The session may have been torn down through another path while the
    // timer ran; expiring nothing must not redirect
    if !store.is_authenticated() {
        return;
    }

    log_security_event(SecurityEvent::InactivityTimeout {
        user_id: store.current_user().map(|user| user.id),
    });

    if let Err(e) = terminate_session(&store, backend.as_ref()).await {
        log::warn!("Backend logout failed during inactivity teardown: {}", e);
    }

    navigator.navigate(&login_route, &[(INACTIVITY_PARAM, INACTIVITY_REASON)]);
}

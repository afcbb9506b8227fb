//! Security-focused logging module to track session and authorization events

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use chrono::{DateTime, Utc};

/// Types of security events to track
#[derive(Debug, Clone)]
pub enum SecurityEvent {
    // Session lifecycle events
    LoginSucceeded { user_id: String, role: String },
    LoginRejected { identity: String, reason: String },
    LogoutFailed { user_id: Option<String>, reason: String },
    SessionRestored { user_id: String },
    StoredSessionDiscarded { reason: String },
    InactivityTimeout { user_id: Option<String> },

    // Route admission events
    RouteDenied { path: String, role: Option<String> },
}

/// Security event with timestamp
#[derive(Debug, Clone)]
struct TimestampedEvent {
    event: SecurityEvent,
    timestamp: DateTime<Utc>,
}

/// Security logger for tracking session and authorization events
pub struct SecurityLogger {
    events: RwLock<Vec<TimestampedEvent>>,
    event_counts: RwLock<HashMap<String, usize>>,
    max_events: usize,
}

impl SecurityLogger {
    /// Create a new security logger
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            event_counts: RwLock::new(HashMap::new()),
            max_events: 1000,
        }
    }

    /// Log a security event
    pub fn log_event(&self, event: SecurityEvent) {
        let event_key = Self::event_key(&event);

        // Add to the bounded event buffer
        if let Ok(mut events) = self.events.write() {
            events.push(TimestampedEvent {
                event: event.clone(),
                timestamp: Utc::now(),
            });
            if events.len() > self.max_events {
                let overflow = events.len() - self.max_events;
                events.drain(0..overflow);
            }
        }

        // Update counters
        if let Ok(mut counts) = self.event_counts.write() {
            *counts.entry(event_key.to_string()).or_insert(0) += 1;
        }

        // Mirror the event to the log facade
        match event {
            SecurityEvent::LoginSucceeded { user_id, role } => {
                log::info!("SECURITY: Login succeeded - User: {}, Role: {}", user_id, role);
            }
            SecurityEvent::LoginRejected { identity, reason } => {
                log::warn!("SECURITY: Login rejected - Identity: {}, Reason: {}", identity, reason);
            }
            SecurityEvent::LogoutFailed { user_id, reason } => {
                log::warn!("SECURITY: Logout failed - User: {:?}, Reason: {}", user_id, reason);
            }
            SecurityEvent::SessionRestored { user_id } => {
                log::info!("SECURITY: Session restored - User: {}", user_id);
            }
            SecurityEvent::StoredSessionDiscarded { reason } => {
                log::warn!("SECURITY: Stored session discarded - Reason: {}", reason);
            }
            SecurityEvent::InactivityTimeout { user_id } => {
                log::warn!("SECURITY: Session expired after inactivity - User: {:?}", user_id);
            }
            SecurityEvent::RouteDenied { path, role } => {
                log::warn!("SECURITY: Route denied - Path: {}, Role: {:?}", path, role);
            }
        }
    }

    /// Get event key for tracking
    fn event_key(event: &SecurityEvent) -> &'static str {
        match event {
            SecurityEvent::LoginSucceeded { .. } => "login_succeeded",
            SecurityEvent::LoginRejected { .. } => "login_rejected",
            SecurityEvent::LogoutFailed { .. } => "logout_failed",
            SecurityEvent::SessionRestored { .. } => "session_restored",
            SecurityEvent::StoredSessionDiscarded { .. } => "stored_session_discarded",
            SecurityEvent::InactivityTimeout { .. } => "inactivity_timeout",
            SecurityEvent::RouteDenied { .. } => "route_denied",
        }
    }

    /// Get the most recent security events, newest last
    pub fn recent_events(&self, limit: usize) -> Vec<SecurityEvent> {
        match self.events.read() {
            Ok(events) => events
                .iter()
                .rev()
                .take(limit)
                .map(|e| e.event.clone())
                .rev()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Get event statistics
    pub fn event_stats(&self) -> HashMap<String, usize> {
        match self.event_counts.read() {
            Ok(counts) => counts.clone(),
            Err(_) => HashMap::new(),
        }
    }
}

impl Default for SecurityLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Global security logger instance - thread-safe singleton
static SECURITY_LOGGER: OnceLock<Arc<SecurityLogger>> = OnceLock::new();

/// Initialize the global security logger
pub fn init_security_logger() {
    SECURITY_LOGGER.get_or_init(|| Arc::new(SecurityLogger::new()));
}

/// Get the global security logger
pub fn get_security_logger() -> Option<Arc<SecurityLogger>> {
    SECURITY_LOGGER.get().cloned()
}

/// Log a security event using the global logger
pub fn log_security_event(event: SecurityEvent) {
    if let Some(logger) = get_security_logger() {
        logger.log_event(event);
    }
}

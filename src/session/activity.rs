//! Interaction event sources feeding the inactivity watchdog
//!
//! Abstracts the host environment's input notifications: a browser shell
//! forwards DOM events, a desktop shell forwards its own input hooks, tests
//! drive the channel directly.

use std::collections::HashSet;
use std::sync::Mutex;

use tokio::sync::mpsc;

/// Interaction classes treated as user activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PointerDown,
    PointerMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

/// The full interaction set registered while the watchdog is armed
pub const INTERACTION_EVENTS: [ActivityKind; 6] = [
    ActivityKind::PointerDown,
    ActivityKind::PointerMove,
    ActivityKind::KeyPress,
    ActivityKind::Scroll,
    ActivityKind::TouchStart,
    ActivityKind::Click,
];

/// A source of interaction events.
///
/// `register` installs a sink for a bounded set of event kinds;
/// `unregister` removes it. At most one sink is live at a time.
pub trait ActivitySource: Send + Sync {
    fn register(&self, kinds: &[ActivityKind], sink: mpsc::UnboundedSender<ActivityKind>);

    fn unregister(&self);
}

struct Registration {
    kinds: HashSet<ActivityKind>,
    sink: mpsc::UnboundedSender<ActivityKind>,
}

/// Channel-backed activity source.
///
/// Hosts forward their input notifications through [`emit`](Self::emit);
/// events arriving while no sink is registered are observed and dropped.
pub struct ChannelActivitySource {
    registration: Mutex<Option<Registration>>,
}

impl ChannelActivitySource {
    pub fn new() -> Self {
        Self {
            registration: Mutex::new(None),
        }
    }

    /// Forward one interaction event to the registered sink, if any
    pub fn emit(&self, kind: ActivityKind) {
        if let Ok(registration) = self.registration.lock() {
            if let Some(registration) = registration.as_ref() {
                if registration.kinds.contains(&kind) {
                    let _ = registration.sink.send(kind);
                }
            }
        }
    }
}

impl Default for ChannelActivitySource {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivitySource for ChannelActivitySource {
    fn register(&self, kinds: &[ActivityKind], sink: mpsc::UnboundedSender<ActivityKind>) {
        if let Ok(mut registration) = self.registration.lock() {
            *registration = Some(Registration {
                kinds: kinds.iter().copied().collect(),
                sink,
            });
        }
    }

    fn unregister(&self) {
        if let Ok(mut registration) = self.registration.lock() {
            *registration = None;
        }
    }
}

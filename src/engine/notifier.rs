//! Notifier capability used by the engine to report phase transitions.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::{EventKind, TimerEvent};

/// Receives phase-transition events from the engine.
///
/// Delivery is fire-and-forget: implementations must not fail the engine,
/// so a broken sink is logged and the event dropped.
pub trait Notifier {
    /// Handles one event.
    fn notify(&self, event: TimerEvent);
}

/// Discards every event.
impl Notifier for () {
    fn notify(&self, _event: TimerEvent) {}
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, event: TimerEvent) {
        (**self).notify(event)
    }
}

/// Forwards events to the daemon's event loop.
impl Notifier for mpsc::UnboundedSender<TimerEvent> {
    fn notify(&self, event: TimerEvent) {
        if self.send(event).is_err() {
            tracing::warn!(kind = event.kind.as_str(), "event receiver closed, event dropped");
        }
    }
}

/// Records every event, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<TimerEvent>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<TimerEvent> {
        self.lock().clone()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.lock().iter().map(|e| e.kind).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TimerEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: TimerEvent) {
        self.lock().push(event);
    }
}

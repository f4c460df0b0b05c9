//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::SessionEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SessionEvent);

    /// Called when the session shuts down.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events into a shared buffer so they can be inspected after
/// the sink has been boxed into a bus.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every event received so far.
    pub fn events(&self) -> Vec<SessionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SessionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`: frame events at debug, the rest at info.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SessionEvent) {
        if event.kind.is_per_frame() {
            tracing::debug!(frame = event.frame, event = ?event.kind, "session_event");
        } else {
            tracing::info!(frame = event.frame, event = ?event.kind, "session_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

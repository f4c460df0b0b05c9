//! Frame-stamped event queue with pluggable sinks.
//!
//! A session is processed on one thread, so events are buffered in a
//! plain queue and handed to sinks in emission order on [`EventBus::flush`],
//! normally once per frame. Every event is stamped with the bus's current
//! frame index.

use crate::events::{EventKind, SessionEvent};
use crate::sinks::EventSink;

/// Which events a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkFilter {
    /// Everything.
    #[default]
    All,
    /// Lifecycle and garment events only; per-frame events are skipped.
    Lifecycle,
}

impl SinkFilter {
    pub fn accepts(self, kind: &EventKind) -> bool {
        match self {
            SinkFilter::All => true,
            SinkFilter::Lifecycle => !kind.is_per_frame(),
        }
    }
}

struct Registered {
    sink: Box<dyn EventSink>,
    filter: SinkFilter,
}

/// Event bus for one session.
pub struct EventBus {
    pending: Vec<SessionEvent>,
    sinks: Vec<Registered>,
    frame: u64,
    enabled: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            sinks: Vec::new(),
            frame: 0,
            enabled: true,
        }
    }

    /// Registers a sink that receives every event.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.add_filtered_sink(sink, SinkFilter::All);
    }

    pub fn add_filtered_sink(&mut self, sink: Box<dyn EventSink>, filter: SinkFilter) {
        self.sinks.push(Registered { sink, filter });
    }

    /// Disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Frame index stamped on subsequent events.
    pub fn set_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Queues an event for the current frame.
    pub fn emit(&mut self, kind: EventKind) {
        if self.enabled {
            self.pending.push(SessionEvent::new(self.frame, kind));
        }
    }

    /// Events queued since the last flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Hands queued events to the sinks in emission order. Returns how
    /// many events were drained.
    pub fn flush(&mut self) -> usize {
        let drained = self.pending.len();
        for event in self.pending.drain(..) {
            for entry in &mut self.sinks {
                if entry.filter.accepts(&event.kind) {
                    entry.sink.handle(&event);
                }
            }
        }
        drained
    }

    /// Flushes, then lets every sink finish up.
    pub fn finalize(&mut self) {
        self.flush();
        for entry in &mut self.sinks {
            entry.sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

//! # tryon-telemetry
//!
//! Event bus for try-on sessions plus the per-session performance
//! counters (instantaneous FPS, average frame latency). Events are
//! consumed by pluggable sinks (in-memory buffer, `tracing`).

pub mod bus;
pub mod counters;
pub mod events;
pub mod sinks;

pub use bus::{EventBus, SinkFilter};
pub use counters::{PerformanceCounters, PerformanceSnapshot};
pub use events::{EventKind, SessionEvent};
pub use sinks::{EventSink, TracingSink, VecSink};

//! Session event types.
//!
//! Lightweight value types emitted by the frame orchestrator. Each event
//! is tagged with the index of the frame during which it happened.

use serde::{Deserialize, Serialize};
use tryon_types::GarmentHandle;

/// An event emitted by a try-on session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Number of frames processed before this event (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    SessionStarted,
    SessionStopped,

    /// A camera frame went through the full pipeline.
    FrameProcessed {
        /// Wall-clock time for this frame (milliseconds).
        latency_ms: f64,
        /// Instantaneous frame rate.
        fps: f64,
        /// Garments drawn.
        garments: usize,
        /// Free particles touching the body proxy.
        contacts: usize,
    },

    /// Landmarks were turned into a new collision body.
    PoseUpdated {
        confidence: f32,
        primitives: usize,
    },

    /// A garment started being worn.
    GarmentAdded {
        id: String,
        handle: GarmentHandle,
        material: String,
    },

    /// A garment was taken off.
    GarmentRemoved { id: String, handle: GarmentHandle },

    /// A garment was taken off to stay within the garment limit.
    GarmentEvicted { id: String, handle: GarmentHandle },
}

impl SessionEvent {
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}

impl EventKind {
    /// Emitted on every processed frame.
    pub fn is_per_frame(&self) -> bool {
        matches!(self, EventKind::FrameProcessed { .. } | EventKind::PoseUpdated { .. })
    }
}

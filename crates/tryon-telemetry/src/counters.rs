//! Session performance counters.
//!
//! Average latency is the mean over every processed frame; FPS is the
//! reciprocal of the interval between the last two frames.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Read-only view of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub frames: u64,
    pub fps: f64,
    pub average_latency_ms: f64,
    pub last_latency_ms: f64,
}

/// Accumulates per-frame timings.
#[derive(Debug, Clone, Default)]
pub struct PerformanceCounters {
    frames: u64,
    total_latency: Duration,
    last_latency: Duration,
    last_frame_at: Option<Instant>,
    fps: f64,
}

impl PerformanceCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame that took `latency` and finished at `now`.
    pub fn record_frame(&mut self, latency: Duration, now: Instant) {
        self.frames += 1;
        self.total_latency += latency;
        self.last_latency = latency;
        if let Some(prev) = self.last_frame_at {
            let interval = now.saturating_duration_since(prev).as_secs_f64();
            if interval > 0.0 {
                self.fps = 1.0 / interval;
            }
        }
        self.last_frame_at = Some(now);
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn average_latency_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.total_latency.as_secs_f64() * 1000.0 / self.frames as f64
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        PerformanceSnapshot {
            frames: self.frames,
            fps: self.fps,
            average_latency_ms: self.average_latency_ms(),
            last_latency_ms: self.last_latency.as_secs_f64() * 1000.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

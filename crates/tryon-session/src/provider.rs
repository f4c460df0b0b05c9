//! Landmark provider seam.
//!
//! Pose estimation runs outside the core. Whatever runs it hands the
//! session already-materialized landmark frames through this trait.

use tryon_body::LandmarkFrame;
use tryon_render::Image;
use tryon_types::TryOnResult;

/// Source of body landmarks for a camera frame.
pub trait LandmarkProvider: Send {
    /// Landmarks for `frame`, or `None` when no body was found. The
    /// session keeps the previous collision body in that case.
    fn detect(&mut self, frame: &Image) -> TryOnResult<Option<LandmarkFrame>>;

    fn name(&self) -> &str;
}

/// Returns the same pose for every frame.
#[derive(Debug, Clone)]
pub struct StaticLandmarks {
    frame: LandmarkFrame,
}

impl StaticLandmarks {
    pub fn new(frame: LandmarkFrame) -> Self {
        Self { frame }
    }
}

impl Default for StaticLandmarks {
    fn default() -> Self {
        Self::new(LandmarkFrame::reference_pose())
    }
}

impl LandmarkProvider for StaticLandmarks {
    fn detect(&mut self, _frame: &Image) -> TryOnResult<Option<LandmarkFrame>> {
        Ok(Some(self.frame.clone()))
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Plays back a fixed sequence of detections, one per frame, then
/// reports no body.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLandmarks {
    frames: Vec<Option<LandmarkFrame>>,
    cursor: usize,
}

impl ScriptedLandmarks {
    pub fn new(frames: Vec<Option<LandmarkFrame>>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Detections not yet played back.
    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }
}

impl LandmarkProvider for ScriptedLandmarks {
    fn detect(&mut self, _frame: &Image) -> TryOnResult<Option<LandmarkFrame>> {
        let next = self.frames.get(self.cursor).cloned().flatten();
        self.cursor += 1;
        Ok(next)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

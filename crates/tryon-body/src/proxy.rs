//! Body proxy builder.
//!
//! Landmarks are optionally blended with the previous frame (exponential
//! smoothing with a fixed factor) to suppress tracking jitter, then every
//! landmark with a radius preset becomes a sphere. Low-visibility
//! landmarks still produce a primitive; there is no confidence gating.

use glam::Vec3;
use tracing::trace;

use crate::config::{BodyProxyConfig, RadiusPresets};
use crate::landmark::{LandmarkFrame, LANDMARK_COUNT};
use crate::primitive::CollisionPrimitive;

/// Converts landmark frames into collision primitives.
pub struct BodyProxyBuilder {
    config: BodyProxyConfig,
    previous: Option<[Vec3; LANDMARK_COUNT]>,
}

impl BodyProxyBuilder {
    pub fn new(config: BodyProxyConfig) -> Self {
        Self {
            config,
            previous: None,
        }
    }

    pub fn config(&self) -> &BodyProxyConfig {
        &self.config
    }

    /// Landmark positions after smoothing, from the last [`Self::build`] call.
    pub fn smoothed_positions(&self) -> Option<&[Vec3; LANDMARK_COUNT]> {
        self.previous.as_ref()
    }

    /// Forgets the smoothing history.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Smooths `frame` against history and emits primitives in
    /// [`RadiusPresets::PRIMITIVE_LANDMARKS`] order.
    pub fn build(&mut self, frame: &LandmarkFrame) -> Vec<CollisionPrimitive> {
        let positions = self.smooth(frame);
        self.previous = Some(positions);

        let primitives: Vec<CollisionPrimitive> = RadiusPresets::PRIMITIVE_LANDMARKS
            .iter()
            .filter_map(|&landmark| {
                let radius = self.config.radii.radius_for(landmark)?;
                Some(CollisionPrimitive::at_landmark(
                    landmark,
                    positions[landmark.index()],
                    radius,
                ))
            })
            .collect();

        trace!(
            primitives = primitives.len(),
            confidence = frame.confidence,
            "Body proxy rebuilt"
        );
        primitives
    }

    fn smooth(&self, frame: &LandmarkFrame) -> [Vec3; LANDMARK_COUNT] {
        let mut out = frame.positions;
        if !self.config.smoothing_enabled {
            return out;
        }
        if let Some(prev) = &self.previous {
            let keep = self.config.smoothing;
            for (p, &old) in out.iter_mut().zip(prev.iter()) {
                *p = old * keep + *p * (1.0 - keep);
            }
        }
        out
    }
}

impl Default for BodyProxyBuilder {
    fn default() -> Self {
        Self::new(BodyProxyConfig::default())
    }
}

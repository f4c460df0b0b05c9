//! Rasterizer configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tryon_types::{TryOnError, TryOnResult};

/// Camera and shading parameters for [`crate::SoftwareRasterizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Focal scale: screen x/y are multiplied by `field_of_view / z'`.
    pub field_of_view: f32,

    /// Added to body-space z to get camera depth `z'`.
    pub camera_offset: f32,

    /// Smallest camera depth; nearer points are clamped to it.
    pub near_clip: f32,

    /// Direction the light travels, normalized on use.
    pub light_direction: [f32; 3],

    /// Floor of the lighting term.
    pub ambient: f32,

    /// Texels with alpha (0..1) below this are not drawn.
    pub alpha_cutoff: f32,

    /// Derive light direction and ambient from each background frame.
    pub estimate_lighting: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            field_of_view: 1.0,
            camera_offset: 2.0,
            near_clip: 0.01,
            light_direction: [0.5, -1.0, 0.5],
            ambient: 0.3,
            alpha_cutoff: 0.01,
            estimate_lighting: false,
        }
    }
}

impl RenderConfig {
    pub fn light_vector(&self) -> Vec3 {
        Vec3::from_array(self.light_direction).normalize_or_zero()
    }

    pub fn validate(&self) -> TryOnResult<()> {
        if !(self.field_of_view > 0.0) {
            return Err(TryOnError::InvalidConfig(format!(
                "field of view {} must be positive",
                self.field_of_view
            )));
        }
        if !(self.near_clip > 0.0) {
            return Err(TryOnError::InvalidConfig(format!(
                "near clip {} must be positive",
                self.near_clip
            )));
        }
        if self.light_vector() == Vec3::ZERO {
            return Err(TryOnError::InvalidConfig(
                "light direction must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ambient) || !(0.0..=1.0).contains(&self.alpha_cutoff) {
            return Err(TryOnError::InvalidConfig(
                "ambient and alpha cutoff must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

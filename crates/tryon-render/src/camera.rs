//! Perspective projection from body space to pixel coordinates.

use glam::Vec3;

use crate::config::RenderConfig;

/// Perspective camera for a fixed output size.
///
/// Camera depth is `z' = z + camera_offset`, clamped to `near_clip`.
/// Screen Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub field_of_view: f32,
    pub camera_offset: f32,
    pub near_clip: f32,
    pub width: f32,
    pub height: f32,
}

impl Projection {
    pub fn new(config: &RenderConfig, width: u32, height: u32) -> Self {
        Self {
            field_of_view: config.field_of_view,
            camera_offset: config.camera_offset,
            near_clip: config.near_clip,
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Returns `(pixel_x, pixel_y, depth)`.
    pub fn project(&self, point: Vec3) -> Vec3 {
        let depth = (point.z + self.camera_offset).max(self.near_clip);
        let scale = self.field_of_view / depth;
        let ndc_x = point.x * scale / self.aspect();
        let ndc_y = point.y * scale;
        Vec3::new(
            (ndc_x + 1.0) * 0.5 * self.width,
            (1.0 - ndc_y) * 0.5 * self.height,
            depth,
        )
    }
}

//! Environment light estimation from the camera background.
//!
//! Luma is averaged over the top and bottom quarters of the frame on a
//! 10-pixel lattice. A brighter top tilts the light to come more steeply
//! from above; overall brightness raises intensity and ambient.

use glam::Vec3;

use crate::image::Image;

const SAMPLE_STRIDE: usize = 10;

/// A directional light with an ambient floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentLight {
    /// Unit direction the light travels.
    pub direction: Vec3,
    /// Multiplier on the Lambertian term.
    pub intensity: f32,
    /// Floor of the lighting term.
    pub ambient: f32,
}

impl Default for EnvironmentLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, -0.3).normalize(),
            intensity: 1.0,
            ambient: 0.3,
        }
    }
}

fn luma(px: &[u8]) -> f32 {
    let r = px[0] as f32 / 255.0;
    let g = px[1] as f32 / 255.0;
    let b = px[2] as f32 / 255.0;
    0.299 * r + 0.587 * g + 0.114 * b
}

fn average_luma(image: &Image, rows: std::ops::Range<usize>) -> f32 {
    let width = image.width as usize;
    let mut sum = 0.0;
    let mut samples = 0usize;
    for y in rows.step_by(SAMPLE_STRIDE) {
        for x in (0..width).step_by(SAMPLE_STRIDE) {
            let i = (y * width + x) * 4;
            if let Some(px) = image.pixels.get(i..i + 4) {
                sum += luma(px);
                samples += 1;
            }
        }
    }
    sum / samples.max(1) as f32
}

/// Estimates the scene light from a camera frame. Empty frames get
/// [`EnvironmentLight::default`].
pub fn estimate_environment_light(image: &Image) -> EnvironmentLight {
    if image.is_empty() {
        return EnvironmentLight::default();
    }
    let h = image.height as usize;
    let top = average_luma(image, 0..h / 4);
    let bottom = average_luma(image, h * 3 / 4..h);

    let gradient = top - bottom;
    let direction = Vec3::new(0.0, -0.7 - gradient * 0.3, -0.3).normalize_or_zero();
    let brightness = (top + bottom) * 0.5;

    EnvironmentLight {
        direction,
        intensity: 0.5 + brightness * 0.5,
        ambient: 0.2 + brightness * 0.2,
    }
}

//! Triangle rasterization, shading and compositing.
//!
//! Coverage is tested at pixel centers with dot-product barycentrics; a
//! pixel is inside when all three weights are non-negative.
//! Depth is "closer wins": a fragment is kept only if its interpolated
//! depth is strictly less than the stored value. Fragments whose texel
//! alpha is below the cutoff are discarded before the depth write, so
//! transparent regions neither draw nor occlude.

use glam::{Vec2, Vec3};
use tryon_material::Texture;
use tryon_types::constants::DEGENERATE_AREA_THRESHOLD;

use crate::framebuffer::FrameBuffer;

/// Barycentric slack so pixel centers on a shared edge are covered by
/// both triangles instead of neither.
const INSIDE_EPSILON: f32 = 1.0e-5;

/// A vertex after projection: `screen = (pixel_x, pixel_y, depth)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterVertex {
    pub screen: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
}

/// Per-frame lighting state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    /// Unit direction the light travels.
    pub light_direction: Vec3,
    pub intensity: f32,
    pub ambient: f32,
    pub alpha_cutoff: f32,
}

impl Shading {
    /// Two-sided Lambertian term floored at ambient.
    ///
    /// Cloth is a thin sheet seen from either side, so the facing of the
    /// normal is ignored.
    #[inline]
    pub fn light_term(&self, normal: Vec3) -> f32 {
        let lambert = normal.dot(self.light_direction).abs() * self.intensity;
        lambert.max(self.ambient)
    }

    /// `out = albedo·light·α + existing·(1 - α)`, per channel.
    /// Returns `None` when α is below the cutoff.
    #[inline]
    pub fn composite(&self, albedo: [u8; 4], normal: Vec3, existing: [u8; 4]) -> Option<[u8; 4]> {
        let alpha = albedo[3] as f32 / 255.0;
        if alpha < self.alpha_cutoff {
            return None;
        }
        let light = self.light_term(normal);
        let blend = |src: f32, dst: u8| -> u8 {
            (src * alpha + dst as f32 * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8
        };
        Some([
            blend(albedo[0] as f32 * light, existing[0]),
            blend(albedo[1] as f32 * light, existing[1]),
            blend(albedo[2] as f32 * light, existing[2]),
            blend(255.0, existing[3]),
        ])
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    pub degenerate: usize,
    pub fragments: usize,
}

/// Barycentric weights of `p` in `(a, b, c)`, or `None` when the triangle
/// is degenerate.
#[inline]
fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Option<(f32, f32, f32)> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < DEGENERATE_AREA_THRESHOLD {
        return None;
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Some((1.0 - v - w, v, w))
}

/// Rasterizes one triangle into `fb`. Returns the number of fragments
/// written, or `None` if the triangle was skipped as degenerate.
pub fn rasterize_triangle(
    fb: &mut FrameBuffer,
    tri: &[RasterVertex; 3],
    texture: &Texture,
    shading: &Shading,
) -> Option<usize> {
    let [a, b, c] = tri.map(|v| v.screen.truncate());
    // Degeneracy does not depend on the sample point.
    barycentric(a, b, c, a)?;

    if fb.width() == 0 || fb.height() == 0 {
        return Some(0);
    }
    let max_x = (fb.width() - 1) as f32;
    let max_y = (fb.height() - 1) as f32;
    let lo = a.min(b).min(c);
    let hi = a.max(b).max(c);
    if hi.x < 0.0 || hi.y < 0.0 || lo.x > max_x + 1.0 || lo.y > max_y + 1.0 {
        return Some(0);
    }
    let x0 = lo.x.floor().clamp(0.0, max_x) as u32;
    let y0 = lo.y.floor().clamp(0.0, max_y) as u32;
    let x1 = hi.x.ceil().clamp(0.0, max_x) as u32;
    let y1 = hi.y.ceil().clamp(0.0, max_y) as u32;

    let mut written = 0;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some((u, v, w)) = barycentric(a, b, c, p) else {
                continue;
            };
            if u < -INSIDE_EPSILON || v < -INSIDE_EPSILON || w < -INSIDE_EPSILON {
                continue;
            }

            let depth = u * tri[0].screen.z + v * tri[1].screen.z + w * tri[2].screen.z;
            if depth >= fb.depth_at(x, y) {
                continue;
            }

            let uv = tri[0].uv * u + tri[1].uv * v + tri[2].uv * w;
            let normal = (tri[0].normal * u + tri[1].normal * v + tri[2].normal * w).normalize_or_zero();
            let albedo = texture.sample(uv);
            let Some(rgba) = shading.composite(albedo, normal, fb.pixel(x, y)) else {
                continue;
            };

            fb.set_depth(x, y, depth);
            fb.set_pixel(x, y, rgba);
            written += 1;
        }
    }
    Some(written)
}

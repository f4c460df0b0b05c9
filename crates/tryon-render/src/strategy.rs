//! Render strategy trait and the software reference backend.
//!
//! A render strategy is a function from (background, deformed garment
//! meshes, textures, camera) to a composited image. GPU backends plug in
//! behind the same trait; [`SoftwareRasterizer`] stays available as the
//! reference their output is checked against.

use tracing::{trace, warn};
use tryon_material::Texture;
use tryon_mesh::TriangleMesh;
use tryon_types::{TryOnError, TryOnResult};

use crate::camera::Projection;
use crate::config::RenderConfig;
use crate::framebuffer::FrameBuffer;
use crate::image::Image;
use crate::lighting::{estimate_environment_light, EnvironmentLight};
use crate::raster::{rasterize_triangle, RasterStats, RasterVertex, Shading};

/// One garment to draw.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub mesh: &'a TriangleMesh,
    pub texture: &'a Texture,
}

/// Trait for render backends.
///
/// # Implementations
/// - [`SoftwareRasterizer`] — CPU reference (always available)
pub trait RenderStrategy: Send {
    /// Composites `items` over `background`.
    ///
    /// Fails with [`TryOnError::NotInitialized`] when the background has
    /// no pixels, leaving any previous output untouched.
    fn render(&mut self, background: &Image, items: &[RenderItem<'_>]) -> TryOnResult<Image>;

    /// Returns the backend name.
    fn name(&self) -> &str;

    /// Counters from the last successful render.
    fn last_stats(&self) -> RasterStats;
}

/// CPU rasterizer with a persistent framebuffer.
pub struct SoftwareRasterizer {
    config: RenderConfig,
    framebuffer: FrameBuffer,
    stats: RasterStats,
}

impl SoftwareRasterizer {
    pub fn new(config: RenderConfig) -> TryOnResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            framebuffer: FrameBuffer::default(),
            stats: RasterStats::default(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    fn shading_for(&self, background: &Image) -> Shading {
        let light = if self.config.estimate_lighting {
            estimate_environment_light(background)
        } else {
            EnvironmentLight {
                direction: self.config.light_vector(),
                intensity: 1.0,
                ambient: self.config.ambient,
            }
        };
        Shading {
            light_direction: light.direction,
            intensity: light.intensity,
            ambient: light.ambient,
            alpha_cutoff: self.config.alpha_cutoff,
        }
    }
}

impl RenderStrategy for SoftwareRasterizer {
    fn render(&mut self, background: &Image, items: &[RenderItem<'_>]) -> TryOnResult<Image> {
        if background.is_empty() {
            return Err(TryOnError::NotInitialized(
                "output dimensions are zero".into(),
            ));
        }
        let expected = background.width as usize * background.height as usize * 4;
        if background.pixels.len() != expected {
            return Err(TryOnError::DimensionMismatch {
                width: background.width,
                height: background.height,
                expected,
                actual: background.pixels.len(),
            });
        }

        self.framebuffer.ensure_size(background.width, background.height);
        self.framebuffer.begin_frame(background);

        let projection = Projection::new(&self.config, background.width, background.height);
        let shading = self.shading_for(background);
        let mut stats = RasterStats::default();

        for item in items {
            let mesh = item.mesh;
            if let Err(err) = mesh.validate() {
                warn!(%err, "Skipping malformed garment mesh");
                continue;
            }
            let vertices: Vec<RasterVertex> = (0..mesh.vertex_count())
                .map(|i| RasterVertex {
                    screen: projection.project(mesh.position(i)),
                    uv: mesh.uv(i),
                    normal: mesh.normal(i),
                })
                .collect();

            for t in 0..mesh.triangle_count() {
                let [i0, i1, i2] = mesh.triangle(t);
                let tri = [
                    vertices[i0 as usize],
                    vertices[i1 as usize],
                    vertices[i2 as usize],
                ];
                stats.triangles += 1;
                match rasterize_triangle(&mut self.framebuffer, &tri, item.texture, &shading) {
                    Some(n) => stats.fragments += n,
                    None => stats.degenerate += 1,
                }
            }
        }

        trace!(
            triangles = stats.triangles,
            degenerate = stats.degenerate,
            fragments = stats.fragments,
            "Frame rasterized"
        );
        self.stats = stats;
        Ok(self.framebuffer.to_image())
    }

    fn name(&self) -> &str {
        "software"
    }

    fn last_stats(&self) -> RasterStats {
        self.stats
    }
}

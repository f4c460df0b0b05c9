//! # tryon-render
//!
//! Projects deformed garment meshes into screen space, rasterizes them with
//! a per-pixel depth test, shades with a single directional light and
//! alpha-composites the result over the camera frame.
//!
//! ## Key Types
//!
//! - [`RenderStrategy`] — pluggable render backend trait
//! - [`SoftwareRasterizer`] — CPU reference backend, always available
//! - [`FrameBuffer`] — RGBA colour plus float depth
//! - [`Projection`] — perspective camera mapping body space to pixels
//! - [`Image`] — RGBA8 camera frame / composited output

pub mod camera;
pub mod config;
pub mod framebuffer;
pub mod image;
pub mod lighting;
pub mod raster;
pub mod strategy;

pub use camera::Projection;
pub use config::RenderConfig;
pub use framebuffer::FrameBuffer;
pub use image::Image;
pub use lighting::{estimate_environment_light, EnvironmentLight};
pub use raster::{RasterStats, RasterVertex, Shading};
pub use strategy::{RenderItem, RenderStrategy, SoftwareRasterizer};

//! Garment albedo texture.
//!
//! Textures arrive already decoded (RGBA8, row-major, top row first).
//! The alpha channel doubles as the garment's coverage mask: texels with
//! zero alpha leave the background untouched when composited.

use glam::Vec2;
use tryon_types::{TryOnError, TryOnResult};

/// An RGBA8 texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Wraps a decoded RGBA8 buffer, checking its length against the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> TryOnResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TryOnError::DimensionMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A 1×1 texture of a single colour.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Texel at integer coordinates, clamped to the texture edge.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width.saturating_sub(1)) as usize;
        let y = y.min(self.height.saturating_sub(1)) as usize;
        let idx = (y * self.width as usize + x) * 4;
        match self.pixels.get(idx..idx + 4) {
            Some(px) => [px[0], px[1], px[2], px[3]],
            None => [0, 0, 0, 0],
        }
    }

    /// Nearest-neighbour sample at `uv`, with UVs clamped to [0, 1].
    ///
    /// `v = 0` is the top row. An empty texture samples as transparent black.
    pub fn sample(&self, uv: Vec2) -> [u8; 4] {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }
        let u = uv.x.clamp(0.0, 1.0);
        let v = uv.y.clamp(0.0, 1.0);
        let x = (u * (self.width - 1) as f32) as u32;
        let y = (v * (self.height - 1) as f32) as u32;
        self.texel(x, y)
    }
}

//! Colour and depth targets.

use tracing::debug;
use tryon_types::constants::FAR_DEPTH;

use crate::image::Image;

/// RGBA8 colour buffer with a parallel f32 depth buffer.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    color: Vec<u8>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            color: vec![0; n * 4],
            depth: vec![FAR_DEPTH; n],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color(&self) -> &[u8] {
        &self.color
    }

    /// Reallocates when the size changes. Returns whether it did.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        debug!(width, height, "Framebuffer resized");
        *self = Self::new(width, height);
        true
    }

    /// Copies the background into the colour buffer and resets depth to far.
    ///
    /// The buffer must already match the background size.
    pub fn begin_frame(&mut self, background: &Image) {
        self.color.copy_from_slice(&background.pixels);
        self.depth.fill(FAR_DEPTH);
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[self.index(x, y)]
    }

    #[inline]
    pub fn set_depth(&mut self, x: u32, y: u32, depth: f32) {
        let i = self.index(x, y);
        self.depth[i] = depth;
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y) * 4;
        [self.color[i], self.color[i + 1], self.color[i + 2], self.color[i + 3]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y) * 4;
        self.color[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn to_image(&self) -> Image {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.color.clone(),
        }
    }
}

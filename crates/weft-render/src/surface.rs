//! The drawing-surface seam.
//!
//! Whatever hosts the effect (a window, a browser canvas, an offscreen
//! buffer) implements [`DrawSurface`]. The renderer only ever clears,
//! fills triangles and strokes lines.

use serde::{Deserialize, Serialize};
use weft_types::Vec2;

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Straight-alpha colour: 8-bit channels and a 0..=1 opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `rgb` at opacity `alpha`, clamped to 0..=1 (NaN becomes 0).
    pub fn with_alpha(rgb: [u8; 3], alpha: f32) -> Self {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self::new(rgb[0], rgb[1], rgb[2], a)
    }
}

/// A 2D drawing target.
pub trait DrawSurface {
    /// Current dimensions.
    fn size(&self) -> SurfaceSize;

    /// Adopts new dimensions. Contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Erases everything to transparent.
    fn clear(&mut self);

    /// Fills a triangle.
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba);

    /// Strokes a one-pixel line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba);

    /// Called once a frame is fully drawn.
    fn present(&mut self) {}

    /// Returns the surface name.
    fn name(&self) -> &str;
}

//! Software RGBA canvas.
//!
//! Pixels are straight-alpha RGBA8, row-major, top-left origin. Triangles
//! are filled by sampling pixel centres against the three edge functions;
//! lines are clipped to the canvas and walked with a DDA. Both blend with
//! source-over.

use std::path::Path;

use image::RgbaImage;
use tracing::debug;
use weft_types::{Vec2, WeftError, WeftResult};

use crate::surface::{DrawSurface, Rgba, SurfaceSize};

/// An in-memory pixel surface.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PixelCanvas {
    /// A transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Pixel at (`x`, `y`), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Raw pixel rows.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] > 0).count()
    }

    /// Copies the canvas into an `image` buffer.
    pub fn to_image(&self) -> WeftResult<RgbaImage> {
        let raw: Vec<u8> = self.pixels.iter().flatten().copied().collect();
        RgbaImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| WeftError::Image("pixel buffer does not match canvas size".into()))
    }

    /// Writes the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> WeftResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WeftError::Image("cannot encode an empty canvas".into()));
        }
        let path = path.as_ref();
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| WeftError::Image(e.to_string()))?;
        debug!(path = %path.display(), width = self.width, height = self.height, "canvas saved");
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize) * self.width as usize + x as usize;
        self.pixels[idx] = source_over(self.pixels[idx], color);
    }
}

/// Straight-alpha source-over.
fn source_over(dst: [u8; 4], src: Rgba) -> [u8; 4] {
    let sa = src.a;
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0; 4];
    }
    let mix = |s: u8, d: u8| -> u8 {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    [
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Clips a segment to `[0, w] × [0, h]` (Liang–Barsky).
fn clip_segment(from: Vec2, to: Vec2, w: f32, h: f32) -> Option<(Vec2, Vec2)> {
    let d = to - from;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    for (p, q) in [
        (-d.x, from.x),
        (d.x, w - from.x),
        (-d.y, from.y),
        (d.y, h - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((from + d * t0, from + d * t1))
}

impl DrawSurface for PixelCanvas {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0; 4]; width as usize * height as usize];
    }

    fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) || color.a <= 0.0 {
            return;
        }
        let area = (b - a).perp_dot(c - a);
        if area == 0.0 {
            return;
        }

        let min = a.min(b).min(c).max(Vec2::ZERO);
        let max = a.max(b).max(c).min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        let sign = area.signum();
        let (x0, x1) = (min.x.floor() as i64, max.x.ceil() as i64);
        let (y0, y1) = (min.y.floor() as i64, max.y.ceil() as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = (b - a).perp_dot(p - a) * sign;
                let w1 = (c - b).perp_dot(p - b) * sign;
                let w2 = (a - c).perp_dot(p - c) * sign;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        if !(from.is_finite() && to.is_finite()) || color.a <= 0.0 {
            return;
        }
        let Some((p, q)) = clip_segment(from, to, self.width as f32, self.height as f32) else {
            return;
        };

        let d = q - p;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as i64;
        let inc = d / steps as f32;
        let mut last = None;
        for i in 0..=steps {
            let pt = p + inc * i as f32;
            let px = (pt.x.floor() as i64, pt.y.floor() as i64);
            // Each pixel is blended once per line.
            if last != Some(px) {
                self.blend(px.0, px.1, color);
                last = Some(px);
            }
        }
    }

    fn name(&self) -> &str {
        "pixel_canvas"
    }
}

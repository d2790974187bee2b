//! Cloth renderer.
//!
//! Stateless: every frame is a pure function of the current particle
//! positions. Clears the surface, fills two shaded triangles per grid cell,
//! then strokes every spring.

use serde::{Deserialize, Serialize};
use weft_mesh::ClothMesh;

use crate::shading::{line_shading, triangle_shading};
use crate::surface::{DrawSurface, Rgba};

/// Appearance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Triangle ink colour. Opacity comes from shading.
    pub fill: [u8; 3],
    /// Spring line colour.
    pub stroke: [u8; 3],
    /// Scales the edge cross product into the pseudo-normal.
    /// 0 keeps the flat, fully inked look.
    pub normal_tilt: f32,
    /// Fill the cloth triangles.
    pub draw_triangles: bool,
    /// Stroke every spring.
    pub draw_springs: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fill: [0, 0, 0],
            stroke: [0, 0, 0],
            normal_tilt: 0.0,
            draw_triangles: true,
            draw_springs: true,
        }
    }
}

/// What one [`ClothRenderer::render`] call drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub triangles: usize,
    pub lines: usize,
    /// Primitives dropped because an endpoint was missing.
    pub skipped: usize,
}

/// Draws a [`ClothMesh`] onto a [`DrawSurface`].
#[derive(Debug, Clone, Default)]
pub struct ClothRenderer {
    config: RenderConfig,
}

impl ClothRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draws one frame. An empty mesh just clears the surface.
    pub fn render<S: DrawSurface + ?Sized>(&self, mesh: &ClothMesh, surface: &mut S) -> RenderStats {
        let mut stats = RenderStats::default();
        surface.clear();

        if self.config.draw_triangles {
            for [i1, i2, i3] in mesh.triangles() {
                let (Some(p1), Some(p2), Some(p3)) =
                    (mesh.particle(i1), mesh.particle(i2), mesh.particle(i3))
                else {
                    stats.skipped += 1;
                    continue;
                };
                let shade = triangle_shading(p1.pos, p2.pos, p3.pos, self.config.normal_tilt);
                surface.fill_triangle(p1.pos, p2.pos, p3.pos, Rgba::with_alpha(self.config.fill, shade));
                stats.triangles += 1;
            }
        }

        if self.config.draw_springs {
            for spring in &mesh.springs {
                let Some((a, b)) = mesh.spring_endpoints(spring) else {
                    stats.skipped += 1;
                    continue;
                };
                let shade = line_shading(a, b, self.config.normal_tilt);
                surface.stroke_line(a, b, Rgba::with_alpha(self.config.stroke, shade));
                stats.lines += 1;
            }
        }

        surface.present();
        stats
    }
}

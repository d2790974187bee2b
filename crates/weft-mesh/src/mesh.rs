//! One mesh generation: the particle arena and the springs that index it.

use serde::{Deserialize, Serialize};
use weft_types::{ParticleId, Vec2, WeftError, WeftResult};

use crate::layout::GridLayout;
use crate::particle::Particle;
use crate::spring::Spring;

/// Particles and springs created together by a single build.
///
/// Springs refer to particles by [`ParticleId`]. A resize replaces the whole
/// value, so ids never outlive the generation that issued them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClothMesh {
    pub layout: GridLayout,
    pub particles: Vec<Particle>,
    pub springs: Vec<Spring>,
}

impl ClothMesh {
    /// A mesh with no particles and no springs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assembles a mesh from parts.
    pub fn from_parts(layout: GridLayout, particles: Vec<Particle>, springs: Vec<Spring>) -> Self {
        Self {
            layout,
            particles,
            springs,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Particle lookup that tolerates stale or out-of-range ids.
    #[inline]
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    /// Current positions of both spring endpoints.
    pub fn spring_endpoints(&self, spring: &Spring) -> Option<(Vec2, Vec2)> {
        let a = self.particle(spring.a)?;
        let b = self.particle(spring.b)?;
        Some((a.pos, b.pos))
    }

    /// Current length of a spring.
    pub fn spring_length(&self, spring: &Spring) -> Option<f32> {
        self.spring_endpoints(spring).map(|(a, b)| a.distance(b))
    }

    /// Count of anchored particles.
    pub fn anchored_count(&self) -> usize {
        self.particles.iter().filter(|p| p.anchored).count()
    }

    /// Triangles covering the grid, two per cell.
    ///
    /// For the cell with corners `p1 = (x, y)`, `p2 = (x+1, y)`,
    /// `p3 = (x, y+1)`, `p4 = (x+1, y+1)` the triangles are `(p1, p2, p3)`
    /// and `(p2, p4, p3)`.
    pub fn triangles(&self) -> impl Iterator<Item = [ParticleId; 3]> + '_ {
        let layout = self.layout;
        let cells_x = layout.cols.saturating_sub(1);
        let cells_y = layout.rows.saturating_sub(1);
        (0..cells_y).flat_map(move |y| {
            (0..cells_x).flat_map(move |x| {
                let p1 = layout.id(x, y);
                let p2 = layout.id(x + 1, y);
                let p3 = layout.id(x, y + 1);
                let p4 = layout.id(x + 1, y + 1);
                [[p1, p2, p3], [p2, p4, p3]]
            })
        })
    }

    /// Largest relative deviation of any spring from its rest length.
    pub fn max_strain(&self) -> f32 {
        self.springs
            .iter()
            .filter_map(|s| {
                let len = self.spring_length(s)?;
                (s.rest_length > 0.0).then(|| ((len - s.rest_length) / s.rest_length).abs())
            })
            .fold(0.0, f32::max)
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Particle count matches the layout
    /// - Spring endpoints are in range and distinct
    /// - Rest lengths are positive and stiffness is in (0, 1]
    pub fn validate(&self) -> WeftResult<()> {
        let n = self.particles.len();

        if n != self.layout.particle_count() {
            return Err(WeftError::InvalidMesh(format!(
                "Particle count ({}) != layout {}x{}",
                n, self.layout.cols, self.layout.rows
            )));
        }

        for (i, spring) in self.springs.iter().enumerate() {
            let (a, b) = spring.endpoints();
            if a.index() >= n || b.index() >= n {
                return Err(WeftError::InvalidMesh(format!(
                    "Spring {} references particle out of range: [{}, {}] (particle count: {})",
                    i, a.0, b.0, n
                )));
            }
            if a == b {
                return Err(WeftError::InvalidMesh(format!(
                    "Spring {} connects particle {} to itself",
                    i, a.0
                )));
            }
            if spring.rest_length.is_nan() || spring.rest_length <= 0.0 {
                return Err(WeftError::InvalidMesh(format!(
                    "Spring {} has non-positive rest length {}",
                    i, spring.rest_length
                )));
            }
            if !(spring.stiffness > 0.0 && spring.stiffness <= 1.0) {
                return Err(WeftError::InvalidMesh(format!(
                    "Spring {} stiffness {} outside (0, 1]",
                    i, spring.stiffness
                )));
            }
        }

        Ok(())
    }
}

//! Grid dimensions and closed-form counts.

use serde::{Deserialize, Serialize};
use weft_types::{constants, ParticleId, Vec2};

/// Row-major grid description: particle index = `row * cols + col`.
///
/// A layout with zero columns or rows describes the empty mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Particles per row (`W`).
    pub cols: usize,
    /// Particles per column (`H`).
    pub rows: usize,
    /// Distance between neighbours.
    pub spacing: f32,
    /// Position of particle (0, 0).
    pub origin: Vec2,
}

impl GridLayout {
    /// The layout of an empty mesh.
    pub const EMPTY: Self = Self {
        cols: 0,
        rows: 0,
        spacing: 0.0,
        origin: Vec2::ZERO,
    };

    pub fn new(cols: usize, rows: usize, spacing: f32, origin: Vec2) -> Self {
        Self {
            cols,
            rows,
            spacing,
            origin,
        }
    }

    /// Layout for a drawing surface.
    ///
    /// `W = ceil(width / column_fraction / spacing) + 1`,
    /// `H = ceil(height / spacing) + 1`, centred horizontally, top row at y = 0.
    /// Degenerate surfaces (or parameters) yield [`GridLayout::EMPTY`], and
    /// so do surfaces needing more than [`constants::MAX_PARTICLES`].
    pub fn for_surface(width: f32, height: f32, spacing: f32, column_fraction: f32) -> Self {
        let valid = width > 0.0
            && height > 0.0
            && spacing > 0.0
            && column_fraction > 0.0
            && width.is_finite()
            && height.is_finite();
        if !valid {
            return Self::EMPTY;
        }

        // Sized in f64 so the limit check cannot overflow.
        let cols = (width as f64 / column_fraction as f64 / spacing as f64).ceil() + 1.0;
        let rows = (height as f64 / spacing as f64).ceil() + 1.0;
        if !(cols * rows <= constants::MAX_PARTICLES as f64) {
            return Self::EMPTY;
        }
        let (cols, rows) = (cols as usize, rows as usize);
        let offset_x = (width - (cols - 1) as f32 * spacing) / 2.0;

        Self::new(cols, rows, spacing, Vec2::new(offset_x, 0.0))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Whether `cols * rows` stays within [`constants::MAX_PARTICLES`].
    pub fn within_limit(&self) -> bool {
        self.cols
            .checked_mul(self.rows)
            .is_some_and(|n| n <= constants::MAX_PARTICLES)
    }

    /// Particle id of grid cell (`col`, `row`).
    #[inline]
    pub fn id(&self, col: usize, row: usize) -> ParticleId {
        ParticleId::from(row * self.cols + col)
    }

    /// Rest position of grid cell (`col`, `row`).
    #[inline]
    pub fn rest_position(&self, col: usize, row: usize) -> Vec2 {
        self.origin + Vec2::new(col as f32, row as f32) * self.spacing
    }

    /// `W * H`.
    pub fn particle_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Horizontal + vertical springs: `(W-1)·H + W·(H-1)`.
    pub fn structural_spring_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.cols - 1) * self.rows + self.cols * (self.rows - 1)
    }

    /// Two diagonals per cell: `2·(W-1)·(H-1)`.
    pub fn shear_spring_count(&self) -> usize {
        self.cell_count() * 2
    }

    pub fn spring_count(&self) -> usize {
        self.structural_spring_count() + self.shear_spring_count()
    }

    /// Quads between four neighbouring particles.
    pub fn cell_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.cols - 1) * (self.rows - 1)
    }

    /// Two triangles per cell.
    pub fn triangle_count(&self) -> usize {
        self.cell_count() * 2
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::EMPTY
    }
}

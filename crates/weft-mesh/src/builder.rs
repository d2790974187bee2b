//! Grid mesh builder.
//!
//! Produces a complete mesh generation for a surface size. There is no
//! incremental update: every call returns a fresh arena.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use weft_types::constants;

use crate::layout::GridLayout;
use crate::mesh::ClothMesh;
use crate::particle::Particle;
use crate::spring::{Spring, SpringKind};

/// Which grid boundary particles are anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorRule {
    /// Top row, bottom row and left column. The right column stays free.
    Reference,
    /// All four edges.
    #[default]
    AllEdges,
}

impl AnchorRule {
    /// Whether cell (`col`, `row`) of a `cols × rows` grid is anchored.
    pub fn is_anchored(self, col: usize, row: usize, cols: usize, rows: usize) -> bool {
        let boundary_row = row == 0 || row + 1 == rows;
        match self {
            AnchorRule::Reference => boundary_row || col == 0,
            AnchorRule::AllEdges => boundary_row || col == 0 || col + 1 == cols,
        }
    }
}

/// Builds the particle grid and its structural and shear springs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshBuilder {
    pub spacing: f32,
    pub column_fraction: f32,
    pub structural_stiffness: f32,
    pub shear_stiffness: f32,
    pub anchor_rule: AnchorRule,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self {
            spacing: constants::SPACING,
            column_fraction: constants::COLUMN_FRACTION,
            structural_stiffness: constants::STRUCTURAL_STIFFNESS,
            shear_stiffness: constants::SHEAR_STIFFNESS,
            anchor_rule: AnchorRule::default(),
        }
    }
}

impl MeshBuilder {
    /// Builds the mesh for a `width × height` surface.
    ///
    /// A zero-sized or degenerate surface yields an empty mesh.
    pub fn build(&self, width: f32, height: f32) -> ClothMesh {
        let layout = GridLayout::for_surface(width, height, self.spacing, self.column_fraction);
        self.build_layout(layout)
    }

    /// Builds a mesh for an explicit layout.
    pub fn build_layout(&self, layout: GridLayout) -> ClothMesh {
        if layout.is_empty() {
            return ClothMesh::empty();
        }
        if !layout.within_limit() {
            warn!(
                cols = layout.cols,
                rows = layout.rows,
                max = constants::MAX_PARTICLES,
                "grid too large, building an empty mesh"
            );
            return ClothMesh::empty();
        }

        let GridLayout { cols, rows, .. } = layout;
        if self.anchor_rule == AnchorRule::Reference {
            debug!("anchoring with the reference rule: right column left free");
        }

        let mut particles = Vec::with_capacity(layout.particle_count());
        for row in 0..rows {
            for col in 0..cols {
                let anchored = self.anchor_rule.is_anchored(col, row, cols, rows);
                particles.push(Particle::new(layout.rest_position(col, row), anchored));
            }
        }

        let spacing = layout.spacing;
        let diagonal = spacing * std::f32::consts::SQRT_2;
        let mut springs = Vec::with_capacity(layout.spring_count());
        for row in 0..rows {
            for col in 0..cols {
                let here = layout.id(col, row);
                let has_right = col + 1 < cols;
                let has_below = row + 1 < rows;

                if has_right {
                    springs.push(Spring::new(
                        here,
                        layout.id(col + 1, row),
                        spacing,
                        self.structural_stiffness,
                        SpringKind::Structural,
                    ));
                }
                if has_below {
                    springs.push(Spring::new(
                        here,
                        layout.id(col, row + 1),
                        spacing,
                        self.structural_stiffness,
                        SpringKind::Structural,
                    ));
                }
                if has_right && has_below {
                    springs.push(Spring::new(
                        here,
                        layout.id(col + 1, row + 1),
                        diagonal,
                        self.shear_stiffness,
                        SpringKind::Shear,
                    ));
                    springs.push(Spring::new(
                        layout.id(col, row + 1),
                        layout.id(col + 1, row),
                        diagonal,
                        self.shear_stiffness,
                        SpringKind::Shear,
                    ));
                }
            }
        }

        debug!(
            cols,
            rows,
            particles = particles.len(),
            springs = springs.len(),
            "built cloth mesh"
        );

        ClothMesh::from_parts(layout, particles, springs)
    }
}

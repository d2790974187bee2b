//! Distance constraints between particles.

use serde::{Deserialize, Serialize};
use weft_types::ParticleId;

/// Which grid topology a spring belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpringKind {
    /// Horizontal or vertical neighbour, rest length = spacing.
    Structural,
    /// Diagonal neighbour, rest length = spacing × √2.
    Shear,
}

/// A distance constraint between two particles of the same mesh generation.
///
/// The spring only stores indices; it never owns the particles and is
/// discarded together with them on a rebuild. `rest_length` is fixed at
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub a: ParticleId,
    pub b: ParticleId,
    pub rest_length: f32,
    /// Fraction of the error corrected per relaxation, in (0, 1].
    pub stiffness: f32,
    pub kind: SpringKind,
}

impl Spring {
    pub fn new(
        a: ParticleId,
        b: ParticleId,
        rest_length: f32,
        stiffness: f32,
        kind: SpringKind,
    ) -> Self {
        Self {
            a,
            b,
            rest_length,
            stiffness,
            kind,
        }
    }

    /// Endpoint ids as a pair.
    #[inline]
    pub fn endpoints(&self) -> (ParticleId, ParticleId) {
        (self.a, self.b)
    }
}

//! Verlet sample point.

use serde::{Deserialize, Serialize};
use weft_types::Vec2;

/// A point mass with no explicit velocity.
///
/// Velocity is implied by `pos - prev`. Anchored particles are fixed
/// boundary conditions: nothing in the simulation moves them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Current position.
    pub pos: Vec2,
    /// Position at the previous frame.
    pub prev: Vec2,
    /// Immovable when set.
    pub anchored: bool,
}

impl Particle {
    /// Creates a particle at rest at `pos`.
    pub fn new(pos: Vec2, anchored: bool) -> Self {
        Self {
            pos,
            prev: pos,
            anchored,
        }
    }

    /// Free particle at rest.
    pub fn free(pos: Vec2) -> Self {
        Self::new(pos, false)
    }

    /// Anchored particle.
    pub fn anchored(pos: Vec2) -> Self {
        Self::new(pos, true)
    }

    /// Displacement over the last frame.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev
    }

    /// Moves the particle by `offset` unless it is anchored.
    #[inline]
    pub fn nudge(&mut self, offset: Vec2) {
        if !self.anchored {
            self.pos += offset;
        }
    }
}

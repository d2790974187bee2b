//! Wind impulses.
//!
//! Gusts carry a force and a frame countdown. Every live gust pushes every
//! free particle by the same amount; there is no spatial falloff.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;
use weft_types::{constants, Vec2};

/// A single time-limited wind impulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gust {
    pub force: Vec2,
    /// Frames left. Removed once this reaches zero.
    pub lifetime: i32,
}

impl Gust {
    pub fn new(force: Vec2, lifetime: i32) -> Self {
        Self { force, lifetime }
    }
}

/// Ordered collection of live gusts.
#[derive(Debug, Clone, PartialEq)]
pub struct WindField {
    gusts: Vec<Gust>,
    strength: f32,
    max_lifetime: f32,
}

impl Default for WindField {
    fn default() -> Self {
        Self::new(constants::GUST_STRENGTH, constants::MAX_GUST_LIFETIME)
    }
}

impl WindField {
    /// Creates an empty field.
    pub fn new(strength: f32, max_lifetime: f32) -> Self {
        Self {
            gusts: Vec::new(),
            strength,
            max_lifetime,
        }
    }

    /// Draws a gust without adding it.
    ///
    /// Force components are uniform in `[-0.5, 0.5) * strength`; the lifetime
    /// is `floor(u * max_lifetime)`, always in `[0, max_lifetime)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Gust {
        let fx = (rng.gen::<f32>() - 0.5) * self.strength;
        let fy = (rng.gen::<f32>() - 0.5) * self.strength;

        let max = self.max_lifetime.max(0.0);
        // f32 rounding can land u * max exactly on an integer max.
        let ceiling = (max.ceil() as i32 - 1).max(0);
        let lifetime = ((rng.gen::<f32>() * max).floor() as i32).min(ceiling);

        Gust::new(Vec2::new(fx, fy), lifetime)
    }

    /// Draws a gust, adds it to the field and returns it.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Gust {
        let gust = self.sample(rng);
        trace!(fx = gust.force.x, fy = gust.force.y, lifetime = gust.lifetime, "gust spawned");
        self.gusts.push(gust);
        gust
    }

    /// Adds an explicit gust.
    pub fn push(&mut self, gust: Gust) {
        self.gusts.push(gust);
    }

    /// Ages every gust by one frame and drops the exhausted ones.
    ///
    /// Returns how many gusts were removed.
    pub fn tick(&mut self) -> usize {
        let before = self.gusts.len();
        self.gusts.retain_mut(|gust| {
            gust.lifetime -= 1;
            gust.lifetime > 0
        });
        before - self.gusts.len()
    }

    /// Sum of all live gust forces.
    pub fn total_force(&self) -> Vec2 {
        self.gusts.iter().fold(Vec2::ZERO, |acc, g| acc + g.force)
    }

    pub fn gusts(&self) -> &[Gust] {
        &self.gusts
    }

    pub fn len(&self) -> usize {
        self.gusts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gusts.is_empty()
    }

    pub fn clear(&mut self) {
        self.gusts.clear();
    }
}

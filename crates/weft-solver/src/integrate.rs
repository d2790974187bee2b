//! Semi-implicit Verlet integration and the secondary damping pass.

use weft_mesh::Particle;
use weft_types::Vec2;

/// Advances every free particle one frame.
///
/// `v = (pos - prev) * damping + force`, then `prev = pos`, `pos += v`.
/// `force` is gravity plus the accumulated wind for this frame.
pub fn integrate(particles: &mut [Particle], force: Vec2, damping: f32) {
    for p in particles.iter_mut().filter(|p| !p.anchored) {
        let velocity = (p.pos - p.prev) * damping + force;
        p.prev = p.pos;
        p.pos += velocity;
    }
}

/// Pulls each free particle's previous position toward its current one.
///
/// Runs after [`integrate`] and bleeds off the energy the relaxation pass
/// pumps into the implicit velocity.
pub fn apply_damping(particles: &mut [Particle], damping: f32) {
    for p in particles.iter_mut().filter(|p| !p.anchored) {
        p.prev = p.pos - (p.pos - p.prev) * damping;
    }
}

/// Σ |pos - prev|² over free particles.
pub fn kinetic_energy(particles: &[Particle]) -> f64 {
    particles
        .iter()
        .filter(|p| !p.anchored)
        .map(|p| p.velocity().length_squared() as f64)
        .sum()
}

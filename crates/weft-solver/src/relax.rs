//! Spring relaxation.
//!
//! Each pass walks the spring list once, in build order, and moves the
//! endpoints toward the spring's rest length. The pass count is fixed;
//! residual error is never measured.

use serde::{Deserialize, Serialize};
use weft_mesh::{Particle, Spring};
use weft_types::constants::EPSILON;

/// How a spring's correction `(L - d) / d * k` is split between its ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionSplit {
    /// Every free endpoint moves by half, whatever its partner is.
    #[default]
    Half,
    /// The correction is divided among the free endpoints only, so a free
    /// end next to an anchor takes all of it.
    FreeEnds,
}

impl CorrectionSplit {
    fn divisor(self, free_ends: usize) -> f32 {
        match self {
            Self::Half => 2.0,
            Self::FreeEnds => free_ends as f32,
        }
    }
}

/// Relaxes a single spring in place.
///
/// Returns `false` when nothing moved (coincident endpoints, both
/// anchored, or a stale index).
pub fn relax_spring(particles: &mut [Particle], spring: &Spring, split: CorrectionSplit) -> bool {
    let (ia, ib) = (spring.a.index(), spring.b.index());
    if ia == ib {
        return false;
    }
    let (Some(a), Some(b)) = (particles.get(ia).copied(), particles.get(ib).copied()) else {
        return false;
    };

    let free_ends = [a.anchored, b.anchored].iter().filter(|&&anchored| !anchored).count();
    if free_ends == 0 {
        return false;
    }

    let delta = b.pos - a.pos;
    let distance = delta.length();
    if !distance.is_finite() || distance <= EPSILON {
        return false;
    }

    let percent =
        (spring.rest_length - distance) / distance * spring.stiffness / split.divisor(free_ends);
    let offset = delta * percent;

    particles[ia].nudge(-offset);
    particles[ib].nudge(offset);
    true
}

/// One pass over every spring.
pub fn relax_once(particles: &mut [Particle], springs: &[Spring], split: CorrectionSplit) {
    for spring in springs {
        relax_spring(particles, spring, split);
    }
}

/// `iterations` passes over every spring.
pub fn relax(particles: &mut [Particle], springs: &[Spring], iterations: u32, split: CorrectionSplit) {
    for _ in 0..iterations {
        relax_once(particles, springs, split);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_mesh::SpringKind;
    use weft_types::{ParticleId, Vec2};

    fn spring(rest: f32) -> Spring {
        Spring::new(ParticleId(0), ParticleId(1), rest, 0.2, SpringKind::Structural)
    }

    #[test]
    fn both_free_share_the_correction() {
        let mut particles = vec![
            Particle::free(Vec2::new(0.0, 0.0)),
            Particle::free(Vec2::new(20.0, 0.0)),
        ];
        assert!(relax_spring(&mut particles, &spring(10.0), CorrectionSplit::Half));
        // (10 - 20) / 20 * 0.2 / 2 = -0.05 -> each end moves 1.0 inward.
        assert!((particles[0].pos.x - 1.0).abs() < 1e-5);
        assert!((particles[1].pos.x - 19.0).abs() < 1e-5);
    }

    #[test]
    fn free_end_moves_half_next_to_anchor() {
        let mut particles = vec![
            Particle::anchored(Vec2::new(0.0, 0.0)),
            Particle::free(Vec2::new(20.0, 0.0)),
        ];
        relax_spring(&mut particles, &spring(10.0), CorrectionSplit::Half);
        assert_eq!(particles[0].pos, Vec2::ZERO);
        assert!((particles[1].pos.x - 19.0).abs() < 1e-5);
    }

    #[test]
    fn free_ends_split_gives_everything_to_lone_free_end() {
        let mut particles = vec![
            Particle::anchored(Vec2::new(0.0, 0.0)),
            Particle::free(Vec2::new(20.0, 0.0)),
        ];
        relax_spring(&mut particles, &spring(10.0), CorrectionSplit::FreeEnds);
        assert_eq!(particles[0].pos, Vec2::ZERO);
        assert!((particles[1].pos.x - 18.0).abs() < 1e-5);
    }

    #[test]
    fn splits_agree_when_both_ends_are_free() {
        let start = [Particle::free(Vec2::ZERO), Particle::free(Vec2::new(20.0, 0.0))];
        let mut half = start.to_vec();
        let mut free_ends = start.to_vec();
        relax_spring(&mut half, &spring(10.0), CorrectionSplit::Half);
        relax_spring(&mut free_ends, &spring(10.0), CorrectionSplit::FreeEnds);
        assert_eq!(half, free_ends);
    }

    #[test]
    fn stale_index_is_ignored() {
        let mut particles = vec![Particle::free(Vec2::ZERO)];
        assert!(!relax_spring(&mut particles, &spring(10.0), CorrectionSplit::Half));
    }
}

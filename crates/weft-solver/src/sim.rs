//! The per-frame simulation step.

use std::time::Instant;

use rand::Rng;
use tracing::debug;
use weft_mesh::ClothMesh;
use weft_types::Vec2;

use crate::config::SimConfig;
use crate::integrate::{apply_damping, integrate, kinetic_energy};
use crate::relax::relax;
use crate::wind::{Gust, WindField};

/// Result of a single [`ClothSim::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Frame number after the step (1 after the first step).
    pub frame: u64,
    /// Gusts that ran out this frame.
    pub expired_gusts: usize,
    /// Gusts still alive after aging.
    pub live_gusts: usize,
    /// Wind force applied to every free particle.
    pub wind_force: Vec2,
    /// Wall-clock time for the step (seconds).
    pub wall_time: f64,
}

/// Owns one mesh generation and the wind field.
///
/// Each [`step`](Self::step) runs, in order: wind aging, spring relaxation,
/// Verlet integration and the damping pass.
#[derive(Debug, Clone)]
pub struct ClothSim {
    config: SimConfig,
    mesh: ClothMesh,
    wind: WindField,
    frame: u64,
}

impl ClothSim {
    /// A simulation with an empty mesh. Call [`rebuild`](Self::rebuild) once
    /// the surface size is known.
    pub fn new(config: SimConfig) -> Self {
        let wind = WindField::new(config.gust_strength, config.max_gust_lifetime);
        Self {
            config,
            mesh: ClothMesh::empty(),
            wind,
            frame: 0,
        }
    }

    /// A simulation over an existing mesh.
    pub fn with_mesh(config: SimConfig, mesh: ClothMesh) -> Self {
        let mut sim = Self::new(config);
        sim.mesh = mesh;
        sim
    }

    /// Replaces the mesh with a fresh generation for a `width × height`
    /// surface. Wind is kept; nothing from the old mesh survives.
    pub fn rebuild(&mut self, width: f32, height: f32) -> &ClothMesh {
        self.mesh = self.config.mesh_builder().build(width, height);
        debug!(
            width,
            height,
            particles = self.mesh.particle_count(),
            springs = self.mesh.spring_count(),
            "mesh rebuilt"
        );
        &self.mesh
    }

    /// Installs a prebuilt mesh generation.
    pub fn set_mesh(&mut self, mesh: ClothMesh) {
        self.mesh = mesh;
    }

    /// Draws and adds a new gust.
    pub fn spawn_gust<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Gust {
        self.wind.spawn(rng)
    }

    /// Advances the cloth by one frame.
    pub fn step(&mut self) -> StepReport {
        let start = Instant::now();

        // 1. Age the wind before anything reads it.
        let expired_gusts = self.wind.tick();

        // 2. Relax springs for a fixed number of passes.
        let ClothMesh {
            ref mut particles,
            ref springs,
            ..
        } = self.mesh;
        relax(
            particles,
            springs,
            self.config.constraint_iterations,
            self.config.correction_split,
        );

        // 3. Integrate under gravity + wind.
        let wind_force = self.wind.total_force();
        let force = Vec2::new(0.0, self.config.gravity) + wind_force;
        integrate(particles, force, self.config.damping);

        // 4. Secondary damping.
        apply_damping(particles, self.config.damping);

        self.frame += 1;

        StepReport {
            frame: self.frame,
            expired_gusts,
            live_gusts: self.wind.len(),
            wind_force,
            wall_time: start.elapsed().as_secs_f64(),
        }
    }

    pub fn mesh(&self) -> &ClothMesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut ClothMesh {
        &mut self.mesh
    }

    pub fn wind(&self) -> &WindField {
        &self.wind
    }

    pub fn wind_mut(&mut self) -> &mut WindField {
        &mut self.wind
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Σ |pos - prev|² over free particles.
    pub fn kinetic_energy(&self) -> f64 {
        kinetic_energy(&self.mesh.particles)
    }
}

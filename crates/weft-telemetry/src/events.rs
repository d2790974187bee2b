//! Simulation event types.
//!
//! Lightweight value types tagged with the frame they belong to.

use serde::{Deserialize, Serialize};

/// An event emitted by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0 before the first step).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin,

    /// Frame completed (step + render).
    FrameEnd {
        /// Wall-clock time for the step (seconds).
        step_time: f64,
        /// Wall-clock time for the render (seconds).
        render_time: f64,
    },

    /// A new mesh generation replaced the old one.
    MeshRebuilt {
        width: u32,
        height: u32,
        cols: usize,
        rows: usize,
        particles: usize,
        springs: usize,
    },

    /// A gust joined the wind field.
    GustSpawned {
        force: [f32; 2],
        lifetime: i32,
    },

    /// Gusts removed by this frame's aging pass.
    GustsExpired { count: usize },

    /// Energy snapshot after the step.
    Energy {
        /// Σ |pos - prev|² over free particles.
        kinetic: f64,
        /// Largest relative spring deviation.
        max_strain: f32,
    },

    /// Driver lifecycle transition.
    Lifecycle { state: String },

    /// Custom event for extensibility.
    Custom {
        label: String,
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}

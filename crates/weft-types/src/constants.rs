//! Reference tuning values for the cloth effect.
//!
//! Units are surface pixels and frames. Every value here is only a default;
//! `SimConfig` in `weft-solver` is the runtime source of truth.

/// Distance between neighbouring grid particles (pixels).
pub const SPACING: f32 = 10.0;

/// The mesh spans `surface_width / COLUMN_FRACTION`, centred horizontally.
pub const COLUMN_FRACTION: f32 = 6.0;

/// Downward acceleration added to every free particle each frame.
pub const GRAVITY: f32 = 0.02;

/// Fraction of implicit velocity retained per frame.
pub const DAMPING: f32 = 0.85;

/// Stiffness of horizontal and vertical springs.
pub const STRUCTURAL_STIFFNESS: f32 = 0.2;

/// Stiffness of diagonal springs.
pub const SHEAR_STIFFNESS: f32 = 0.2;

/// Relaxation passes over every spring per frame.
pub const CONSTRAINT_ITERATIONS: u32 = 25;

/// Wall-clock period of the gust generator (milliseconds).
pub const GUST_INTERVAL_MS: u64 = 100;

/// Gust force components are drawn from `[-0.5, 0.5) * GUST_STRENGTH`.
pub const GUST_STRENGTH: f32 = 1.0;

/// Gust lifetimes are drawn as `floor(u * MAX_GUST_LIFETIME)` frames.
pub const MAX_GUST_LIFETIME: f32 = 50.0 * 1.05 * 1.05;

/// Host frame rate used by the native scheduler.
pub const FRAME_RATE: f32 = 60.0;

/// Largest grid the mesh builder will allocate. Bigger surfaces get an
/// empty mesh.
pub const MAX_PARTICLES: usize = 1 << 22;

/// Separation below which a spring is treated as degenerate.
pub const EPSILON: f32 = 1.0e-6;

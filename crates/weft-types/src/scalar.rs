//! Vector type for the simulation.
//!
//! Positions live in surface pixel space: +x to the right, +y downward.

/// 2D vector type. Re-exported from `glam` so every crate agrees on one.
pub use glam::Vec2;

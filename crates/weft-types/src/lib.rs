//! # weft-types
//!
//! Shared types, identifiers, error types, and tuning constants
//! for the weft cloth background effect.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other weft crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{WeftError, WeftResult};
pub use ids::ParticleId;
pub use scalar::Vec2;

//! # weft-mesh
//!
//! The cloth's data model: an arena of particles, springs that refer to
//! particles by index, and the grid builder that produces both from a
//! drawing-surface size.
//!
//! ## Key Types
//!
//! - [`Particle`] — current/previous position sample point, optionally anchored.
//! - [`Spring`] — distance constraint between two [`ParticleId`](weft_types::ParticleId)s.
//! - [`ClothMesh`] — one mesh generation: particles + springs + [`GridLayout`].
//! - [`MeshBuilder`] — builds a fresh generation for a surface size.

pub mod builder;
pub mod layout;
pub mod mesh;
pub mod particle;
pub mod spring;

pub use builder::{AnchorRule, MeshBuilder};
pub use layout::GridLayout;
pub use mesh::ClothMesh;
pub use particle::Particle;
pub use spring::{Spring, SpringKind};

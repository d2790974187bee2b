//! # weft-solver
//!
//! The per-frame numerical core of the cloth effect.
//!
//! ## Key Types
//!
//! - [`ClothSim`] — owns one mesh generation plus the wind field and runs [`ClothSim::step`]
//! - [`SimConfig`] — every physical tunable, serde-loadable
//! - [`WindField`] / [`Gust`] — time-limited uniform wind impulses
//! - [`relax`] / [`integrate`] — the constraint and integration passes

pub mod config;
pub mod integrate;
pub mod relax;
pub mod sim;
pub mod wind;

pub use config::SimConfig;
pub use relax::CorrectionSplit;
pub use sim::{ClothSim, StepReport};
pub use wind::{Gust, WindField};

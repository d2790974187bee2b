//! Simulation configuration.
//!
//! Parameters that control mesh construction, integration,
//! constraint relaxation and wind.

use serde::{Deserialize, Serialize};
use weft_mesh::{AnchorRule, MeshBuilder};
use weft_types::{constants, WeftError, WeftResult};

use crate::relax::CorrectionSplit;

/// Configuration for the cloth simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Distance between neighbouring particles (pixels).
    pub spacing: f32,

    /// The mesh spans `surface_width / column_fraction`, centred.
    pub column_fraction: f32,

    /// Downward acceleration per frame² (+y is down).
    pub gravity: f32,

    /// Fraction of implicit velocity kept each frame, in (0, 1].
    /// Also drives the secondary damping pass.
    pub damping: f32,

    /// Stiffness of horizontal and vertical springs, in (0, 1].
    pub structural_stiffness: f32,

    /// Stiffness of diagonal springs, in (0, 1].
    pub shear_stiffness: f32,

    /// Relaxation passes per frame. Fixed cost, no convergence check.
    pub constraint_iterations: u32,

    /// How each spring's correction is split between its endpoints.
    pub correction_split: CorrectionSplit,

    /// Gust force components are drawn from `[-0.5, 0.5) * gust_strength`.
    pub gust_strength: f32,

    /// Gust lifetimes are drawn from `[0, max_gust_lifetime)` frames.
    pub max_gust_lifetime: f32,

    /// Which boundary particles are anchored.
    pub anchor_rule: AnchorRule,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spacing: constants::SPACING,
            column_fraction: constants::COLUMN_FRACTION,
            gravity: constants::GRAVITY,
            damping: constants::DAMPING,
            structural_stiffness: constants::STRUCTURAL_STIFFNESS,
            shear_stiffness: constants::SHEAR_STIFFNESS,
            constraint_iterations: constants::CONSTRAINT_ITERATIONS,
            correction_split: CorrectionSplit::default(),
            gust_strength: constants::GUST_STRENGTH,
            max_gust_lifetime: constants::MAX_GUST_LIFETIME,
            anchor_rule: AnchorRule::default(),
        }
    }
}

impl SimConfig {
    /// A still configuration: no gravity, no wind, no dissipation.
    pub fn still() -> Self {
        Self {
            gravity: 0.0,
            damping: 1.0,
            gust_strength: 0.0,
            ..Default::default()
        }
    }

    /// The mesh builder these settings describe.
    pub fn mesh_builder(&self) -> MeshBuilder {
        MeshBuilder {
            spacing: self.spacing,
            column_fraction: self.column_fraction,
            structural_stiffness: self.structural_stiffness,
            shear_stiffness: self.shear_stiffness,
            anchor_rule: self.anchor_rule,
        }
    }

    /// Checks every field against its valid range.
    pub fn validate(&self) -> WeftResult<()> {
        fn positive(name: &str, value: f32) -> WeftResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(WeftError::InvalidConfig(format!(
                    "{name} must be a positive number (got {value})"
                )))
            }
        }

        fn unit_interval(name: &str, value: f32) -> WeftResult<()> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(WeftError::InvalidConfig(format!(
                    "{name} must be in (0, 1] (got {value})"
                )))
            }
        }

        positive("spacing", self.spacing)?;
        positive("column_fraction", self.column_fraction)?;
        positive("max_gust_lifetime", self.max_gust_lifetime)?;
        unit_interval("damping", self.damping)?;
        unit_interval("structural_stiffness", self.structural_stiffness)?;
        unit_interval("shear_stiffness", self.shear_stiffness)?;

        if !self.gravity.is_finite() {
            return Err(WeftError::InvalidConfig(format!(
                "gravity must be finite (got {})",
                self.gravity
            )));
        }
        if !(self.gust_strength.is_finite() && self.gust_strength >= 0.0) {
            return Err(WeftError::InvalidConfig(format!(
                "gust_strength must be non-negative (got {})",
                self.gust_strength
            )));
        }
        if self.constraint_iterations == 0 {
            return Err(WeftError::InvalidConfig(
                "constraint_iterations must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

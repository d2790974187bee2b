//! Host-level configuration.
//!
//! Nests the physics and appearance settings so a single TOML file
//! describes the whole effect:
//!
//! ```toml
//! frame_rate = 60.0
//! gust_interval_ms = 100
//!
//! [sim]
//! gravity = 0.02
//!
//! [render]
//! normal_tilt = 0.0
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use weft_render::RenderConfig;
use weft_solver::SimConfig;
use weft_types::{constants, WeftError, WeftResult};

/// Configuration for a mounted effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Frames per second for [`IntervalScheduler`](crate::IntervalScheduler).
    pub frame_rate: f32,

    /// Wall-clock period of the gust timer (milliseconds).
    pub gust_interval_ms: u64,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Physics.
    pub sim: SimConfig,

    /// Appearance.
    pub render: RenderConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_rate: constants::FRAME_RATE,
            gust_interval_ms: constants::GUST_INTERVAL_MS,
            seed: None,
            sim: SimConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Time between frames.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate as f64)
    }

    /// Time between gusts.
    pub fn gust_interval(&self) -> Duration {
        Duration::from_millis(self.gust_interval_ms)
    }

    /// How many frames fit in one gust interval, at least one.
    ///
    /// Used when gusts are driven by the frame count instead of the clock.
    pub fn frames_per_gust(&self) -> u64 {
        let frames = (self.gust_interval_ms as f64 * self.frame_rate as f64 / 1000.0).round();
        (frames as u64).max(1)
    }

    /// Checks the host settings, then the nested physics settings.
    pub fn validate(&self) -> WeftResult<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(WeftError::InvalidConfig(format!(
                "frame_rate must be a positive number (got {})",
                self.frame_rate
            )));
        }
        if self.gust_interval_ms == 0 {
            return Err(WeftError::InvalidConfig(
                "gust_interval_ms must be at least 1".into(),
            ));
        }
        self.sim.validate()
    }

    /// Parses a TOML document. Missing fields take their defaults.
    pub fn from_toml(text: &str) -> WeftResult<Self> {
        toml::from_str(text).map_err(|e| WeftError::Serialization(format!("TOML parse failed: {e}")))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> WeftResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| WeftError::Serialization(format!("TOML serialization failed: {e}")))
    }
}

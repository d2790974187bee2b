//! # weft-driver
//!
//! Hosts the cloth effect: owns the simulation, the renderer and the
//! drawing surface, and runs them once per frame.
//!
//! Everything that happens outside a frame (resize notifications, the
//! periodic gust timer, a stop request) is sent as a [`DriverCommand`] and
//! applied at the start of the next frame, so a frame never observes a
//! half-updated mesh.
//!
//! ## Key Types
//!
//! - [`Driver`] — mount/start/stop/unmount lifecycle and the per-frame sequence
//! - [`DriverHandle`] — cloneable, `Send` command sender for host callbacks
//! - [`GustTimer`] — background thread feeding `SpawnGust` on a fixed interval
//! - [`FrameScheduler`] — frame pacing ([`IntervalScheduler`], [`CountedScheduler`])
//! - [`RunMetrics`] — timing and energy summary of a run

pub mod command;
pub mod config;
pub mod driver;
pub mod metrics;
pub mod schedule;
pub mod timer;

pub use command::{DriverCommand, DriverHandle};
pub use config::DriverConfig;
pub use driver::{Driver, DriverState, FrameReport};
pub use metrics::RunMetrics;
pub use schedule::{CountedScheduler, FrameScheduler, IntervalScheduler};
pub use timer::GustTimer;

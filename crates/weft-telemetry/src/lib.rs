//! # weft-telemetry
//!
//! Event bus for frame telemetry. The driver emits structured events
//! (frame timing, mesh rebuilds, gusts, energy) that pluggable sinks
//! consume at frame boundaries.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};

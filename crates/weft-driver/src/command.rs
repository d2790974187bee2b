//! Messages from the host into the frame loop.

use std::sync::mpsc::Sender;

use tracing::warn;

/// A mutation requested from outside the frame loop.
///
/// Applied at the start of the next frame, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// The drawing surface changed size. Only the last pending resize
    /// in a frame is applied.
    Resize { width: u32, height: u32 },
    /// Add one randomly drawn gust.
    SpawnGust,
    /// Stop the effect before stepping.
    Stop,
}

/// Cloneable sender for [`DriverCommand`]s.
///
/// Every method returns `false` once the driver has been dropped.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    sender: Sender<DriverCommand>,
}

impl DriverHandle {
    pub(crate) fn new(sender: Sender<DriverCommand>) -> Self {
        Self { sender }
    }

    pub fn send(&self, command: DriverCommand) -> bool {
        if self.sender.send(command).is_err() {
            warn!(?command, "driver is unmounted, command dropped");
            return false;
        }
        true
    }

    /// Resize notification.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        self.send(DriverCommand::Resize { width, height })
    }

    pub fn spawn_gust(&self) -> bool {
        self.send(DriverCommand::SpawnGust)
    }

    pub fn stop(&self) -> bool {
        self.send(DriverCommand::Stop)
    }
}

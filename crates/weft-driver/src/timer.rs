//! Periodic gust generator.
//!
//! Runs on its own thread, decoupled from the frame rate. It never touches
//! the wind field directly; it only enqueues [`DriverCommand::SpawnGust`].

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};
use weft_types::{WeftError, WeftResult};

use crate::command::DriverHandle;

/// A running gust timer. Cancelled on [`cancel`](Self::cancel) or drop.
#[derive(Debug)]
pub struct GustTimer {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<u64>>,
}

impl GustTimer {
    /// Starts sending `SpawnGust` through `handle` every `interval`.
    ///
    /// The first gust fires one interval after the call. The thread exits
    /// on cancel or once the driver behind `handle` is gone.
    pub fn spawn(handle: DriverHandle, interval: Duration) -> WeftResult<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("weft-gust-timer".into())
            .spawn(move || {
                let mut fired = 0u64;
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            if !handle.spawn_gust() {
                                break;
                            }
                            fired += 1;
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                fired
            })?;

        debug!(interval_ms = interval.as_millis() as u64, "gust timer started");
        Ok(Self {
            stop: Some(stop),
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Stops the thread and waits for it. Returns how many gusts it sent.
    ///
    /// Calling this again after the first time returns `Ok(0)`.
    pub fn cancel(&mut self) -> WeftResult<u64> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        let Some(thread) = self.thread.take() else {
            return Ok(0);
        };
        let fired = thread
            .join()
            .map_err(|_| WeftError::Lifecycle("gust timer thread panicked".into()))?;
        debug!(fired, "gust timer cancelled");
        Ok(fired)
    }
}

impl Drop for GustTimer {
    fn drop(&mut self) {
        if let Err(e) = self.cancel() {
            warn!(error = %e, "gust timer did not shut down cleanly");
        }
    }
}

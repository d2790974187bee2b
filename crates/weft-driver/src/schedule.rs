//! Frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Decides when the next frame runs.
pub trait FrameScheduler {
    /// Blocks until the next frame is due. Returns `false` when no more
    /// frames should run.
    fn wait_next_frame(&mut self) -> bool;
}

/// Fixed-rate pacing against the wall clock.
///
/// A frame that runs late does not cause a burst of catch-up frames; the
/// schedule restarts from the late frame.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    period: Duration,
    next: Option<Instant>,
    remaining: Option<u64>,
}

impl IntervalScheduler {
    /// Unbounded pacing at `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: None,
            remaining: None,
        }
    }

    /// Unbounded pacing at `frame_rate` frames per second.
    pub fn from_rate(frame_rate: f32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / frame_rate.max(f32::EPSILON) as f64))
    }

    /// Stops after `frames` frames.
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameScheduler for IntervalScheduler {
    fn wait_next_frame(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        let due = match self.next {
            Some(due) if due > now => {
                thread::sleep(due - now);
                due
            }
            _ => now,
        };
        self.next = Some(due + self.period);
        true
    }
}

/// Runs a fixed number of frames back to back.
#[derive(Debug, Clone, Copy)]
pub struct CountedScheduler {
    remaining: u64,
}

impl CountedScheduler {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameScheduler for CountedScheduler {
    fn wait_next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

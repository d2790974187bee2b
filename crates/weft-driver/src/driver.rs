//! The mounted effect.
//!
//! One frame is, strictly in order:
//!
//! 1. drain pending [`DriverCommand`]s (stop, then the last resize, then gusts)
//! 2. [`ClothSim::step`]
//! 3. [`ClothRenderer::render`] onto the surface
//! 4. flush telemetry
//!
//! Nothing else mutates the mesh or the wind field, so every render reads a
//! fully settled post-integration state.

use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use weft_mesh::ClothMesh;
use weft_render::{ClothRenderer, DrawSurface, RenderStats};
use weft_solver::{ClothSim, StepReport};
use weft_telemetry::{EventBus, EventKind, EventSink, SimulationEvent};
use weft_types::{WeftError, WeftResult};

use crate::command::{DriverCommand, DriverHandle};
use crate::config::DriverConfig;
use crate::schedule::FrameScheduler;
use crate::timer::GustTimer;

/// Upper bound on the report buffer reserved up front by `run_frames`.
const REPORT_PREALLOC: u64 = 4096;

/// Lifecycle state. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

impl DriverState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

/// What one [`Driver::frame`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub step: StepReport,
    pub render: RenderStats,
    /// Gusts added from pending commands.
    pub gusts_spawned: usize,
    /// Whether a resize rebuilt the mesh before this step.
    pub rebuilt: bool,
    /// Wall-clock time for the render (seconds).
    pub render_time: f64,
}

/// A cloth effect mounted on a drawing surface.
pub struct Driver<S: DrawSurface> {
    surface: S,
    sim: ClothSim,
    renderer: ClothRenderer,
    rng: StdRng,
    config: DriverConfig,
    state: DriverState,
    handle: DriverHandle,
    commands: Receiver<DriverCommand>,
    timer: Option<GustTimer>,
    bus: EventBus,
}

impl<S: DrawSurface> Driver<S> {
    /// Mounts the effect and builds the first mesh for the surface's
    /// current size. The driver starts [`Idle`](DriverState::Idle).
    pub fn mount(surface: S, config: DriverConfig) -> WeftResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (sender, commands) = mpsc::channel();

        let mut driver = Self {
            sim: ClothSim::new(config.sim.clone()),
            renderer: ClothRenderer::new(config.render.clone()),
            surface,
            rng,
            config,
            state: DriverState::Idle,
            handle: DriverHandle::new(sender),
            commands,
            timer: None,
            bus: EventBus::new(),
        };

        let size = driver.surface.size();
        driver.rebuild(size.width, size.height);
        info!(surface = driver.surface.name(), width = size.width, height = size.height, "mounted");
        Ok(driver)
    }

    /// Registers a telemetry sink.
    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.bus.add_sink(sink);
        self
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Starts the frame loop and the gust timer.
    pub fn start(&mut self) -> WeftResult<()> {
        self.start_inner(true)
    }

    /// Starts without the gust timer. Gusts then only arrive through
    /// [`DriverHandle::spawn_gust`] or [`run_frames`](Self::run_frames).
    pub fn start_without_timer(&mut self) -> WeftResult<()> {
        self.start_inner(false)
    }

    fn start_inner(&mut self, with_timer: bool) -> WeftResult<()> {
        match self.state {
            DriverState::Running => Ok(()),
            DriverState::Stopped => Err(WeftError::Lifecycle(
                "a stopped driver cannot be restarted".into(),
            )),
            DriverState::Idle => {
                if with_timer {
                    let timer = GustTimer::spawn(self.handle.clone(), self.config.gust_interval())?;
                    self.timer = Some(timer);
                }
                self.transition(DriverState::Running);
                Ok(())
            }
        }
    }

    /// Stops the frame loop and cancels the gust timer. Idempotent.
    pub fn stop(&mut self) -> WeftResult<()> {
        if self.state == DriverState::Stopped {
            return Ok(());
        }
        let timer_result = match self.timer.take() {
            Some(mut timer) => timer.cancel().map(|_| ()),
            None => Ok(()),
        };
        // Anything still queued belongs to a loop that will never run again.
        while self.commands.try_recv().is_ok() {}
        self.transition(DriverState::Stopped);
        timer_result
    }

    /// Stops, finalizes telemetry and hands the surface back to the host.
    pub fn unmount(mut self) -> WeftResult<S> {
        self.stop()?;
        self.bus.finalize();
        info!("unmounted");
        Ok(self.surface)
    }

    /// Runs one frame. A no-op returning `None` unless the driver is running.
    pub fn frame(&mut self) -> Option<FrameReport> {
        if self.state != DriverState::Running {
            return None;
        }

        let mut resize = None;
        let mut gusts = 0usize;
        let mut stop = false;
        while let Ok(command) = self.commands.try_recv() {
            match command {
                DriverCommand::Resize { width, height } => resize = Some((width, height)),
                DriverCommand::SpawnGust => gusts += 1,
                DriverCommand::Stop => stop = true,
            }
        }

        if stop {
            if let Err(e) = self.stop() {
                warn!(error = %e, "stop request did not complete cleanly");
            }
            return None;
        }

        self.emit(EventKind::FrameBegin);

        let rebuilt = match resize {
            Some((width, height)) => {
                self.surface.resize(width, height);
                self.rebuild(width, height);
                true
            }
            None => false,
        };

        for _ in 0..gusts {
            let gust = self.sim.spawn_gust(&mut self.rng);
            self.emit(EventKind::GustSpawned {
                force: gust.force.to_array(),
                lifetime: gust.lifetime,
            });
        }

        let step = self.sim.step();
        if step.expired_gusts > 0 {
            self.emit(EventKind::GustsExpired {
                count: step.expired_gusts,
            });
        }

        let render_start = Instant::now();
        let render = self.renderer.render(self.sim.mesh(), &mut self.surface);
        let render_time = render_start.elapsed().as_secs_f64();

        if self.telemetry_active() {
            self.emit(EventKind::Energy {
                kinetic: self.sim.kinetic_energy(),
                max_strain: self.sim.mesh().max_strain(),
            });
        }
        self.emit(EventKind::FrameEnd {
            step_time: step.wall_time,
            render_time,
        });
        self.bus.flush();

        Some(FrameReport {
            step,
            render,
            gusts_spawned: gusts,
            rebuilt,
            render_time,
        })
    }

    /// Runs frames as the scheduler paces them, until it runs out or the
    /// driver stops. Returns the number of frames run.
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler) -> u64 {
        let mut frames = 0;
        while self.state == DriverState::Running && scheduler.wait_next_frame() {
            if self.frame().is_some() {
                frames += 1;
            }
        }
        frames
    }

    /// Runs `frames` frames back to back, enqueueing a gust every
    /// [`frames_per_gust`](DriverConfig::frames_per_gust) frames instead of
    /// waiting on the wall clock. Deterministic for a fixed seed.
    pub fn run_frames(&mut self, frames: u64) -> Vec<FrameReport> {
        let cadence = self.config.frames_per_gust();
        let mut reports = Vec::with_capacity(frames.min(REPORT_PREALLOC) as usize);
        for i in 1..=frames {
            if i % cadence == 0 {
                self.handle.spawn_gust();
            }
            match self.frame() {
                Some(report) => reports.push(report),
                None => break,
            }
        }
        reports
    }

    /// A sender for resize, gust and stop requests.
    pub fn handle(&self) -> DriverHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn sim(&self) -> &ClothSim {
        &self.sim
    }

    pub fn mesh(&self) -> &ClothMesh {
        self.sim.mesh()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.sim.frame()
    }

    /// Whether the gust timer thread is alive.
    pub fn timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(GustTimer::is_running)
    }

    fn rebuild(&mut self, width: u32, height: u32) {
        let mesh = self.sim.rebuild(width as f32, height as f32);
        let (cols, rows) = (mesh.layout.cols, mesh.layout.rows);
        let (particles, springs) = (mesh.particle_count(), mesh.spring_count());
        self.emit(EventKind::MeshRebuilt {
            width,
            height,
            cols,
            rows,
            particles,
            springs,
        });
    }

    fn transition(&mut self, state: DriverState) {
        debug!(from = self.state.name(), to = state.name(), "driver state");
        self.state = state;
        self.emit(EventKind::Lifecycle {
            state: state.name().to_string(),
        });
        self.bus.flush();
    }

    fn telemetry_active(&self) -> bool {
        self.bus.is_enabled() && self.bus.sink_count() > 0
    }

    fn emit(&self, kind: EventKind) {
        self.bus.emit(SimulationEvent {
            frame: self.sim.frame(),
            kind,
        });
    }
}

//! Integration tests for weft-driver.

use std::thread;
use std::time::{Duration, Instant};

use weft_driver::{
    CountedScheduler, Driver, DriverConfig, DriverState, FrameScheduler, GustTimer,
    IntervalScheduler, RunMetrics,
};
use weft_render::{DrawCommand, DrawSurface, RecordingSurface, SurfaceSize};
use weft_telemetry::{EventKind, VecSink};

fn seeded() -> DriverConfig {
    DriverConfig {
        seed: Some(42),
        ..DriverConfig::default()
    }
}

fn mounted(width: u32, height: u32) -> Driver<RecordingSurface> {
    Driver::mount(RecordingSurface::new(width, height), seeded()).unwrap()
}

fn running(width: u32, height: u32) -> Driver<RecordingSurface> {
    let mut driver = mounted(width, height);
    driver.start_without_timer().unwrap();
    driver
}

// ─── Lifecycle Tests ──────────────────────────────────────────

#[test]
fn mount_builds_mesh_for_surface() {
    let driver = mounted(600, 200);
    assert_eq!(driver.state(), DriverState::Idle);
    assert_eq!(driver.mesh().layout.cols, 11);
    assert_eq!(driver.mesh().layout.rows, 21);
    assert_eq!(driver.mesh().particle_count(), 231);
    assert!(driver.mesh().validate().is_ok());
}

#[test]
fn mount_rejects_invalid_config() {
    let mut config = DriverConfig::default();
    config.sim.damping = 0.0;
    assert!(Driver::mount(RecordingSurface::new(10, 10), config).is_err());
}

#[test]
fn frames_are_noops_until_started() {
    let mut driver = mounted(120, 60);
    assert!(driver.frame().is_none());
    assert!(driver.surface().commands().is_empty());
    assert_eq!(driver.frame_count(), 0);
}

#[test]
fn running_frame_steps_then_renders() {
    let mut driver = running(120, 60);
    let report = driver.frame().unwrap();

    assert_eq!(report.step.frame, 1);
    assert!(!report.rebuilt);
    assert_eq!(report.render.triangles, driver.mesh().layout.triangle_count());
    assert_eq!(report.render.lines, driver.mesh().spring_count());
    assert_eq!(driver.surface().frames_presented(), 1);
    assert_eq!(driver.surface().commands()[0], DrawCommand::Clear);
}

#[test]
fn stopped_is_terminal() {
    let mut driver = running(120, 60);
    driver.stop().unwrap();
    assert_eq!(driver.state(), DriverState::Stopped);
    assert!(driver.frame().is_none());
    assert!(driver.start().is_err());
    // Stopping again is fine.
    assert!(driver.stop().is_ok());
}

#[test]
fn start_twice_is_harmless() {
    let mut driver = running(120, 60);
    driver.start_without_timer().unwrap();
    assert_eq!(driver.state(), DriverState::Running);
}

#[test]
fn unmount_returns_surface() {
    let mut driver = running(120, 60);
    driver.frame();
    let surface = driver.unmount().unwrap();
    assert_eq!(surface.size(), SurfaceSize::new(120, 60));
    assert_eq!(surface.frames_presented(), 1);
}

// ─── Command Tests ────────────────────────────────────────────

#[test]
fn resize_applies_at_next_frame() {
    let mut driver = running(600, 200);
    let handle = driver.handle();
    assert!(handle.resize(1200, 300));

    // Nothing changes until the frame boundary.
    assert_eq!(driver.mesh().particle_count(), 231);

    let report = driver.frame().unwrap();
    assert!(report.rebuilt);
    assert_eq!(driver.surface().size(), SurfaceSize::new(1200, 300));
    assert_eq!(driver.mesh().layout.cols, 21);
    assert_eq!(driver.mesh().layout.rows, 31);
    assert_eq!(report.render.triangles, driver.mesh().layout.triangle_count());
}

#[test]
fn last_pending_resize_wins() {
    let mut driver = running(600, 200);
    let handle = driver.handle();
    handle.resize(60, 60);
    handle.resize(300, 100);
    driver.frame().unwrap();
    assert_eq!(driver.surface().size(), SurfaceSize::new(300, 100));
    assert_eq!(driver.mesh().layout.cols, 6);
}

#[test]
fn zero_size_surface_renders_nothing() {
    let mut driver = running(600, 200);
    driver.handle().resize(0, 200);
    let report = driver.frame().unwrap();
    assert!(driver.mesh().is_empty());
    assert_eq!(report.render.triangles + report.render.lines, 0);
    assert_eq!(driver.surface().commands(), &[DrawCommand::Clear]);

    // And it recovers on the next resize.
    driver.handle().resize(120, 60);
    driver.frame().unwrap();
    assert!(!driver.mesh().is_empty());
}

#[test]
fn huge_resize_gives_empty_mesh_instead_of_aborting() {
    let mut driver = running(600, 200);
    driver.handle().resize(u32::MAX, u32::MAX);
    let report = driver.frame().unwrap();
    assert!(report.rebuilt);
    assert!(driver.mesh().is_empty());
    assert_eq!(report.render.triangles + report.render.lines, 0);

    driver.handle().resize(120, 60);
    driver.frame().unwrap();
    assert!(!driver.mesh().is_empty());
}

#[test]
fn mounting_on_huge_surface_is_fine() {
    let driver = mounted(u32::MAX, u32::MAX);
    assert!(driver.mesh().is_empty());
}

#[test]
fn mounting_on_empty_surface_is_fine() {
    let mut driver = running(0, 0);
    assert!(driver.mesh().is_empty());
    for _ in 0..3 {
        assert!(driver.frame().is_some());
    }
}

#[test]
fn gust_requests_spawn_next_frame() {
    let sink = VecSink::new();
    let mut driver = mounted(120, 60).with_sink(Box::new(sink.clone()));
    driver.start_without_timer().unwrap();

    let handle = driver.handle();
    handle.spawn_gust();
    handle.spawn_gust();
    let report = driver.frame().unwrap();
    assert_eq!(report.gusts_spawned, 2);

    let spawned = sink
        .events()
        .iter()
        .filter(|e| matches!(e.kind, EventKind::GustSpawned { .. }))
        .count();
    assert_eq!(spawned, 2);
}

#[test]
fn stop_request_stops_before_stepping() {
    let mut driver = running(120, 60);
    driver.handle().stop();
    assert!(driver.frame().is_none());
    assert_eq!(driver.state(), DriverState::Stopped);
    assert_eq!(driver.frame_count(), 0);
}

#[test]
fn handle_fails_after_unmount() {
    let driver = running(120, 60);
    let handle = driver.handle();
    driver.unmount().unwrap();
    assert!(!handle.spawn_gust());
    assert!(!handle.resize(10, 10));
}

// ─── Frame Loop Tests ─────────────────────────────────────────

#[test]
fn run_follows_scheduler() {
    let mut driver = running(120, 60);
    let frames = driver.run(&mut CountedScheduler::new(5));
    assert_eq!(frames, 5);
    assert_eq!(driver.frame_count(), 5);
    assert_eq!(driver.surface().frames_presented(), 5);
}

#[test]
fn run_ends_when_stopped_mid_loop() {
    let mut driver = running(120, 60);
    driver.handle().stop();
    assert_eq!(driver.run(&mut CountedScheduler::new(5)), 0);
    assert_eq!(driver.state(), DriverState::Stopped);
}

#[test]
fn run_frames_feeds_gusts_on_cadence() {
    let mut driver = running(120, 60);
    assert_eq!(driver.config().frames_per_gust(), 6);
    let reports = driver.run_frames(12);
    assert_eq!(reports.len(), 12);
    let gusts: usize = reports.iter().map(|r| r.gusts_spawned).sum();
    assert_eq!(gusts, 2);
    assert_eq!(reports[5].gusts_spawned, 1);
}

#[test]
fn run_frames_with_huge_count_does_not_preallocate() {
    let mut driver = running(120, 60);
    driver.stop().unwrap();
    assert!(driver.run_frames(u64::MAX).is_empty());

    let mut driver = running(120, 60);
    driver.handle().stop();
    assert!(driver.run_frames(u64::MAX).is_empty());
    assert_eq!(driver.state(), DriverState::Stopped);
}

#[test]
fn seeded_runs_are_identical() {
    let mut a = running(300, 120);
    let mut b = running(300, 120);
    a.run_frames(40);
    b.run_frames(40);
    assert_eq!(a.mesh().particles, b.mesh().particles);
}

#[test]
fn cloth_stays_finite_over_long_run() {
    let mut driver = running(300, 120);
    driver.run_frames(300);
    assert!(driver.mesh().particles.iter().all(|p| p.pos.is_finite()));
    assert!(driver.mesh().validate().is_ok());
}

// ─── Telemetry Tests ──────────────────────────────────────────

#[test]
fn frames_emit_telemetry() {
    let sink = VecSink::new();
    let mut driver = mounted(120, 60).with_sink(Box::new(sink.clone()));
    driver.start_without_timer().unwrap();
    driver.handle().resize(180, 60);
    driver.frame().unwrap();
    driver.frame().unwrap();
    driver.unmount().unwrap();

    let events = sink.events();
    let count = |f: fn(&EventKind) -> bool| events.iter().filter(|e| f(&e.kind)).count();
    assert_eq!(count(|k| matches!(k, EventKind::FrameBegin)), 2);
    assert_eq!(count(|k| matches!(k, EventKind::FrameEnd { .. })), 2);
    assert_eq!(count(|k| matches!(k, EventKind::Energy { .. })), 2);
    assert_eq!(count(|k| matches!(k, EventKind::MeshRebuilt { .. })), 1);

    let states: Vec<&str> = events
        .iter()
        .filter_map(|e| match &e.kind {
            EventKind::Lifecycle { state } => Some(state.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(states, ["running", "stopped"]);
}

// ─── Timer Tests ──────────────────────────────────────────────

#[test]
fn gust_timer_feeds_running_driver() {
    let config = DriverConfig {
        gust_interval_ms: 5,
        ..seeded()
    };
    let mut driver = Driver::mount(RecordingSurface::new(120, 60), config).unwrap();
    driver.start().unwrap();
    assert!(driver.timer_running());

    thread::sleep(Duration::from_millis(80));
    let report = driver.frame().unwrap();
    assert!(report.gusts_spawned >= 1);

    driver.stop().unwrap();
    assert!(!driver.timer_running());
}

#[test]
fn gust_timer_cancel_is_idempotent() {
    let driver = mounted(10, 10);
    let mut timer = GustTimer::spawn(driver.handle(), Duration::from_millis(2)).unwrap();
    thread::sleep(Duration::from_millis(40));
    let fired = timer.cancel().unwrap();
    assert!(fired >= 1);
    assert!(!timer.is_running());
    assert_eq!(timer.cancel().unwrap(), 0);
}

#[test]
fn gust_timer_exits_when_driver_is_gone() {
    let driver = mounted(10, 10);
    let mut timer = GustTimer::spawn(driver.handle(), Duration::from_millis(1)).unwrap();
    drop(driver);
    thread::sleep(Duration::from_millis(20));
    // The thread already ended on its own; cancel only joins it.
    assert!(timer.cancel().is_ok());
}

// ─── Scheduler Tests ──────────────────────────────────────────

#[test]
fn counted_scheduler_counts_down() {
    let mut s = CountedScheduler::new(2);
    assert!(s.wait_next_frame());
    assert!(s.wait_next_frame());
    assert!(!s.wait_next_frame());
    assert_eq!(s.remaining(), 0);
}

#[test]
fn interval_scheduler_paces_frames() {
    let mut s = IntervalScheduler::new(Duration::from_millis(10)).with_limit(3);
    let start = Instant::now();
    assert!(s.wait_next_frame());
    assert!(s.wait_next_frame());
    assert!(s.wait_next_frame());
    assert!(!s.wait_next_frame());
    // First frame is immediate, the next two wait a period each.
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn interval_scheduler_from_rate() {
    let s = IntervalScheduler::from_rate(50.0);
    assert_eq!(s.period(), Duration::from_millis(20));
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    let config = DriverConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.gust_interval(), Duration::from_millis(100));
    assert_eq!(config.seed, None);
}

#[test]
fn config_rejects_bad_host_settings() {
    let zero_interval = DriverConfig {
        gust_interval_ms: 0,
        ..DriverConfig::default()
    };
    assert!(zero_interval.validate().is_err());

    let zero_rate = DriverConfig {
        frame_rate: 0.0,
        ..DriverConfig::default()
    };
    assert!(zero_rate.validate().is_err());
}

#[test]
fn frames_per_gust_never_zero() {
    let config = DriverConfig {
        gust_interval_ms: 1,
        ..DriverConfig::default()
    };
    assert_eq!(config.frames_per_gust(), 1);
}

#[test]
fn config_toml_round_trip() {
    let config = DriverConfig {
        seed: Some(9),
        ..DriverConfig::default()
    };
    let text = config.to_toml().unwrap();
    assert!(text.contains("[sim]"));
    assert!(text.contains("[render]"));
    assert_eq!(DriverConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn partial_toml_fills_defaults() {
    let config = DriverConfig::from_toml(
        r#"
        gust_interval_ms = 250

        [sim]
        gravity = 0.05
        anchor_rule = "reference"
        "#,
    )
    .unwrap();
    assert_eq!(config.gust_interval_ms, 250);
    assert_eq!(config.sim.gravity, 0.05);
    assert_eq!(config.sim.damping, 0.85);
    assert_eq!(config.frame_rate, 60.0);
    assert!(config.render.draw_springs);
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(DriverConfig::from_toml("frame_rate = \"fast\"").is_err());
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_summarize_a_run() {
    let mut driver = running(300, 120);
    let metrics = RunMetrics::measure("default", &mut driver, 30);
    assert_eq!(metrics.frames, 30);
    assert_eq!(metrics.gusts_spawned, 5);
    assert_eq!(metrics.particle_count, driver.mesh().particle_count());
    assert!(metrics.min_step_time <= metrics.avg_step_time);
    assert!(metrics.avg_step_time <= metrics.max_step_time);

    let csv = RunMetrics::to_csv(&[metrics]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0].split(',').count(),
        lines[1].split(',').count()
    );
    assert!(lines[1].starts_with("default,300,120,"));
}

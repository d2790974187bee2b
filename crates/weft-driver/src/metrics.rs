//! Run metrics — timing and energy collected over a batch of frames.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use weft_render::DrawSurface;

use crate::driver::{Driver, FrameReport};

/// Summary of a run of frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Run name.
    pub label: String,
    /// Surface size the run ended with.
    pub width: u32,
    pub height: u32,
    /// Frames executed.
    pub frames: u64,
    pub particle_count: usize,
    pub spring_count: usize,
    pub triangle_count: usize,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average step time (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Average render time (seconds).
    pub avg_render_time: f64,
    /// Gusts added over the run.
    pub gusts_spawned: usize,
    /// Kinetic energy after the last frame.
    pub final_kinetic_energy: f64,
    /// Largest relative spring deviation after the last frame.
    pub max_strain: f32,
}

impl RunMetrics {
    /// Runs `frames` frames on a started driver and summarizes them.
    pub fn measure<S: DrawSurface>(label: &str, driver: &mut Driver<S>, frames: u64) -> Self {
        let start = Instant::now();
        let reports = driver.run_frames(frames);
        let total_wall_time = start.elapsed().as_secs_f64();
        Self::from_reports(label, driver, &reports, total_wall_time)
    }

    /// Summarizes reports produced by `driver`.
    pub fn from_reports<S: DrawSurface>(
        label: &str,
        driver: &Driver<S>,
        reports: &[FrameReport],
        total_wall_time: f64,
    ) -> Self {
        let mesh = driver.mesh();
        let size = driver.surface().size();

        let step_times: Vec<f64> = reports.iter().map(|r| r.step.wall_time).collect();
        let (avg_step, min_step, max_step) = if step_times.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                step_times.iter().sum::<f64>() / step_times.len() as f64,
                step_times.iter().copied().fold(f64::MAX, f64::min),
                step_times.iter().copied().fold(0.0, f64::max),
            )
        };
        let avg_render = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|r| r.render_time).sum::<f64>() / reports.len() as f64
        };

        Self {
            label: label.to_string(),
            width: size.width,
            height: size.height,
            frames: reports.len() as u64,
            particle_count: mesh.particle_count(),
            spring_count: mesh.spring_count(),
            triangle_count: mesh.layout.triangle_count(),
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            avg_render_time: avg_render,
            gusts_spawned: reports.iter().map(|r| r.gusts_spawned).sum(),
            final_kinetic_energy: driver.sim().kinetic_energy(),
            max_strain: mesh.max_strain(),
        }
    }

    /// CSV header matching [`to_csv_row`](Self::to_csv_row).
    pub fn to_csv_header() -> String {
        "label,width,height,particles,springs,triangles,frames,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,avg_render_ms,gusts,final_ke,max_strain".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.4},{},{:.6e},{:.6}",
            self.label,
            self.width,
            self.height,
            self.particle_count,
            self.spring_count,
            self.triangle_count,
            self.frames,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.avg_render_time * 1000.0,
            self.gusts_spawned,
            self.final_kinetic_energy,
            self.max_strain,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[RunMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}

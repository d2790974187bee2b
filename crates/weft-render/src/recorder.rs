//! Draw-call recorder.
//!
//! Captures every draw call instead of rasterizing it. Used for tests and
//! for dumping frames as JSON for inspection.

use serde::{Deserialize, Serialize};
use weft_types::{Vec2, WeftError, WeftResult};

use crate::surface::{DrawSurface, Rgba, SurfaceSize};

/// A single captured draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    FillTriangle { points: [[f32; 2]; 3], color: Rgba },
    StrokeLine { from: [f32; 2], to: [f32; 2], color: Rgba },
}

/// A surface that records draw calls for the current frame.
///
/// `clear` drops the previous frame's commands, mirroring what clearing
/// does to pixels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    frames_presented: u32,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn triangle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillTriangle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }

    /// Frames completed so far.
    pub fn frames_presented(&self) -> u32 {
        self.frames_presented
    }

    /// The current frame's commands as JSON.
    pub fn to_json(&self) -> WeftResult<String> {
        serde_json::to_string(&self.commands)
            .map_err(|e| WeftError::Serialization(format!("JSON serialization failed: {e}")))
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = SurfaceSize::new(width, height);
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillTriangle {
            points: [a.to_array(), b.to_array(), c.to_array()],
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from: from.to_array(),
            to: to.to_array(),
            color,
        });
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }

    fn name(&self) -> &str {
        "recording_surface"
    }
}

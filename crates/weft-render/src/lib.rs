//! # weft-render
//!
//! Turns a cloth mesh into shaded triangles and lines on a drawing surface.
//!
//! Provides the [`DrawSurface`] host seam, a software [`PixelCanvas`]
//! with PNG export, a [`RecordingSurface`] that captures draw calls, and
//! the stateless [`ClothRenderer`].

pub mod canvas;
pub mod recorder;
pub mod renderer;
pub mod shading;
pub mod surface;

pub use canvas::PixelCanvas;
pub use recorder::{DrawCommand, RecordingSurface};
pub use renderer::{ClothRenderer, RenderConfig, RenderStats};
pub use surface::{DrawSurface, Rgba, SurfaceSize};

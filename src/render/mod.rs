//! Rendering: canvas abstraction, supersampled coverage, compositing.
//!
//! # Pipeline
//!
//! In vector mode a triangle is mapped through the viewport and handed to
//! [`Canvas::fill_polygon`]. In pixel-preview mode it is instead:
//!
//! 1. rasterized at model resolution into a [`CoverageLayer`] by counting
//!    sub-pixel samples on a [`SampleGrid`],
//! 2. composited over the canvas by [`composite_layer`], blending its flat
//!    color with the backdrop in proportion to coverage.

mod canvas;
mod composite;
mod primitives;
mod renderer;
mod sampler;

pub use canvas::{clip_rect, Canvas};
pub use composite::composite_layer;
pub use primitives::fill_polygon;
pub use renderer::{FrameStats, Gridlines, RenderMode, Renderer};
pub use sampler::{pixel_coverage, CoverageLayer, SampleGrid, MAX_SAMPLES};

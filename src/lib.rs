//! # Trueno-Pixel
//!
//! Pixel-preview triangle rasterizer with a pan/zoom viewport.
//!
//! Scenes of flat-colored triangles are drawn either as smooth polygons
//! (vector mode) or at their target pixel resolution (pixel-preview mode).
//! Pixel preview supersamples each pixel on a configurable sample grid,
//! tests every sample against the triangle with barycentric coordinates, and
//! blends the triangle's color with whatever is already on the canvas in
//! proportion to coverage.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_pixel::prelude::*;
//!
//! let renderer = Renderer::new(Viewport::new(8.0, ScreenPoint::new(0.0, 0.0))?)
//!     .with_mode(RenderMode::PixelPreview)
//!     .with_sample_grid(SampleGrid::new(4, 4)?);
//!
//! let frame = renderer.render(&Scene::demo(), 160, 140)?;
//! let png = PngEncoder::to_bytes(&frame)?;
//! assert!(!png.is_empty());
//! # Ok::<(), trueno_pixel::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): the `pixel-preview` binary and [`logging`] setup

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the coverage blender.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Coordinate-space-typed geometry and point-in-triangle tests.
pub mod geometry;

/// Pan/zoom state and model-to-screen transform.
pub mod viewport;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Canvas abstraction, supersampled coverage, and compositing.
pub mod render;

/// Scene description.
pub mod scene;

/// View input events and redraw triggering.
pub mod input;

/// Output encoders.
pub mod output;

// ============================================================================
// Configuration
// ============================================================================

/// YAML render configuration.
pub mod config;

/// Logger initialization for binaries.
#[cfg(feature = "cli")]
#[cfg_attr(docsrs, doc(cfg(feature = "cli")))]
pub mod logging;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-pixel operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_pixel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{mix, Rgb, Rgba};
    pub use crate::config::RenderConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{point_in_triangle, ModelPoint, ScreenPoint, Triangle};
    pub use crate::input::{InputState, PointerButton, ViewEvent};
    pub use crate::output::PngEncoder;
    pub use crate::render::{Canvas, CoverageLayer, RenderMode, Renderer, SampleGrid};
    pub use crate::scene::Scene;
    pub use crate::viewport::Viewport;
}

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

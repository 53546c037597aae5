//! Frame renderer: triangle fill in vector or pixel-preview mode.

use log::{debug, trace, warn};

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Model, Triangle};
use crate::render::canvas::Canvas;
use crate::render::composite::composite_layer;
use crate::render::sampler::{CoverageLayer, SampleGrid};
use crate::scene::Scene;
use crate::viewport::Viewport;

/// How triangles are put on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Smooth polygon fill at the zoomed resolution.
    #[default]
    Vector,
    /// Supersampled fill at model resolution, each model pixel drawn as a
    /// zoomed square blended by coverage.
    PixelPreview,
}

/// Pixel-grid overlay shown at high zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridlines {
    /// Lines are drawn only when the zoom factor exceeds this.
    pub min_scale: f32,
    /// Line color; alpha controls how strongly it shows.
    pub color: Rgba,
}

impl Default for Gridlines {
    fn default() -> Self {
        Self {
            min_scale: 8.0,
            color: Rgba::new(255, 255, 255, 38),
        }
    }
}

/// Counters for one redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Triangles submitted.
    pub triangles: usize,
    /// Triangles skipped because their vertices span no area.
    pub degenerate: usize,
    /// Preview cells written (zero in vector mode).
    pub cells: usize,
    /// Whether the gridline overlay was drawn.
    pub gridlines: bool,
}

/// Renders scenes through a [`Viewport`] onto any [`Canvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    viewport: Viewport,
    mode: RenderMode,
    grid: SampleGrid,
    background: Rgba,
    gridlines: Gridlines,
}

impl Renderer {
    /// Default background color.
    pub const BACKGROUND: Rgba = Rgba::rgb(0x1C, 0x1C, 0x1C);

    /// Create a renderer in vector mode with default settings.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            mode: RenderMode::Vector,
            grid: SampleGrid::default(),
            background: Self::BACKGROUND,
            gridlines: Gridlines::default(),
        }
    }

    /// Set the render mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the pixel-preview sample grid.
    #[must_use]
    pub fn with_sample_grid(mut self, grid: SampleGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Set the gridline overlay.
    #[must_use]
    pub fn with_gridlines(mut self, gridlines: Gridlines) -> Self {
        self.gridlines = gridlines;
        self
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport, for panning and zooming.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Change the zoom factor.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` is not finite and positive.
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        self.viewport.set_scale(scale)
    }

    /// Current render mode.
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Switch between vector and pixel-preview rendering.
    pub fn set_pixel_preview(&mut self, enabled: bool) {
        self.mode = if enabled {
            RenderMode::PixelPreview
        } else {
            RenderMode::Vector
        };
    }

    /// Pixel-preview sample grid.
    #[must_use]
    pub const fn sample_grid(&self) -> SampleGrid {
        self.grid
    }

    /// Background color used by [`Renderer::redraw`].
    #[must_use]
    pub const fn background(&self) -> Rgba {
        self.background
    }

    /// Gridline overlay settings.
    #[must_use]
    pub const fn gridlines(&self) -> Gridlines {
        self.gridlines
    }

    /// Draw one triangle in the current mode.
    ///
    /// The triangle is read, never modified. In pixel-preview mode coverage
    /// is only computed for model pixels visible on the canvas. Returns the
    /// number of preview cells written (always zero in vector mode).
    pub fn draw_triangle<C: Canvas + ?Sized>(&self, triangle: &Triangle<Model>, canvas: &mut C) -> usize {
        match self.mode {
            RenderMode::Vector => {
                let screen = self.viewport.triangle_to_screen(triangle);
                canvas.fill_polygon(&screen.vertices(), triangle.color);
                0
            }
            RenderMode::PixelPreview => {
                let (width, height) = canvas.size();
                let visible = self.viewport.visible_pixels(width, height);
                let layer = CoverageLayer::rasterize_in(triangle, self.grid, visible);
                let cells = composite_layer(&layer, triangle.color, &self.viewport, canvas);
                trace!(
                    "preview triangle {:?}: {}x{} px span, {} cells",
                    triangle.color.to_hex(),
                    layer.size().0,
                    layer.size().1,
                    cells
                );
                cells
            }
        }
    }

    /// Draw the gridline overlay if zoomed in far enough.
    ///
    /// Returns whether anything was drawn.
    pub fn draw_gridlines<C: Canvas + ?Sized>(&self, canvas: &mut C) -> bool {
        let scale = self.viewport.scale();
        if scale <= self.gridlines.min_scale {
            return false;
        }

        let (width, height) = canvas.size();
        let (cols, rows) = self.viewport.frame_buffer_order(width, height);
        let phase = self.viewport.grid_phase();
        let color = self.gridlines.color;

        for x in 0..cols {
            let sx = (x as f32 * scale + phase.x).ceil() as i32;
            canvas.blend_rect(sx, 0, 1, height, color);
        }
        for y in 0..rows {
            let sy = (y as f32 * scale + phase.y).ceil() as i32;
            canvas.blend_rect(0, sy, width, 1, color);
        }
        true
    }

    /// Redraw a full frame: background, every triangle in order, gridlines.
    ///
    /// Later triangles composite over earlier ones. Degenerate triangles are
    /// skipped.
    pub fn redraw<C: Canvas + ?Sized>(&self, scene: &Scene, canvas: &mut C) -> FrameStats {
        let mut stats = FrameStats {
            triangles: scene.triangles().len(),
            ..FrameStats::default()
        };

        canvas.clear(self.background);

        for triangle in scene.triangles() {
            if triangle.is_degenerate() {
                warn!("skipping degenerate triangle {:?}", triangle);
                stats.degenerate += 1;
                continue;
            }
            stats.cells += self.draw_triangle(triangle, canvas);
        }

        stats.gridlines = self.draw_gridlines(canvas);

        debug!(
            "redraw: mode={:?} scale={} triangles={} degenerate={} cells={} gridlines={}",
            self.mode,
            self.viewport.scale(),
            stats.triangles,
            stats.degenerate,
            stats.cells,
            stats.gridlines
        );
        stats
    }

    /// Render a scene into a fresh framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn render(&self, scene: &Scene, width: u32, height: u32) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(width, height)?;
        debug!("rendering {}x{} frame, SIMD backend {:?}", width, height, Framebuffer::backend());
        self.redraw(scene, &mut fb);
        Ok(fb)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ModelPoint, ScreenPoint};

    fn origin_viewport(scale: f32) -> Viewport {
        Viewport::new(scale, ScreenPoint::new(0.0, 0.0)).unwrap()
    }

    fn triangle(color: Rgba) -> Triangle {
        Triangle::new(
            ModelPoint::new(0.0, 0.0),
            ModelPoint::new(8.0, 0.0),
            ModelPoint::new(0.0, 8.0),
            color,
        )
    }

    #[test]
    fn test_vector_mode_fills_scaled_polygon() {
        let renderer = Renderer::new(origin_viewport(2.0));
        let mut fb = Framebuffer::new(32, 32).unwrap();
        Canvas::clear(&mut fb, Rgba::BLACK);

        assert_eq!(renderer.draw_triangle(&triangle(Rgba::RED), &mut fb), 0);

        assert_eq!(fb.color_at(1, 1), Some(Rgba::RED));
        assert_eq!(fb.color_at(12, 2), Some(Rgba::RED));
        assert_eq!(fb.color_at(17, 1), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_triangle_is_repeatable() {
        let renderer = Renderer::new(origin_viewport(3.0));
        let t = triangle(Rgba::GREEN);
        let mut first = Framebuffer::new(40, 40).unwrap();
        let mut second = Framebuffer::new(40, 40).unwrap();

        renderer.draw_triangle(&t, &mut first);
        renderer.draw_triangle(&t, &mut first);
        renderer.draw_triangle(&t, &mut second);

        assert_eq!(first.to_compact_pixels(), second.to_compact_pixels());
        assert_eq!(t, triangle(Rgba::GREEN));
    }

    #[test]
    fn test_preview_mode_writes_cells() {
        let renderer = Renderer::new(origin_viewport(4.0))
            .with_mode(RenderMode::PixelPreview)
            .with_sample_grid(SampleGrid::new(4, 4).unwrap());
        let mut fb = Framebuffer::new(40, 40).unwrap();
        Canvas::clear(&mut fb, Rgba::BLACK);

        let cells = renderer.draw_triangle(&triangle(Rgba::RED), &mut fb);

        // Pixels with x + y <= 8 have some coverage; the corner sample of
        // the x + y == 8 pixels sits exactly on the hypotenuse.
        assert_eq!(cells, 43);
        assert_eq!(fb.color_at(0, 0), Some(Rgba::RED));
        assert_eq!(fb.color_at(3, 3), Some(Rgba::RED));
        assert_eq!(fb.color_at(36, 36), Some(Rgba::BLACK));
    }

    #[test]
    fn test_preview_clips_huge_triangle_to_canvas() {
        let renderer = Renderer::new(origin_viewport(1.0))
            .with_mode(RenderMode::PixelPreview)
            .with_sample_grid(SampleGrid::new(1, 1).unwrap());
        let huge = Triangle::new(
            ModelPoint::new(0.0, 0.0),
            ModelPoint::new(3e9, 0.0),
            ModelPoint::new(0.0, 3e9),
            Rgba::RED,
        );
        let mut fb = Framebuffer::new(16, 16).unwrap();
        Canvas::clear(&mut fb, Rgba::BLACK);

        let cells = renderer.draw_triangle(&huge, &mut fb);

        assert!(cells <= 16 * 16, "cells = {cells}");
        assert_eq!(fb.color_at(0, 0), Some(Rgba::RED));
    }

    #[test]
    fn test_preview_offscreen_triangle_writes_nothing() {
        let renderer = Renderer::new(origin_viewport(2.0)).with_mode(RenderMode::PixelPreview);
        let far = Triangle::new(
            ModelPoint::new(1e6, 1e6),
            ModelPoint::new(2e6, 1e6),
            ModelPoint::new(1e6, 2e6),
            Rgba::RED,
        );
        let mut fb = Framebuffer::new(16, 16).unwrap();

        assert_eq!(renderer.draw_triangle(&far, &mut fb), 0);
    }

    #[test]
    fn test_set_pixel_preview_toggles_mode() {
        let mut renderer = Renderer::default();
        assert_eq!(renderer.mode(), RenderMode::Vector);
        renderer.set_pixel_preview(true);
        assert_eq!(renderer.mode(), RenderMode::PixelPreview);
        renderer.set_pixel_preview(false);
        assert_eq!(renderer.mode(), RenderMode::Vector);
    }

    #[test]
    fn test_gridlines_only_above_threshold() {
        let mut fb = Framebuffer::new(40, 40).unwrap();
        Canvas::clear(&mut fb, Rgba::BLACK);

        let renderer = Renderer::new(origin_viewport(8.0));
        assert!(!renderer.draw_gridlines(&mut fb));
        assert_eq!(fb.color_at(0, 5), Some(Rgba::BLACK));

        let renderer = Renderer::new(origin_viewport(10.0));
        assert!(renderer.draw_gridlines(&mut fb));
        assert_eq!(fb.color_at(10, 5), Some(Rgba::rgb(38, 38, 38)));
        assert_eq!(fb.color_at(5, 5), Some(Rgba::BLACK));
    }

    #[test]
    fn test_redraw_clears_and_counts() {
        let renderer = Renderer::new(origin_viewport(1.0)).with_background(Rgba::BLUE);
        let scene = Scene::new(vec![
            triangle(Rgba::RED),
            Triangle::new(
                ModelPoint::new(0.0, 0.0),
                ModelPoint::new(1.0, 1.0),
                ModelPoint::new(2.0, 2.0),
                Rgba::GREEN,
            ),
        ]);
        let mut fb = Framebuffer::new(16, 16).unwrap();

        let stats = renderer.redraw(&scene, &mut fb);

        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.degenerate, 1);
        assert!(!stats.gridlines);
        assert_eq!(fb.color_at(15, 15), Some(Rgba::BLUE));
        assert_eq!(fb.color_at(1, 1), Some(Rgba::RED));
    }
}

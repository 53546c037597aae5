//! Pan/zoom state and the model-to-screen transform.
//!
//! Scene geometry is never modified: every redraw maps the immutable model
//! coordinates through the current viewport, so repeated redraws at the same
//! zoom always produce the same screen geometry.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::geometry::{Model, ModelPoint, Screen, ScreenPoint, Triangle};

/// Zoom factor and pan offset of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f32,
    offset: ScreenPoint,
}

impl Viewport {
    /// Create a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`] unless `scale` is finite and positive.
    pub fn new(scale: f32, offset: ScreenPoint) -> Result<Self> {
        validate_scale(scale)?;
        Ok(Self { scale, offset })
    }

    /// Zoom factor: screen pixels per model unit.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Screen position of the model origin.
    #[must_use]
    pub const fn offset(&self) -> ScreenPoint {
        self.offset
    }

    /// Change the zoom factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`] unless `scale` is finite and positive;
    /// the viewport is left unchanged.
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        validate_scale(scale)?;
        self.scale = scale;
        Ok(())
    }

    /// Move the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.offset = ScreenPoint::new(self.offset.x + dx, self.offset.y + dy);
    }

    /// Map a model point to the screen: `p * scale + offset`.
    #[must_use]
    pub fn to_screen(&self, p: ModelPoint) -> ScreenPoint {
        let scaled: ScreenPoint = p.scale_into(self.scale, self.scale);
        ScreenPoint::new(scaled.x + self.offset.x, scaled.y + self.offset.y)
    }

    /// Map a whole triangle to the screen.
    #[must_use]
    pub fn triangle_to_screen(&self, triangle: &Triangle<Model>) -> Triangle<Screen> {
        triangle.map(|p| self.to_screen(p))
    }

    /// Side of the on-screen square covering one model pixel: `ceil(scale)`.
    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.scale.ceil() as u32
    }

    /// Model pixels needed to cover a `width x height` canvas, per axis.
    #[must_use]
    pub fn frame_buffer_order(&self, width: u32, height: u32) -> (u32, u32) {
        (
            (width as f32 / self.scale).ceil() as u32,
            (height as f32 / self.scale).ceil() as u32,
        )
    }

    /// Model pixel columns and rows that land at least partly on a
    /// `width x height` canvas: the inverse of [`Self::to_screen`] over the
    /// canvas rectangle.
    #[must_use]
    pub fn visible_pixels(&self, width: u32, height: u32) -> (Range<i32>, Range<i32>) {
        let span = |offset: f32, extent: u32| {
            let lo = ((0.0 - offset) / self.scale).floor() as i32;
            let hi = ((extent as f32 - offset) / self.scale).ceil() as i32;
            lo..hi.max(lo)
        };
        (span(self.offset.x, width), span(self.offset.y, height))
    }

    /// Screen position of the first gridline on each axis, in `[0, scale)`.
    #[must_use]
    pub fn grid_phase(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.offset.x.rem_euclid(self.scale),
            self.offset.y.rem_euclid(self.scale),
        )
    }
}

impl Default for Viewport {
    /// Unit zoom with the model origin at (300, 300).
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: ScreenPoint::new(300.0, 300.0),
        }
    }
}

fn validate_scale(scale: f32) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidScale(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_rejects_bad_scale() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(Viewport::new(bad, ScreenPoint::default()).is_err());
        }
        let mut vp = Viewport::default();
        assert!(vp.set_scale(-3.0).is_err());
        assert!((vp.scale() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_visible_pixels_inverts_transform() {
        let vp = Viewport::new(4.0, ScreenPoint::new(10.0, -6.0)).unwrap();
        // Pixel -3 spans screen x [-2, 2), pixel 5 spans [30, 34)
        assert_eq!(vp.visible_pixels(32, 16), (-3..6, 1..6));

        let unit = Viewport::new(1.0, ScreenPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(unit.visible_pixels(16, 8), (0..16, 0..8));
    }

    #[test]
    fn test_to_screen_scales_then_pans() {
        let vp = Viewport::new(4.0, ScreenPoint::new(10.0, 20.0)).unwrap();
        assert_eq!(vp.to_screen(ModelPoint::new(2.0, 3.0)), ScreenPoint::new(18.0, 32.0));
    }

    #[test]
    fn test_repeated_transform_does_not_compound() {
        let vp = Viewport::new(3.0, ScreenPoint::new(0.0, 0.0)).unwrap();
        let t = Triangle::new(
            ModelPoint::new(1.0, 1.0),
            ModelPoint::new(2.0, 1.0),
            ModelPoint::new(1.0, 2.0),
            Rgba::RED,
        );
        let first = vp.triangle_to_screen(&t);
        let second = vp.triangle_to_screen(&t);
        assert_eq!(first, second);
        assert_eq!(first.b, ScreenPoint::new(6.0, 3.0));
    }

    #[test]
    fn test_pan_by_accumulates() {
        let mut vp = Viewport::default();
        vp.pan_by(5.0, -10.0);
        vp.pan_by(1.0, 1.0);
        assert_eq!(vp.offset(), ScreenPoint::new(306.0, 291.0));
    }

    #[test]
    fn test_cell_size_and_order() {
        let vp = Viewport::new(2.5, ScreenPoint::default()).unwrap();
        assert_eq!(vp.cell_size(), 3);
        assert_eq!(vp.frame_buffer_order(800, 600), (320, 240));
        assert_eq!(vp.frame_buffer_order(801, 1), (321, 1));
    }

    #[test]
    fn test_grid_phase_is_non_negative() {
        let vp = Viewport::new(10.0, ScreenPoint::new(-3.0, 25.0)).unwrap();
        assert_eq!(vp.grid_phase(), ScreenPoint::new(7.0, 5.0));
    }
}

//! Pixel surface abstraction used by the renderer.

use crate::color::{mix, Rgba};
use crate::framebuffer::Framebuffer;
use crate::geometry::ScreenPoint;
use crate::render::primitives;

/// A readable, writable RGB pixel surface.
///
/// The renderer only touches pixels through this trait, so any surface the
/// host UI owns can be drawn into. Coordinates are signed screen pixels;
/// implementations clip anything outside their bounds.
pub trait Canvas {
    /// Surface size in pixels (width, height).
    fn size(&self) -> (u32, u32);

    /// Current color at a pixel, or `None` outside the surface.
    fn color_at(&self, x: i32, y: i32) -> Option<Rgba>;

    /// Overwrite a rectangle with a solid color.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba);

    /// Fill a closed polygon (even-odd rule, pixel-center sampling).
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgba);

    /// Overwrite the whole surface.
    fn clear(&mut self, color: Rgba) {
        let (width, height) = self.size();
        self.fill_rect(0, 0, width, height, color);
    }

    /// Blend a translucent color over a rectangle, weighting by `color.a`.
    fn blend_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        let Some((x, y, width, height)) = clip_rect(x, y, width, height, self.size()) else {
            return;
        };
        let t = f32::from(color.a) / 255.0;
        for py in y..y + height {
            for px in x..x + width {
                let (px, py) = (px as i32, py as i32);
                if let Some(dst) = self.color_at(px, py) {
                    let out = mix(color.to_rgb(), dst.to_rgb(), t).to_rgba();
                    self.fill_rect(px, py, 1, 1, out);
                }
            }
        }
    }
}

/// Intersect a signed rectangle with a `(width, height)` surface.
///
/// Returns the visible part as unsigned `(x, y, width, height)`, or `None`
/// when nothing is visible.
#[must_use]
pub fn clip_rect(
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    (surface_w, surface_h): (u32, u32),
) -> Option<(u32, u32, u32, u32)> {
    let x1 = i64::from(x).max(0);
    let y1 = i64::from(y).max(0);
    let x2 = (i64::from(x) + i64::from(width)).min(i64::from(surface_w));
    let y2 = (i64::from(y) + i64::from(height)).min(i64::from(surface_h));

    if x1 >= x2 || y1 >= y2 {
        return None;
    }
    Some((x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32))
}

impl Canvas for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn color_at(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get_pixel(x as u32, y as u32)
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        if let Some((x, y, w, h)) = clip_rect(x, y, width, height, Canvas::size(self)) {
            Framebuffer::fill_rect(self, x, y, w, h, color);
        }
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgba) {
        primitives::fill_polygon(self, points, color);
    }

    fn clear(&mut self, color: Rgba) {
        Framebuffer::clear(self, color);
    }

    fn blend_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        if let Some((x, y, w, h)) = clip_rect(x, y, width, height, Canvas::size(self)) {
            Framebuffer::blend_rect(self, x, y, w, h, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal canvas exercising the trait's default methods.
    struct Grid {
        width: u32,
        height: u32,
        cells: Vec<Rgba>,
    }

    impl Grid {
        fn new(width: u32, height: u32, color: Rgba) -> Self {
            Self {
                width,
                height,
                cells: vec![color; (width * height) as usize],
            }
        }
    }

    impl Canvas for Grid {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn color_at(&self, x: i32, y: i32) -> Option<Rgba> {
            if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
                return None;
            }
            Some(self.cells[(y as u32 * self.width + x as u32) as usize])
        }

        fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
            if let Some((x, y, w, h)) = clip_rect(x, y, width, height, self.size()) {
                for py in y..y + h {
                    for px in x..x + w {
                        self.cells[(py * self.width + px) as usize] = color;
                    }
                }
            }
        }

        fn fill_polygon(&mut self, _points: &[ScreenPoint], _color: Rgba) {}
    }

    #[test]
    fn test_clip_rect() {
        assert_eq!(clip_rect(-2, -2, 5, 5, (10, 10)), Some((0, 0, 3, 3)));
        assert_eq!(clip_rect(8, 8, 5, 5, (10, 10)), Some((8, 8, 2, 2)));
        assert_eq!(clip_rect(10, 0, 5, 5, (10, 10)), None);
        assert_eq!(clip_rect(-6, 0, 5, 5, (10, 10)), None);
        assert_eq!(clip_rect(i32::MAX, 0, u32::MAX, 1, (10, 10)), None);
    }

    #[test]
    fn test_default_clear_and_blend() {
        let mut grid = Grid::new(4, 4, Rgba::WHITE);
        grid.clear(Rgba::BLACK);
        assert_eq!(grid.color_at(3, 3), Some(Rgba::BLACK));

        grid.blend_rect(1, 1, 2, 2, Rgba::new(255, 255, 255, 51));
        assert_eq!(grid.color_at(1, 1), Some(Rgba::rgb(51, 51, 51)));
        assert_eq!(grid.color_at(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_framebuffer_canvas_clips_negative() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        Canvas::clear(&mut fb, Rgba::BLACK);
        Canvas::fill_rect(&mut fb, -3, -3, 5, 5, Rgba::RED);

        assert_eq!(fb.color_at(1, 1), Some(Rgba::RED));
        assert_eq!(fb.color_at(2, 2), Some(Rgba::BLACK));
        assert_eq!(fb.color_at(-1, 0), None);
    }
}

//! Primitive rasterization shared by canvas implementations.

use crate::color::Rgba;
use crate::geometry::ScreenPoint;
use crate::render::canvas::Canvas;

/// Fill a closed polygon with a flat color using an even-odd scanline fill.
///
/// A pixel is filled when its center lies inside the polygon. Each row is
/// written as horizontal spans through [`Canvas::fill_rect`]; rows and
/// spans outside the canvas are skipped. Fewer than three points, or any
/// non-finite coordinate, draws nothing.
pub fn fill_polygon<C: Canvas + ?Sized>(canvas: &mut C, points: &[ScreenPoint], color: Rgba) {
    if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return;
    }

    let (width, height) = canvas.size();
    let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

    // Rows whose centers (y + 0.5) fall in [min_y, max_y)
    let first_row = ((min_y - 0.5).ceil() as i64).max(0);
    let last_row = ((max_y - 0.5).ceil() as i64).min(i64::from(height));

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for row in first_row..last_row {
        let yc = row as f32 + 0.5;

        crossings.clear();
        for (i, p0) in points.iter().enumerate() {
            let p1 = points[(i + 1) % points.len()];
            let spans_row = (p0.y <= yc && yc < p1.y) || (p1.y <= yc && yc < p0.y);
            if spans_row {
                let t = (yc - p0.y) / (p1.y - p0.y);
                crossings.push(p0.x + t * (p1.x - p0.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            // Pixels whose centers (x + 0.5) fall in [left, right)
            let x_start = ((pair[0] - 0.5).ceil() as i64).max(0);
            let x_end = ((pair[1] - 0.5).ceil() as i64).min(i64::from(width));
            if x_start < x_end {
                canvas.fill_rect(x_start as i32, row as i32, (x_end - x_start) as u32, 1, color);
            }
        }
    }
}

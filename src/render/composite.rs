//! Compositing coverage layers over a canvas backdrop.

use crate::color::{mix, Rgba};
use crate::geometry::ModelPoint;
use crate::render::canvas::Canvas;
use crate::render::sampler::CoverageLayer;
use crate::viewport::Viewport;

/// Blend `fill` into `canvas` wherever `layer` has coverage.
///
/// For each covered model pixel the backdrop is read at the center of its
/// zoomed cell, mixed with `fill` by the coverage fraction, and the result is
/// written as a `ceil(scale)`-sized square at the cell's top-left corner.
/// The read always precedes the write for the same cell. Cells whose center
/// lies outside the canvas are skipped.
///
/// Returns the number of cells written.
pub fn composite_layer<C: Canvas + ?Sized>(
    layer: &CoverageLayer,
    fill: Rgba,
    viewport: &Viewport,
    canvas: &mut C,
) -> usize {
    let fill = fill.to_rgb();
    let cell = viewport.cell_size();
    let mut written = 0;

    for (px, py, fraction) in layer.covered_pixels() {
        let center = viewport.to_screen(ModelPoint::new(px as f32 + 0.5, py as f32 + 0.5));
        let Some(backdrop) = canvas.color_at(center.x.floor() as i32, center.y.floor() as i32) else {
            continue;
        };

        let color = mix(fill, backdrop.to_rgb(), fraction).to_rgba();
        let corner = viewport.to_screen(ModelPoint::new(px as f32, py as f32));
        canvas.fill_rect(corner.x.ceil() as i32, corner.y.ceil() as i32, cell, cell, color);
        written += 1;
    }

    written
}

//! Supersampled coverage estimation.
//!
//! Every output pixel is probed on a regular `rows x cols` grid of sub-pixel
//! samples anchored at the pixel's top-left corner. The number of samples that
//! land inside the triangle (edges inclusive) is the pixel's coverage.
//!
//! Cost is `O(bounding box area x rows x cols)`, so coverage is only ever
//! computed over a triangle's own bounding box, clipped to what can be seen.

use std::ops::Range;

use log::warn;
use trueno::Vector;

use crate::error::{Error, Result};
use crate::geometry::{Model, Sample, SamplePoint, Triangle};

/// Upper bound on samples per pixel (a 256x256 grid).
pub const MAX_SAMPLES: u32 = 1 << 16;

/// Upper bound on pixels in one coverage layer.
const MAX_LAYER_PIXELS: usize = 1 << 26;

/// Sub-pixel sampling grid, configured directly as rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
    rows: u32,
    cols: u32,
}

impl SampleGrid {
    /// Create a grid of `rows x cols` samples per pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSampleGrid`] if either dimension is zero or
    /// the grid has more than [`MAX_SAMPLES`] samples.
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        match rows.checked_mul(cols) {
            Some(total) if total > 0 && total <= MAX_SAMPLES => Ok(Self { rows, cols }),
            _ => Err(Error::InvalidSampleGrid { rows, cols }),
        }
    }

    /// Square grid derived from a total sample count.
    ///
    /// The side is `floor(sqrt(count))` (at least 1), so counts that are not
    /// perfect squares are truncated: 128 gives an 11x11 grid of 121 samples.
    /// Counts above [`MAX_SAMPLES`] are capped.
    #[must_use]
    pub fn from_sample_count(count: u32) -> Self {
        let side = (f64::from(count.min(MAX_SAMPLES)).sqrt().floor() as u32).max(1);
        Self {
            rows: side,
            cols: side,
        }
    }

    /// Sample rows per pixel.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Sample columns per pixel.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Samples per pixel.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.rows * self.cols
    }

    /// Stretch a model-space triangle so that one unit is one sample.
    #[must_use]
    pub fn to_sample_space(&self, triangle: &Triangle<Model>) -> Triangle<Sample> {
        let (sx, sy) = (self.cols as f32, self.rows as f32);
        triangle.map(|p| p.scale_into(sx, sy))
    }

    /// Sample positions for model pixel `(px, py)`, in sample space.
    pub fn sample_points(&self, px: i32, py: i32) -> impl Iterator<Item = SamplePoint> {
        let (rows, cols) = (self.rows, self.cols);
        let base_x = px as f32 * cols as f32;
        let base_y = py as f32 * rows as f32;
        (0..cols).flat_map(move |ix| {
            (0..rows).map(move |iy| SamplePoint::new(base_x + ix as f32, base_y + iy as f32))
        })
    }
}

impl Default for SampleGrid {
    /// 11x11, the effective grid of the historical 128-sample setting.
    fn default() -> Self {
        Self::from_sample_count(128)
    }
}

/// Number of samples of pixel `(px, py)` inside `triangle`.
///
/// `triangle` must already be in sample space (see
/// [`SampleGrid::to_sample_space`]). Degenerate triangles cover nothing.
#[must_use]
pub fn pixel_coverage(triangle: &Triangle<Sample>, px: i32, py: i32, grid: SampleGrid) -> u32 {
    grid.sample_points(px, py)
        .filter(|&p| triangle.contains(p))
        .count() as u32
}

/// Per-pixel sample counts for one triangle over its bounding box.
///
/// This is the intermediate foreground buffer: together with the triangle's
/// color it fully describes what the triangle contributes to a frame, with no
/// reference to any canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageLayer {
    origin_x: i32,
    origin_y: i32,
    width: u32,
    height: u32,
    counts: Vec<u32>,
    total: u32,
}

impl CoverageLayer {
    /// Estimate coverage for every pixel in the triangle's pixel span.
    ///
    /// The layer covers the whole bounding box; use [`Self::rasterize_in`]
    /// when only part of the model plane is visible.
    #[must_use]
    pub fn rasterize(triangle: &Triangle<Model>, grid: SampleGrid) -> Self {
        Self::rasterize_in(triangle, grid, (i32::MIN..i32::MAX, i32::MIN..i32::MAX))
    }

    /// Estimate coverage for the triangle's pixel span intersected with
    /// `clip` (model pixel columns and rows).
    ///
    /// A span of more than 2^26 pixels yields an empty layer.
    #[must_use]
    pub fn rasterize_in(
        triangle: &Triangle<Model>,
        grid: SampleGrid,
        (clip_x, clip_y): (Range<i32>, Range<i32>),
    ) -> Self {
        let (span_x, span_y) = triangle.bounds().pixel_span();
        let xs = intersect(span_x, clip_x);
        let ys = intersect(span_y, clip_y);

        let len = match xs.len().checked_mul(ys.len()) {
            Some(len) if len <= MAX_LAYER_PIXELS => len,
            _ => {
                warn!("coverage span {:?} x {:?} too large, skipping", xs, ys);
                return Self::empty(xs.start, ys.start, grid);
            }
        };
        let width = xs.len() as u32;
        let height = ys.len() as u32;
        let mut counts = vec![0u32; len];

        let sampled = grid.to_sample_space(triangle);
        if !sampled.is_degenerate() {
            for (row, py) in ys.clone().enumerate() {
                for (col, px) in xs.clone().enumerate() {
                    counts[row * width as usize + col] = pixel_coverage(&sampled, px, py, grid);
                }
            }
        }

        Self {
            origin_x: xs.start,
            origin_y: ys.start,
            width,
            height,
            counts,
            total: grid.total(),
        }
    }

    fn empty(origin_x: i32, origin_y: i32, grid: SampleGrid) -> Self {
        Self {
            origin_x,
            origin_y,
            width: 0,
            height: 0,
            counts: Vec::new(),
            total: grid.total(),
        }
    }

    /// Top-left model pixel of the layer.
    #[must_use]
    pub const fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Layer size in model pixels.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Samples per pixel.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Covered samples at model pixel `(px, py)`; zero outside the layer.
    #[must_use]
    pub fn coverage_at(&self, px: i32, py: i32) -> u32 {
        let col = i64::from(px) - i64::from(self.origin_x);
        let row = i64::from(py) - i64::from(self.origin_y);
        if col < 0 || row < 0 || col >= i64::from(self.width) || row >= i64::from(self.height) {
            return 0;
        }
        self.counts[(row as usize) * (self.width as usize) + col as usize]
    }

    /// True when no pixel has any coverage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Coverage fractions in row-major layer order.
    ///
    /// Normalized with a trueno vector multiply; falls back to scalar
    /// division if the vector op is unavailable.
    #[must_use]
    pub fn fractions(&self) -> Vec<f32> {
        let n = self.counts.len();
        let inv_total = 1.0 / self.total as f32;
        let counts: Vec<f32> = self.counts.iter().map(|&c| c as f32).collect();

        if n > 0 {
            let scaled = Vector::from_vec(counts.clone()).mul(&Vector::from_vec(vec![inv_total; n]));
            if let Ok(result) = scaled {
                return result.as_slice().to_vec();
            }
        }
        counts.iter().map(|&c| c * inv_total).collect()
    }

    /// Pixels with non-zero coverage as `(px, py, fraction)`.
    pub fn covered_pixels(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        let width = self.width as usize;
        self.fractions()
            .into_iter()
            .zip(self.counts.iter())
            .enumerate()
            .filter(|(_, (_, count))| **count > 0)
            .map(move |(i, (fraction, _))| {
                let px = self.origin_x + (i % width) as i32;
                let py = self.origin_y + (i / width) as i32;
                (px, py, fraction)
            })
    }
}

fn intersect(a: Range<i32>, b: Range<i32>) -> Range<i32> {
    let start = a.start.max(b.start);
    start..a.end.min(b.end).max(start)
}

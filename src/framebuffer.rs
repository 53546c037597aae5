//! Core framebuffer for pixel rendering.
//!
//! Provides a SIMD-aligned RGBA pixel buffer. It is the reference
//! [`Canvas`](crate::render::Canvas) implementation used by the CLI and tests.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::Backend;

/// Alignment for SIMD operations (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// SIMD-aligned framebuffer for efficient pixel operations.
///
/// Rows are padded to a multiple of 64 bytes so that row starts stay aligned
/// for wide SIMD loads.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order.
    /// Each pixel is 4 bytes: [R, G, B, A].
    pixels: Vec<u8>,
    /// Stride in bytes (may include padding for alignment).
    stride: usize,
}

impl Framebuffer {
    /// Create a new framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_pixel::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);

        let size = stride * (height as usize);

        let mut pixels = Vec::with_capacity(size + SIMD_ALIGNMENT);
        pixels.resize(size, 0);

        Ok(Self {
            width,
            height,
            pixels,
            stride,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Clear the framebuffer to a solid color.
    ///
    /// Rows are filled from a 64-byte (16 pixel) pattern so the copy
    /// auto-vectorizes.
    pub fn clear(&mut self, color: Rgba) {
        let [r, g, b, a] = color.to_array();

        let pattern: [u8; 64] = {
            let mut p = [0u8; 64];
            for px in p.chunks_exact_mut(4) {
                px.copy_from_slice(&[r, g, b, a]);
            }
            p
        };

        for y in 0..self.height {
            let row_start = (y as usize) * self.stride;
            let row_end = row_start + (self.width as usize) * 4;
            let row = &mut self.pixels[row_start..row_end];

            let mut chunks = row.chunks_exact_mut(64);
            for chunk in &mut chunks {
                chunk.copy_from_slice(&pattern);
            }
            for px in chunks.into_remainder().chunks_exact_mut(4) {
                px.copy_from_slice(&[r, g, b, a]);
            }
        }
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgba = color.to_array();
        let rect_width = (x2 - x1) as usize;

        for row_y in y1..y2 {
            let row_start = (row_y as usize) * self.stride + (x1 as usize) * 4;
            let row = &mut self.pixels[row_start..row_start + rect_width * 4];

            for chunk in row.chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Alpha-blend a color over a rectangular region.
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn blend_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        for py in y.min(self.height)..y2 {
            for px in x.min(self.width)..x2 {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Blend a color at a specific pixel coordinate using alpha blending.
    ///
    /// Uses the standard "over" compositing operation:
    /// `out = src * src_alpha + dst * dst_alpha * (1 - src_alpha)`
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        if out_a > 0.0 {
            let blend = |src: u8, dst: u8| -> u8 {
                let src_f = f32::from(src) / 255.0;
                let dst_f = f32::from(dst) / 255.0;
                let out = (src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a;
                (out * 255.0).round().clamp(0.0, 255.0) as u8
            };

            self.pixels[idx] = blend(color.r, self.pixels[idx]);
            self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
            self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
            self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
        }
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }

    /// Get pixel data as a compact buffer without stride padding.
    ///
    /// This is useful for encoding to formats like PNG that expect
    /// tightly-packed pixel data.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;

        if self.stride == row_bytes {
            return self.pixels[..row_bytes * (self.height as usize)].to_vec();
        }

        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height {
            let start = (y as usize) * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }

    /// Get the selected SIMD backend.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }
}

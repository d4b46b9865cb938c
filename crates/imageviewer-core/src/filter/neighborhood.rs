//! Filters that read a window of pixels around each output pixel.
//!
//! Windows are truncated at the image border: only in-bounds pixels
//! contribute, so corner pixels average over four samples instead of nine.

use super::Filter;
use crate::buffer::{PixelBuffer, Rgb};

/// Default block edge length for [`Pixelize`].
pub const PIXELIZE_BLOCK_SIZE: u32 = 5;

/// 3x3 box blur.
#[derive(Debug, Clone, Copy, Default)]
pub struct Smooth;

impl Filter for Smooth {
    fn name(&self) -> &str {
        "Smooth"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        let source = buffer.clone();
        for y in 0..source.height() {
            for x in 0..source.width() {
                let mut sum = [0u32; 3];
                let mut count = 0u32;
                for px in window(&source, x, y) {
                    sum[0] += px.r as u32;
                    sum[1] += px.g as u32;
                    sum[2] += px.b as u32;
                    count += 1;
                }
                let mean = Rgb::new(
                    (sum[0] / count) as u8,
                    (sum[1] / count) as u8,
                    (sum[2] / count) as u8,
                );
                buffer.put_pixel(x, y, mean);
            }
        }
    }
}

/// Dark lines where the local 3x3 channel spread is large.
///
/// Each channel becomes `255 - (max - min)` over the window, then the pixel is
/// reduced to gray. Flat regions turn white.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetection;

impl Filter for EdgeDetection {
    fn name(&self) -> &str {
        "Edge Detection"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        let source = buffer.clone();
        for y in 0..source.height() {
            for x in 0..source.width() {
                let mut lo = [u8::MAX; 3];
                let mut hi = [u8::MIN; 3];
                for px in window(&source, x, y) {
                    for (i, c) in px.channels().into_iter().enumerate() {
                        lo[i] = lo[i].min(c);
                        hi[i] = hi[i].max(c);
                    }
                }
                let edge = Rgb::new(
                    255 - (hi[0] - lo[0]),
                    255 - (hi[1] - lo[1]),
                    255 - (hi[2] - lo[2]),
                );
                buffer.put_pixel(x, y, Rgb::gray(edge.average()));
            }
        }
    }
}

/// Mosaic of square blocks, each filled with its top-left pixel's color.
#[derive(Debug, Clone, Copy)]
pub struct Pixelize {
    block_size: u32,
}

impl Pixelize {
    /// A pixelize filter with the given block edge length (at least 1).
    pub fn new(block_size: u32) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }
}

impl Default for Pixelize {
    fn default() -> Self {
        Self::new(PIXELIZE_BLOCK_SIZE)
    }
}

impl Filter for Pixelize {
    fn name(&self) -> &str {
        "Pixelize"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        let (width, height) = buffer.dimensions();
        let step = self.block_size as usize;
        for by in (0..height).step_by(step) {
            for bx in (0..width).step_by(step) {
                let color = buffer.pixel(bx, by);
                for y in by..(by + self.block_size).min(height) {
                    for x in bx..(bx + self.block_size).min(width) {
                        buffer.put_pixel(x, y, color);
                    }
                }
            }
        }
    }
}

/// In-bounds pixels of the 3x3 window centred on `(x, y)`.
fn window(buffer: &PixelBuffer, x: u32, y: u32) -> impl Iterator<Item = Rgb> + '_ {
    let (width, height) = buffer.dimensions();
    let xs = x.saturating_sub(1)..=(x + 1).min(width - 1);
    let ys = y.saturating_sub(1)..=(y + 1).min(height - 1);
    ys.flat_map(move |ny| xs.clone().map(move |nx| buffer.pixel(nx, ny)))
}

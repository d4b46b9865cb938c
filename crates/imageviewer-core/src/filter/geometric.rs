//! Filters that move pixels rather than recolor them.
//!
//! Both filters use inverse mapping: for each output pixel, compute which
//! source pixel it comes from and copy that color.

use super::Filter;
use crate::buffer::PixelBuffer;

/// Default radial exponent for [`FishEye`].
pub const FISH_EYE_GAMMA: f64 = 1.6;

/// Horizontal flip: `pixel(x, y) <- original(width - 1 - x, y)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mirror;

impl Filter for Mirror {
    fn name(&self) -> &str {
        "Mirror"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        let width = buffer.width();
        for y in 0..buffer.height() {
            for x in 0..width / 2 {
                let left = buffer.pixel(x, y);
                let right = buffer.pixel(width - 1 - x, y);
                buffer.put_pixel(x, y, right);
                buffer.put_pixel(width - 1 - x, y, left);
            }
        }
    }
}

/// Barrel distortion magnifying the image centre.
///
/// Offsets from the centre are normalized by the half extents. A point at
/// normalized radius `r` samples the source at radius `r^gamma` along the
/// same direction, so the inscribed ellipse (`r = 1`) stays fixed, the inside
/// bulges outward and the corners are pulled in from beyond the border.
/// Source coordinates are rounded to the nearest pixel and clamped into
/// bounds.
#[derive(Debug, Clone, Copy)]
pub struct FishEye {
    gamma: f64,
}

impl FishEye {
    /// A fish eye with the given exponent. Values above 1 magnify the centre.
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }

    /// Source coordinate sampled for output `(x, y)`.
    fn source_of(&self, x: u32, y: u32, width: u32, height: u32) -> (u32, u32) {
        let (cx, cy) = ((width as f64 - 1.0) / 2.0, (height as f64 - 1.0) / 2.0);
        let (hx, hy) = (width as f64 / 2.0, height as f64 / 2.0);
        let dx = (x as f64 - cx) / hx;
        let dy = (y as f64 - cy) / hy;
        let r = dx.hypot(dy);
        if r == 0.0 {
            return (x, y);
        }

        let scale = r.powf(self.gamma - 1.0);
        let sx = (cx + dx * scale * hx).round().clamp(0.0, width as f64 - 1.0);
        let sy = (cy + dy * scale * hy).round().clamp(0.0, height as f64 - 1.0);
        (sx as u32, sy as u32)
    }
}

impl Default for FishEye {
    fn default() -> Self {
        Self::new(FISH_EYE_GAMMA)
    }
}

impl Filter for FishEye {
    fn name(&self) -> &str {
        "Fish Eye"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        let source = buffer.clone();
        let (width, height) = source.dimensions();
        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = self.source_of(x, y, width, height);
                buffer.put_pixel(x, y, source.pixel(sx, sy));
            }
        }
    }
}

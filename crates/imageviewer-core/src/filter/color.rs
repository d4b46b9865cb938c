//! Per-pixel color filters.
//!
//! Each filter here maps every pixel independently of its neighbours.

use super::Filter;
use crate::buffer::{PixelBuffer, Rgb};

/// Channel multiplier used by [`Darker`].
pub const DARKER_FACTOR: f64 = 0.7;

/// Channel multiplier used by [`Lighter`].
pub const LIGHTER_FACTOR: f64 = 1.4;

/// Channel values at or above this become 255 under [`Threshold`] and are
/// mirrored under [`Solarize`].
pub const MIDPOINT: u8 = 128;

/// Scales each channel by [`DARKER_FACTOR`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Darker;

impl Filter for Darker {
    fn name(&self) -> &str {
        "Darker"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        buffer.map_pixels(|px| px.map(|c| scale_channel(c, DARKER_FACTOR)));
    }
}

/// Scales each channel by [`LIGHTER_FACTOR`], saturating at 255.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lighter;

impl Filter for Lighter {
    fn name(&self) -> &str {
        "Lighter"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        buffer.map_pixels(|px| px.map(|c| scale_channel(c, LIGHTER_FACTOR)));
    }
}

/// Per channel: 255 at or above [`MIDPOINT`], otherwise 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Threshold;

impl Filter for Threshold {
    fn name(&self) -> &str {
        "Threshold"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        buffer.map_pixels(|px| px.map(|c| if c >= MIDPOINT { 255 } else { 0 }));
    }
}

/// Photographic negative: `c -> 255 - c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

impl Filter for Invert {
    fn name(&self) -> &str {
        "Invert"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        buffer.map_pixels(|px| px.map(|c| 255 - c));
    }
}

/// Inverts only the bright half of each channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solarize;

impl Filter for Solarize {
    fn name(&self) -> &str {
        "Solarize"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        buffer.map_pixels(|px| px.map(|c| if c < MIDPOINT { c } else { 255 - c }));
    }
}

/// Replaces each pixel with the mean of its channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl Filter for Grayscale {
    fn name(&self) -> &str {
        "Grayscale"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        buffer.map_pixels(|px| Rgb::gray(px.average()));
    }
}

/// Classic sepia color matrix. Lossy: not idempotent and not invertible.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sepia;

impl Filter for Sepia {
    fn name(&self) -> &str {
        "Sepia"
    }

    fn apply(&self, buffer: &mut PixelBuffer) {
        buffer.map_pixels(sepia_tone);
    }
}

/// Apply the sepia matrix to one color.
///
/// ```text
/// R' = 0.393R + 0.769G + 0.189B
/// G' = 0.349R + 0.686G + 0.168B
/// B' = 0.272R + 0.534G + 0.131B
/// ```
///
/// Each result is truncated toward zero, then clamped to 0-255.
pub fn sepia_tone(px: Rgb) -> Rgb {
    let (r, g, b) = (px.r as f64, px.g as f64, px.b as f64);
    Rgb::new(
        clamp_channel(0.393 * r + 0.769 * g + 0.189 * b),
        clamp_channel(0.349 * r + 0.686 * g + 0.168 * b),
        clamp_channel(0.272 * r + 0.534 * g + 0.131 * b),
    )
}

#[inline]
fn scale_channel(c: u8, factor: f64) -> u8 {
    clamp_channel(c as f64 * factor)
}

#[inline]
fn clamp_channel(value: f64) -> u8 {
    value.trunc().clamp(0.0, 255.0) as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================

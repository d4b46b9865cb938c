//! The in-memory RGB raster that every editing operation works on.
//!
//! Pixels are stored row-major as a flat byte vector (3 bytes per pixel),
//! which keeps conversion to and from `image::RgbImage` a move rather than a
//! copy. Width and height are always non-zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::EditError;

/// A single 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value on all three channels.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Apply `f` to each channel independently.
    #[inline]
    pub fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Unweighted channel mean, truncated.
    #[inline]
    pub fn average(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}

/// Out-of-bounds pixel access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
pub struct IndexError {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A width x height grid of RGB pixels.
///
/// Cloning is a deep copy; two buffers never share pixel storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self, EditError> {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create a buffer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, EditError> {
        let len = check_dimensions(width, height)?;
        let pixels = color.channels().into_iter().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing RGB bytes without copying them.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Image dimensions in pixels
    /// * `pixels` - Row-major RGB bytes, 3 per pixel
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidDimension` if a dimension is zero or the
    /// byte length overflows `usize`, and `EditError::InvalidPixelData` if
    /// `pixels.len()` is not `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        let expected = check_dimensions(width, height)?;
        if pixels.len() != expected {
            return Err(EditError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer by evaluating `f` at every coordinate.
    pub fn from_fn(
        width: u32,
        height: u32,
        f: impl FnMut(u32, u32) -> Rgb,
    ) -> Result<Self, EditError> {
        check_dimensions(width, height)?;
        Ok(Self::generate(width, height, f))
    }

    /// Build a buffer from rows of colors. All rows must have equal length.
    pub fn from_rows(rows: &[Vec<Rgb>]) -> Result<Self, EditError> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        let expected = check_dimensions(width, height)?;

        let mut pixels = Vec::with_capacity(expected);
        for row in rows {
            if row.len() as u32 != width {
                return Err(EditError::InvalidPixelData {
                    expected,
                    actual: row.len() * 3,
                });
            }
            pixels.extend(row.iter().flat_map(|color| color.channels()));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Crate-internal constructor for callers that already checked the
    /// dimensions (transforms derive them from a valid buffer).
    pub(crate) fn generate(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        debug_assert!(width > 0 && height > 0, "degenerate {width}x{height} buffer");
        let mut pixels = Vec::with_capacity(byte_len(width, height).unwrap_or(0));
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y).channels());
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel data in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Read the pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<Rgb, IndexError> {
        self.check_bounds(x, y)?;
        Ok(self.pixel(x, y))
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) -> Result<(), IndexError> {
        self.check_bounds(x, y)?;
        self.put_pixel(x, y, color);
        Ok(())
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    /// Replace every pixel with `f(pixel)`.
    pub fn map_pixels(&mut self, f: impl Fn(Rgb) -> Rgb) {
        for px in self.pixels.chunks_exact_mut(3) {
            let out = f(Rgb::new(px[0], px[1], px[2]));
            px.copy_from_slice(&out.channels());
        }
    }

    /// Raw RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Convert from an `image::RgbImage`, taking ownership of its storage.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, EditError> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }

    /// Copy into an `image::RgbImage` for encoding.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.pixel(x, y).channels())
        })
    }

    /// Unchecked read for algorithms iterating within `0..width, 0..height`.
    /// Indexing past the end of storage still panics.
    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(self.contains(x, y), "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    #[inline]
    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        debug_assert!(self.contains(x, y), "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        self.pixels[i..i + 3].copy_from_slice(&color.channels());
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), IndexError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(IndexError {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Validate dimensions and return the byte length of the pixel data.
///
/// Zero sizes and sizes whose byte length does not fit in `usize` (on
/// wasm32, anything past 2^32 bytes) are rejected.
fn check_dimensions(width: u32, height: u32) -> Result<usize, EditError> {
    match byte_len(width, height) {
        Some(len) if width > 0 && height > 0 => Ok(len),
        _ => Err(EditError::InvalidDimension {
            width: width as u64,
            height: height as u64,
        }),
    }
}

#[inline]
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(3)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

//! Quarter-turn rotations.
//!
//! Both rotations swap width and height and are exact: no interpolation, every
//! source pixel lands on exactly one output pixel.
//!
//! For a `w x h` source:
//! ```text
//! left  (90° CCW): output(y, w - 1 - x) = input(x, y)
//! right (90° CW):  output(h - 1 - y, x) = input(x, y)
//! ```

use crate::buffer::PixelBuffer;

/// Rotate 90 degrees counter-clockwise.
pub fn rotate_left(image: &PixelBuffer) -> PixelBuffer {
    let (width, height) = image.dimensions();
    // Inverse of output(y, w-1-x) = input(x, y)
    PixelBuffer::generate(height, width, |ox, oy| image.pixel(width - 1 - oy, ox))
}

/// Rotate 90 degrees clockwise.
pub fn rotate_right(image: &PixelBuffer) -> PixelBuffer {
    let (width, height) = image.dimensions();
    // Inverse of output(h-1-y, x) = input(x, y)
    PixelBuffer::generate(height, width, |ox, oy| image.pixel(oy, height - 1 - ox))
}

/// Rotate 180 degrees.
pub fn rotate_half(image: &PixelBuffer) -> PixelBuffer {
    let (width, height) = image.dimensions();
    PixelBuffer::generate(width, height, |x, y| {
        image.pixel(width - 1 - x, height - 1 - y)
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

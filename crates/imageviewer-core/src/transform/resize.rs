//! Factor-of-two resizing.
//!
//! Both directions use nearest-neighbour sampling, so enlarging and then
//! shrinking restores the original exactly.

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Double both dimensions, replicating each pixel into a 2x2 block.
///
/// # Errors
///
/// Returns `EditError::InvalidDimension` if a doubled dimension overflows `u32`.
pub fn make_larger(image: &PixelBuffer) -> Result<PixelBuffer, EditError> {
    let (width, height) = larger_dimensions(image)?;
    Ok(PixelBuffer::generate(width, height, |x, y| {
        image.pixel(x / 2, y / 2)
    }))
}

/// Halve both dimensions (integer division), keeping every other row and column.
///
/// Output `(x, y)` is source `(2x, 2y)`; there is no averaging. On odd
/// dimensions the last row or column is dropped.
///
/// # Errors
///
/// Returns `EditError::InvalidDimension` if either dimension is below 2,
/// since halving would produce an empty image.
pub fn make_smaller(image: &PixelBuffer) -> Result<PixelBuffer, EditError> {
    let (width, height) = smaller_dimensions(image)?;
    Ok(PixelBuffer::generate(width, height, |x, y| {
        image.pixel(x * 2, y * 2)
    }))
}

/// Dimensions [`make_larger`] would produce.
pub fn larger_dimensions(image: &PixelBuffer) -> Result<(u32, u32), EditError> {
    let (width, height) = image.dimensions();
    match (width.checked_mul(2), height.checked_mul(2)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(EditError::InvalidDimension {
            width: width as u64 * 2,
            height: height as u64 * 2,
        }),
    }
}

/// Dimensions [`make_smaller`] would produce.
pub fn smaller_dimensions(image: &PixelBuffer) -> Result<(u32, u32), EditError> {
    let (width, height) = (image.width() / 2, image.height() / 2);
    if width == 0 || height == 0 {
        return Err(EditError::InvalidDimension {
            width: width as u64,
            height: height as u64,
        });
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn two_by_two() -> PixelBuffer {
        PixelBuffer::from_rows(&[
            vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)],
            vec![Rgb::new(0, 0, 255), Rgb::new(255, 255, 255)],
        ])
        .unwrap()
    }

    #[test]
    fn test_make_larger_replicates_blocks() {
        let src = two_by_two();
        let big = make_larger(&src).unwrap();
        assert_eq!(big.dimensions(), (4, 4));

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(
                    big.get(x, y).unwrap(),
                    src.get(x / 2, y / 2).unwrap(),
                    "pixel ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_larger_then_smaller_scenario() {
        let src = two_by_two();
        let big = make_larger(&src).unwrap();
        let back = make_smaller(&big).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn test_make_smaller_decimates() {
        let src = PixelBuffer::from_fn(4, 4, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
        let small = make_smaller(&src).unwrap();
        assert_eq!(small.dimensions(), (2, 2));
        assert_eq!(small.get(1, 1).unwrap(), Rgb::new(2, 2, 0));
        assert_eq!(small.get(1, 0).unwrap(), Rgb::new(2, 0, 0));
    }

    #[test]
    fn test_make_smaller_odd_dimensions_truncate() {
        let src = PixelBuffer::from_fn(5, 3, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
        let small = make_smaller(&src).unwrap();
        assert_eq!(small.dimensions(), (2, 1));
        assert_eq!(small.get(1, 0).unwrap(), Rgb::new(2, 0, 0));
    }

    #[test]
    fn test_make_smaller_one_pixel_fails() {
        let src = PixelBuffer::new(1, 1).unwrap();
        assert_eq!(
            make_smaller(&src).unwrap_err(),
            EditError::InvalidDimension {
                width: 0,
                height: 0
            }
        );
    }

    #[test]
    fn test_make_smaller_thin_strip_fails() {
        let src = PixelBuffer::new(40, 1).unwrap();
        assert!(matches!(
            make_smaller(&src),
            Err(EditError::InvalidDimension { width: 20, height: 0 })
        ));
    }

    #[test]
    fn test_larger_dimensions() {
        let src = PixelBuffer::new(1, 1).unwrap();
        assert_eq!(larger_dimensions(&src).unwrap(), (2, 2));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

//! Image encoding for saving the current image.
//!
//! Encoders come from the `image` crate. The output format is chosen from
//! the destination file extension.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;

use super::{EncodeError, OutputFormat};
use crate::buffer::PixelBuffer;

/// Quality used when saving JPEG files.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a buffer into the bytes of `format`.
///
/// # Arguments
///
/// * `buffer` - The image to encode
/// * `format` - Target format; JPEG uses `DEFAULT_JPEG_QUALITY`
///
/// # Returns
///
/// The complete encoded file.
///
/// # Errors
///
/// Returns `EncodeError::EncodingFailed` if the encoder rejects the image.
pub fn encode_image(buffer: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(buffer, DEFAULT_JPEG_QUALITY),
        OutputFormat::Png => {
            let mut out = Cursor::new(Vec::new());
            write_with(PngEncoder::new(&mut out), buffer)?;
            Ok(out.into_inner())
        }
        OutputFormat::Bmp => {
            let mut out = Cursor::new(Vec::new());
            write_with(BmpEncoder::new(&mut out), buffer)?;
            Ok(out.into_inner())
        }
    }
}

/// Encode a buffer as JPEG.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let quality = quality.clamp(1, 100);
    let mut out = Cursor::new(Vec::new());
    write_with(JpegEncoder::new_with_quality(&mut out, quality), buffer)?;
    Ok(out.into_inner())
}

/// Encode and write a buffer to `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for an extension other than
/// png, jpg, jpeg or bmp, and `EncodeError::IoError` if the write fails.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<(), EncodeError> {
    let format = OutputFormat::from_path(path)?;
    let bytes = encode_image(buffer, format)?;
    fs::write(path, &bytes)
        .map_err(|e| EncodeError::IoError(format!("{}: {}", path.display(), e)))?;
    debug!(
        "wrote {} ({} bytes, {:?})",
        path.display(),
        bytes.len(),
        format
    );
    Ok(())
}

fn write_with(encoder: impl ImageEncoder, buffer: &PixelBuffer) -> Result<(), EncodeError> {
    encoder
        .write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
}

//! Error and format types shared by the decoder and encoder.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an image could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes are not in any format the decoder knows.
    #[error("The file was not in a recognized image file format.")]
    InvalidFormat,

    /// Recognized format, but the data is truncated or malformed.
    #[error("Corrupt image data: {0}")]
    CorruptedFile(String),

    #[error("Could not read image: {0}")]
    IoError(String),
}

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// No encoder for this file extension.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The encoder rejected the data.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Could not write image: {0}")]
    IoError(String),
}

/// Output formats the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Pick a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "bmp" => Some(OutputFormat::Bmp),
            _ => None,
        }
    }

    /// Pick a format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| EncodeError::UnsupportedFormat(ext.to_string()))
    }
}

/// EXIF `Orientation` tag, values 1 through 8.
///
/// Names describe what must be done to the stored pixels to display them
/// upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Stored upright.
    #[default]
    Normal = 1,
    /// Mirrored left to right.
    FlipHorizontal = 2,
    /// Upside down.
    Rotate180 = 3,
    /// Mirrored top to bottom.
    FlipVertical = 4,
    /// Mirrored across the main diagonal.
    Transpose = 5,
    /// Needs a quarter turn clockwise.
    Rotate90CW = 6,
    /// Mirrored across the anti-diagonal.
    Transverse = 7,
    /// Needs a quarter turn counter-clockwise.
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    /// Out-of-range tag values are treated as upright.
    fn from(tag: u32) -> Self {
        match tag {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

//! Error type shared by the editing session and its operations.

use thiserror::Error;

use crate::buffer::IndexError;
use crate::codec::{DecodeError, EncodeError};

/// Errors reported by editing operations.
///
/// Every variant leaves the session exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A pixel coordinate fell outside the image.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Undo or redo was requested with nothing on the stack.
    #[error("Nothing to undo or redo")]
    EmptyHistory,

    /// No filter is registered under this name.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// A filter with this name is already registered.
    #[error("Filter already registered: {0}")]
    DuplicateFilter(String),

    /// The operation needs a current image.
    #[error("No image loaded.")]
    NoImageLoaded,

    /// The operation would produce a degenerate or oversized image.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u64, height: u64 },

    /// Raw pixel data does not match the stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Reload was requested but the current image was not opened from a file.
    #[error("No file to reload")]
    NoSourcePath,

    /// Slideshow display time must be positive.
    #[error("Slide display time must be greater than zero")]
    InvalidInterval,

    /// A slideshow was started without any images.
    #[error("There are no images to display.")]
    EmptySlideshow,
}

impl EditError {
    /// True for failures of the codec collaborator rather than the editor.
    pub fn is_codec_error(&self) -> bool {
        matches!(self, EditError::Decode(_) | EditError::Encode(_))
    }
}

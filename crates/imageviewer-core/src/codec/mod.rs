//! File codec collaborator for ImageViewer.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, BMP and GIF images into a [`PixelBuffer`]
//! - Applying EXIF orientation on decode
//! - Encoding a [`PixelBuffer`] to PNG, JPEG or BMP
//!
//! Alpha channels are dropped on decode; the editor only handles RGB.
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

mod decode;
mod encode;
mod types;

pub use decode::{decode_image, get_orientation, load_image};
pub use encode::{encode_image, encode_jpeg, save_image, DEFAULT_JPEG_QUALITY};
pub use types::{DecodeError, EncodeError, Orientation, OutputFormat};

//! Image decode/encode WASM bindings.
//!
//! ```typescript
//! import { decode_image, encode_image } from '@imageviewer/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const png = encode_image(image, 'png');
//! ```

use crate::types::JsPixelBuffer;
use imageviewer_core::codec::{self, EncodeError, OutputFormat};
use wasm_bindgen::prelude::*;

/// Decode PNG, JPEG, BMP or GIF bytes to RGB, applying EXIF orientation.
///
/// # Errors
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    codec::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image in the format named by `extension` (`png`, `jpg`, `bmp`).
#[wasm_bindgen]
pub fn encode_image(image: &JsPixelBuffer, extension: &str) -> Result<Vec<u8>, JsValue> {
    encode_as(image, extension).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as JPEG with `quality` (1-100).
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    codec::encode_jpeg(image.buffer(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn encode_as(image: &JsPixelBuffer, extension: &str) -> Result<Vec<u8>, EncodeError> {
    let format = OutputFormat::from_extension(extension)
        .ok_or_else(|| EncodeError::UnsupportedFormat(extension.to_string()))?;
    codec::encode_image(image.buffer(), format)
}

//! WASM-compatible wrapper types for image data.

use imageviewer_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image handed across the JavaScript boundary.
///
/// Pixel data lives in WASM memory. `pixels()` copies it out as a
/// `Uint8Array` (3 bytes per pixel, row-major).
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from dimensions and RGB bytes.
    ///
    /// # Errors
    /// Returns an error if either dimension is zero or the byte count is not
    /// `width * height * 3`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_raw(width, height, pixels)
            .map(JsPixelBuffer::from_buffer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel data (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns a copy of the RGB pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }

    pub(crate) fn into_buffer(self) -> PixelBuffer {
        self.inner
    }
}

//! Editing session bindings.
//!
//! A browser shell owns one `JsEditSession`, calls its methods from button
//! handlers and redraws from `current()` afterwards. Every failing call
//! rejects with the same message that `status` then reports.
//!
//! ```typescript
//! const session = new JsEditSession();
//! session.open_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.apply_filter('Sepia');
//! session.rotate('left');
//! const { undo, redo } = session.controls();
//! ```

use crate::types::JsPixelBuffer;
use imageviewer_core::{
    codec, EditError, EditSession, OutputFormat, PixelBuffer, ResizeDirection, RotateDirection,
    SessionConfig,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct JsEditSession {
    inner: EditSession,
    /// Pristine copy of the last loaded image, for `reload`.
    original: Option<PixelBuffer>,
}

#[wasm_bindgen]
impl JsEditSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        JsEditSession::default()
    }

    /// Create a session from a config object such as
    /// `{ redo_policy: 'preserve', max_history: 20 }`. Missing fields take
    /// their defaults.
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: SessionConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid session config: {}", e)))?;
        Ok(JsEditSession {
            inner: EditSession::with_config(config),
            original: None,
        })
    }

    /// Make `image` the current image and the reload source.
    pub fn load(&mut self, image: JsPixelBuffer) {
        let buffer = image.into_buffer();
        self.original = Some(buffer.clone());
        self.inner.load(buffer);
    }

    /// Decode file bytes and load the result.
    pub fn open_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let buffer = codec::decode_image(bytes)
            .map_err(EditError::from)
            .map_err(|e| self.reject(e))?;
        self.original = Some(buffer.clone());
        self.inner.load(buffer);
        Ok(())
    }

    pub fn close(&mut self) {
        self.original = None;
        self.inner.close();
    }

    /// Apply a filter by its menu name, e.g. `"Edge Detection"`.
    pub fn apply_filter(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.apply_filter(name).map_err(to_js)
    }

    /// `"larger"` or `"smaller"`.
    pub fn resize(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction: ResizeDirection = direction
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        self.inner.resize(direction).map_err(to_js)
    }

    /// `"left"` or `"right"`.
    pub fn rotate(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction: RotateDirection = direction
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        self.inner.rotate(direction).map_err(to_js)
    }

    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner.undo().map_err(to_js)
    }

    pub fn redo(&mut self) -> Result<(), JsValue> {
        self.inner.redo().map_err(to_js)
    }

    /// Restore the image as it was loaded, discarding all history.
    pub fn reload(&mut self) -> Result<(), JsValue> {
        match self.original.clone() {
            Some(source) => {
                self.inner.reload(source);
                Ok(())
            }
            None => Err(self.reject(EditError::NoSourcePath)),
        }
    }

    /// Copy of the current image, or `undefined` when nothing is loaded.
    pub fn current(&self) -> Option<JsPixelBuffer> {
        self.inner.current().cloned().map(JsPixelBuffer::from_buffer)
    }

    /// Encode the current image as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        let image = self.inner.current().ok_or_else(|| to_js(EditError::NoImageLoaded))?;
        codec::encode_image(image, OutputFormat::Png).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.history().can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.history().can_redo()
    }

    /// Filter names in menu order.
    pub fn filter_names(&self) -> js_sys::Array {
        self.inner
            .filters()
            .names()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Enabled state of each shell control, as a plain object.
    pub fn controls(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.controls())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEditSession {
    /// Record an error raised outside the core session as the status.
    fn reject(&mut self, error: EditError) -> JsValue {
        self.inner.report(&error);
        to_js(error)
    }
}

fn to_js(error: EditError) -> JsValue {
    let message = error.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

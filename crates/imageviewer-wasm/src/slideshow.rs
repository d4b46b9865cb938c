//! Slideshow bindings.
//!
//! The JavaScript shell owns the timer. Each image the slideshow moves to is
//! loaded into the editing session, so the usual redraw path shows it.
//!
//! ```typescript
//! const show = new JsSlideshow(3);
//! show.add(first);
//! show.add(second);
//! show.start(session);
//! const timer = setInterval(() => {
//!     if (!show.advance(session) || show.is_complete) clearInterval(timer);
//!     label.textContent = show.position_label() ?? '';
//! }, show.interval_ms);
//! ```

use crate::session::JsEditSession;
use crate::types::JsPixelBuffer;
use imageviewer_core::Slideshow;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug)]
pub struct JsSlideshow {
    inner: Slideshow,
}

#[wasm_bindgen]
impl JsSlideshow {
    /// Create an empty slideshow showing each image for `seconds`.
    ///
    /// # Errors
    /// Rejects a display time of zero.
    #[wasm_bindgen(constructor)]
    pub fn new(seconds: u32) -> Result<JsSlideshow, JsValue> {
        Slideshow::from_seconds(seconds as u64)
            .map(|inner| JsSlideshow { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Display time per image in milliseconds, for `setInterval`.
    #[wasm_bindgen(getter)]
    pub fn interval_ms(&self) -> f64 {
        self.inner.interval().as_millis() as f64
    }

    /// Queue a copy of `image`.
    pub fn add(&mut self, image: &JsPixelBuffer) {
        self.inner.add(image.buffer().clone());
    }

    /// Load the first queued image into `session`.
    ///
    /// # Errors
    /// Rejects with "There are no images to display." when nothing is queued.
    pub fn start(&mut self, session: &mut JsEditSession) -> Result<(), JsValue> {
        let slide = self
            .inner
            .start()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        session.load(JsPixelBuffer::from_buffer(slide.clone()));
        Ok(())
    }

    /// Load the next image into `session`. Returns `false` when there is no
    /// next image.
    pub fn advance(&mut self, session: &mut JsEditSession) -> bool {
        match self.inner.advance() {
            Some(slide) => {
                session.load(JsPixelBuffer::from_buffer(slide.clone()));
                true
            }
            None => false,
        }
    }

    /// `"Image N displaying"`, or `undefined` before the show starts.
    pub fn position_label(&self) -> Option<String> {
        self.inner.position_label()
    }

    /// `"Slide Show Loaded"` or `"Slide Show Complete!"`.
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> Option<String> {
        self.inner.status().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Number of images still waiting to be shown.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }
}

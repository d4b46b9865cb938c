//! ImageViewer WASM - WebAssembly bindings for the editing session
//!
//! This crate exposes `imageviewer-core` to a JavaScript shell.
//!
//! # Module Structure
//!
//! - `types` - `JsPixelBuffer`, the image type that crosses the boundary
//! - `session` - `JsEditSession`: filters, resize, rotate, undo/redo, reload
//! - `codec` - decoding file bytes and encoding PNG/JPEG/BMP
//! - `slideshow` - `JsSlideshow`, a timed playlist loaded into a session
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@imageviewer/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession();
//! session.open_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.apply_filter('Fish Eye');
//! console.log(session.status); // "Applied: Fish Eye"
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod session;
mod slideshow;
mod types;

pub use codec::{decode_image, encode_image, encode_jpeg};
pub use session::JsEditSession;
pub use slideshow::JsSlideshow;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

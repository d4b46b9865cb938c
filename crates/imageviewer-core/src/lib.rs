//! ImageViewer Core - image editing engine
//!
//! This crate holds everything a shell needs to edit a single RGB image:
//! the pixel buffer, the filter menu, resize and rotate transforms, undo/redo
//! history, a slideshow playlist and the file codecs. Shells (the CLI and the
//! WASM bindings) drive an [`EditSession`] and render its current image.

pub mod buffer;
pub mod codec;
pub mod error;
pub mod filter;
pub mod history;
pub mod session;
pub mod slideshow;
pub mod transform;

pub use buffer::{IndexError, PixelBuffer, Rgb};
pub use codec::{DecodeError, EncodeError, OutputFormat};
pub use error::EditError;
pub use filter::{Filter, FilterRegistry};
pub use history::{EditHistory, RedoPolicy};
pub use session::{Controls, EditSession, SessionConfig};
pub use slideshow::Slideshow;
pub use transform::{ResizeDirection, RotateDirection};

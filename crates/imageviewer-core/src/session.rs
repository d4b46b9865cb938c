//! The editing session: current image, history and the operations a shell calls.
//!
//! Every mutating operation follows apply-then-commit: the new image is fully
//! computed from the current one first, and only when that succeeds is the old
//! image pushed onto the undo stack and replaced. A failing operation changes
//! nothing except the status message.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::codec;
use crate::error::EditError;
use crate::filter::FilterRegistry;
use crate::history::{EditHistory, RedoPolicy};
use crate::transform::{self, ResizeDirection, RotateDirection};

/// Largest width or height a resize may produce.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether new edits discard the redo stack.
    pub redo_policy: RedoPolicy,
    /// Maximum number of undo snapshots kept (`None` = unbounded).
    pub max_history: Option<usize>,
    /// Resizes producing a larger width or height are rejected.
    pub max_dimension: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            redo_policy: RedoPolicy::default(),
            max_history: None,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Which shell controls should currently be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub smaller: bool,
    pub larger: bool,
    pub rotate: bool,
    pub reload: bool,
    pub save: bool,
    pub undo: bool,
    pub redo: bool,
}

/// Current image plus history, filters and status.
#[derive(Debug)]
pub struct EditSession {
    current: Option<PixelBuffer>,
    history: EditHistory,
    filters: FilterRegistry,
    config: SessionConfig,
    source_path: Option<PathBuf>,
    status: String,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Empty session with the default filter menu and configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_filters(config, FilterRegistry::with_defaults())
    }

    /// Session with a custom filter menu.
    pub fn with_filters(config: SessionConfig, filters: FilterRegistry) -> Self {
        Self {
            current: None,
            history: EditHistory::with_limits(config.redo_policy, config.max_history),
            filters,
            config,
            source_path: None,
            status: String::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// The image being edited, if any.
    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Message describing the outcome of the last operation.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// File the current image was opened from or last saved to.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Text for the shell's file name label.
    pub fn filename_label(&self) -> String {
        match &self.source_path {
            Some(path) => format!("File: {}", path.display()),
            None => "No file displayed.".to_string(),
        }
    }

    pub fn controls(&self) -> Controls {
        let loaded = self.is_loaded();
        Controls {
            smaller: loaded,
            larger: loaded,
            rotate: loaded,
            reload: loaded,
            save: loaded,
            undo: loaded && self.history.can_undo(),
            redo: loaded && self.history.can_redo(),
        }
    }

    /// Make `image` the current image, discarding history.
    ///
    /// Used for images that do not come from a file, such as slideshow frames.
    pub fn load(&mut self, image: PixelBuffer) {
        debug!("load {}x{}", image.width(), image.height());
        self.current = Some(image);
        self.history.clear();
        self.source_path = None;
        self.status = "Image loaded.".to_string();
    }

    /// Decode `path` and make it the current image.
    ///
    /// On failure the previous image stays loaded and the status shows the
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Decode` if the file cannot be read or is not a
    /// recognized image.
    pub fn open(&mut self, path: &Path) -> Result<(), EditError> {
        self.run(|s| {
            let image = codec::load_image(path)?;
            info!(
                "opened {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            s.current = Some(image);
            s.history.clear();
            s.source_path = Some(path.to_path_buf());
            s.status = "File loaded.".to_string();
            Ok(())
        })
    }

    /// Encode the current image to `path`; the format follows the extension.
    pub fn save(&mut self, path: &Path) -> Result<(), EditError> {
        self.run(|s| {
            let image = s.current.as_ref().ok_or(EditError::NoImageLoaded)?;
            codec::save_image(image, path)?;
            info!("saved {}", path.display());
            s.source_path = Some(path.to_path_buf());
            s.status = format!("Saved: {}", path.display());
            Ok(())
        })
    }

    /// Drop the current image and its history.
    pub fn close(&mut self) {
        debug!("close");
        self.current = None;
        self.history.clear();
        self.source_path = None;
        self.status = "No file displayed.".to_string();
    }

    /// Apply the registered filter called `name` to a copy of the current image.
    ///
    /// # Arguments
    ///
    /// * `name` - Menu name, matched ignoring case and surrounding spaces
    ///
    /// # Errors
    ///
    /// Returns `EditError::UnknownFilter` if no filter has that name, then
    /// `EditError::NoImageLoaded` if there is no image. Either way the image
    /// and history are untouched.
    pub fn apply_filter(&mut self, name: &str) -> Result<(), EditError> {
        self.run(|s| {
            let filter = s
                .filters
                .get(name)
                .ok_or_else(|| EditError::UnknownFilter(name.to_string()))?;
            let current = s.current.as_ref().ok_or(EditError::NoImageLoaded)?;

            let mut next = current.clone();
            filter.apply(&mut next);
            let status = format!("Applied: {}", filter.name());

            s.commit(next);
            s.status = status;
            Ok(())
        })
    }

    /// Double or halve the current image.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidDimension` when halving would leave less
    /// than one pixel or doubling would pass `max_dimension`.
    pub fn resize(&mut self, direction: ResizeDirection) -> Result<(), EditError> {
        self.run(|s| {
            let current = s.current.as_ref().ok_or(EditError::NoImageLoaded)?;
            let (width, height) = transform::resized_dimensions(current, direction)?;
            if width > s.config.max_dimension || height > s.config.max_dimension {
                return Err(EditError::InvalidDimension {
                    width: width as u64,
                    height: height as u64,
                });
            }

            let next = transform::resize(current, direction)?;
            s.commit(next);
            s.status = format!("Made image {direction}: {width}x{height}");
            Ok(())
        })
    }

    /// Rotate the current image a quarter turn.
    pub fn rotate(&mut self, direction: RotateDirection) -> Result<(), EditError> {
        self.run(|s| {
            let current = s.current.as_ref().ok_or(EditError::NoImageLoaded)?;
            let next = transform::rotate(current, direction);
            s.commit(next);
            s.status = format!("Rotated image 90 degrees {direction}");
            Ok(())
        })
    }

    /// Step back one edit.
    pub fn undo(&mut self) -> Result<(), EditError> {
        self.run(|s| {
            let current = s.current.as_mut().ok_or(EditError::NoImageLoaded)?;
            s.history.undo(current)?;
            s.status = "Feature un-done".to_string();
            Ok(())
        })
    }

    /// Re-apply the last undone edit.
    pub fn redo(&mut self) -> Result<(), EditError> {
        self.run(|s| {
            let current = s.current.as_mut().ok_or(EditError::NoImageLoaded)?;
            s.history.redo(current)?;
            s.status = "Feature re-done".to_string();
            Ok(())
        })
    }

    /// Replace the current image with a fresh copy of its source, clearing
    /// history. Unlike undo, this cannot be reversed.
    pub fn reload(&mut self, source: PixelBuffer) {
        debug!("reload {}x{}", source.width(), source.height());
        self.current = Some(source);
        self.history.clear();
        self.status = "Reloaded".to_string();
    }

    /// Re-decode the file the current image came from.
    pub fn reload_from_disk(&mut self) -> Result<(), EditError> {
        let path = match self.source_path.clone() {
            Some(path) => path,
            None => return self.run(|_| Err(EditError::NoSourcePath)),
        };
        let image = self.run(|_| Ok(codec::load_image(&path)?))?;
        self.reload(image);
        Ok(())
    }

    /// Show an error raised outside the session (e.g. by a shell's own
    /// decoding) as the status message.
    pub fn report(&mut self, error: &EditError) {
        warn!("{error}");
        self.status = error.to_string();
    }

    /// Push the old current image to history and install `next`.
    fn commit(&mut self, next: PixelBuffer) {
        debug!("commit {}x{}", next.width(), next.height());
        if let Some(previous) = self.current.replace(next) {
            self.history.record(previous);
        }
    }

    /// Run an operation, turning a failure into the status message.
    fn run<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        let result = op(self);
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn primaries() -> PixelBuffer {
        PixelBuffer::from_rows(&[
            vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)],
            vec![Rgb::new(0, 0, 255), Rgb::new(255, 255, 255)],
        ])
        .unwrap()
    }

    fn loaded() -> EditSession {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut session = EditSession::new();
        session.load(primaries());
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = EditSession::new();
        assert!(!session.is_loaded());
        assert_eq!(session.controls(), Controls::default());
        assert_eq!(session.filename_label(), "No file displayed.");
        assert_eq!(session.filters().len(), 12);
    }

    #[test]
    fn test_apply_invert_scenario() {
        let mut session = loaded();
        session.apply_filter("Invert").unwrap();

        let expected = PixelBuffer::from_rows(&[
            vec![Rgb::new(0, 255, 255), Rgb::new(255, 0, 255)],
            vec![Rgb::new(255, 255, 0), Rgb::new(0, 0, 0)],
        ])
        .unwrap();
        assert_eq!(session.current(), Some(&expected));
        assert_eq!(session.status(), "Applied: Invert");
        assert!(session.controls().undo);
    }

    #[test]
    fn test_unknown_filter_checked_first() {
        let mut session = EditSession::new();
        assert_eq!(
            session.apply_filter("Blur"),
            Err(EditError::UnknownFilter("Blur".to_string()))
        );
        assert_eq!(session.status(), "Unknown filter: Blur");
    }

    #[test]
    fn test_operations_without_image() {
        let mut session = EditSession::new();
        assert_eq!(session.apply_filter("Invert"), Err(EditError::NoImageLoaded));
        assert_eq!(session.status(), "No image loaded.");
        assert_eq!(
            session.resize(ResizeDirection::Larger),
            Err(EditError::NoImageLoaded)
        );
        assert_eq!(
            session.rotate(RotateDirection::Left),
            Err(EditError::NoImageLoaded)
        );
        assert_eq!(session.undo(), Err(EditError::NoImageLoaded));
        assert_eq!(session.redo(), Err(EditError::NoImageLoaded));
        assert_eq!(
            session.save(Path::new("out.png")),
            Err(EditError::NoImageLoaded)
        );
    }

    #[test]
    fn test_undo_empty_history_leaves_image() {
        let mut session = loaded();
        assert_eq!(session.undo(), Err(EditError::EmptyHistory));
        assert_eq!(session.current(), Some(&primaries()));
        assert_eq!(session.status(), "Nothing to undo or redo");
    }

    #[test]
    fn test_undo_restores_and_redo_reapplies() {
        let mut session = loaded();
        session.rotate(RotateDirection::Right).unwrap();
        let rotated = session.current().cloned().unwrap();
        assert_eq!(session.status(), "Rotated image 90 degrees right");

        session.undo().unwrap();
        assert_eq!(session.current(), Some(&primaries()));
        assert_eq!(session.status(), "Feature un-done");
        assert!(session.controls().redo);

        session.redo().unwrap();
        assert_eq!(session.current(), Some(&rotated));
        assert_eq!(session.status(), "Feature re-done");
        assert!(!session.controls().redo);
    }

    #[test]
    fn test_resize_round_trip_through_history() {
        let mut session = loaded();
        session.resize(ResizeDirection::Larger).unwrap();
        assert_eq!(session.current().unwrap().dimensions(), (4, 4));
        assert_eq!(session.status(), "Made image larger: 4x4");

        session.resize(ResizeDirection::Smaller).unwrap();
        assert_eq!(session.current(), Some(&primaries()));
        assert_eq!(session.history().undo_depth(), 2);
    }

    #[test]
    fn test_resize_smaller_on_single_pixel_is_rejected() {
        let mut session = EditSession::new();
        session.load(PixelBuffer::new(1, 1).unwrap());

        let result = session.resize(ResizeDirection::Smaller);
        assert!(matches!(result, Err(EditError::InvalidDimension { .. })));
        assert_eq!(session.current().unwrap().dimensions(), (1, 1));
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_resize_larger_respects_max_dimension() {
        let config = SessionConfig {
            max_dimension: 3,
            ..SessionConfig::default()
        };
        let mut session = EditSession::with_config(config);
        session.load(primaries());

        assert_eq!(
            session.resize(ResizeDirection::Larger),
            Err(EditError::InvalidDimension {
                width: 4,
                height: 4
            })
        );
        assert_eq!(session.current(), Some(&primaries()));
    }

    #[test]
    fn test_new_edit_clears_redo_by_default() {
        let mut session = loaded();
        session.apply_filter("Invert").unwrap();
        session.undo().unwrap();
        session.apply_filter("Mirror").unwrap();
        assert_eq!(session.redo(), Err(EditError::EmptyHistory));
    }

    #[test]
    fn test_preserve_policy_keeps_redo() {
        let config = SessionConfig {
            redo_policy: RedoPolicy::Preserve,
            ..SessionConfig::default()
        };
        let mut session = EditSession::with_config(config);
        session.load(primaries());
        session.apply_filter("Invert").unwrap();
        let inverted = session.current().cloned().unwrap();
        session.undo().unwrap();
        session.apply_filter("Mirror").unwrap();

        session.redo().unwrap();
        assert_eq!(session.current(), Some(&inverted));
    }

    #[test]
    fn test_reload_clears_history() {
        let mut session = loaded();
        session.apply_filter("Darker").unwrap();
        session.apply_filter("Darker").unwrap();

        session.reload(primaries());
        assert_eq!(session.current(), Some(&primaries()));
        assert_eq!(session.status(), "Reloaded");
        assert!(!session.history().can_undo());
        assert_eq!(session.undo(), Err(EditError::EmptyHistory));
    }

    #[test]
    fn test_reload_from_disk_without_file() {
        let mut session = loaded();
        assert_eq!(session.reload_from_disk(), Err(EditError::NoSourcePath));
        assert_eq!(session.current(), Some(&primaries()));
    }

    #[test]
    fn test_close_drops_image_and_history() {
        let mut session = loaded();
        session.apply_filter("Invert").unwrap();
        session.close();

        assert!(session.current().is_none());
        assert!(!session.history().can_undo());
        assert_eq!(session.controls(), Controls::default());
    }

    #[test]
    fn test_load_replaces_and_clears_history() {
        let mut session = loaded();
        session.apply_filter("Invert").unwrap();
        session.load(PixelBuffer::filled(3, 3, Rgb::WHITE).unwrap());

        assert_eq!(session.current().unwrap().dimensions(), (3, 3));
        assert!(!session.controls().undo);
    }

    #[test]
    fn test_max_history_bounds_undo() {
        let config = SessionConfig {
            max_history: Some(1),
            ..SessionConfig::default()
        };
        let mut session = EditSession::with_config(config);
        session.load(primaries());
        session.apply_filter("Invert").unwrap();
        session.apply_filter("Mirror").unwrap();

        session.undo().unwrap();
        assert_eq!(session.undo(), Err(EditError::EmptyHistory));
    }

    #[test]
    fn test_open_save_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("primaries.png");
        codec::save_image(&primaries(), &path).unwrap();

        let mut session = EditSession::new();
        session.open(&path).unwrap();
        assert_eq!(session.status(), "File loaded.");
        assert_eq!(session.filename_label(), format!("File: {}", path.display()));
        assert_eq!(session.current(), Some(&primaries()));

        session.apply_filter("Grayscale").unwrap();
        session.reload_from_disk().unwrap();
        assert_eq!(session.current(), Some(&primaries()));
        assert!(!session.history().can_undo());

        let out = dir.path().join("saved.bmp");
        session.rotate(RotateDirection::Left).unwrap();
        session.save(&out).unwrap();
        assert_eq!(session.source_path(), Some(out.as_path()));
        let saved = codec::load_image(&out).unwrap();
        assert_eq!(Some(&saved), session.current());
    }

    #[test]
    fn test_open_invalid_file_keeps_previous_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not an image").unwrap();

        let mut session = loaded();
        let result = session.open(&path);
        assert!(matches!(result, Err(EditError::Decode(_))));
        assert_eq!(
            session.status(),
            "The file was not in a recognized image file format."
        );
        assert_eq!(session.current(), Some(&primaries()));
    }

    #[test]
    fn test_controls_follow_history() {
        let mut session = loaded();
        let controls = session.controls();
        assert!(controls.rotate && controls.save && controls.reload);
        assert!(!controls.undo && !controls.redo);

        session.apply_filter("sepia").unwrap();
        assert_eq!(session.status(), "Applied: Sepia");
        assert!(session.controls().undo);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

//! Undo/redo snapshot stacks.
//!
//! Every snapshot is a full, owned copy of an image. The session moves buffers
//! between the stacks and its current slot; nothing is shared, so later edits
//! to the current image can never reach a stored snapshot.
//!
//! ## Transitions
//! - record: push the pre-edit image onto undo (and clear redo, depending on
//!   [`RedoPolicy`])
//! - undo: current goes onto redo, top of undo becomes current
//! - redo: current goes onto undo, top of redo becomes current

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// What happens to the redo stack when a new edit is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedoPolicy {
    /// A new edit discards everything that could have been redone.
    #[default]
    ClearOnEdit,
    /// Redo entries survive new edits and can still be re-applied later.
    Preserve,
}

/// Undo and redo stacks of image snapshots.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo: VecDeque<PixelBuffer>,
    redo: Vec<PixelBuffer>,
    policy: RedoPolicy,
    max_depth: Option<usize>,
}

impl EditHistory {
    /// Unbounded history that clears redo on new edits.
    pub fn new() -> Self {
        Self::default()
    }

    /// History with an explicit redo policy and optional undo depth limit.
    ///
    /// When the undo stack grows past `max_depth`, the oldest snapshot is
    /// dropped. A limit of zero disables undo entirely.
    pub fn with_limits(policy: RedoPolicy, max_depth: Option<usize>) -> Self {
        Self {
            policy,
            max_depth,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RedoPolicy {
        self.policy
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Record the image as it was before a new edit.
    pub fn record(&mut self, snapshot: PixelBuffer) {
        if self.policy == RedoPolicy::ClearOnEdit {
            self.redo.clear();
        }
        self.push_undo(snapshot);
    }

    /// Step back one edit.
    ///
    /// On success `current` holds the previous image and the replaced image is
    /// on the redo stack. Fails with `EmptyHistory` without touching `current`.
    pub fn undo(&mut self, current: &mut PixelBuffer) -> Result<(), EditError> {
        let previous = self.undo.pop_back().ok_or(EditError::EmptyHistory)?;
        let replaced = std::mem::replace(current, previous);
        self.redo.push(replaced);
        Ok(())
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self, current: &mut PixelBuffer) -> Result<(), EditError> {
        let next = self.redo.pop().ok_or(EditError::EmptyHistory)?;
        let replaced = std::mem::replace(current, next);
        self.push_undo(replaced);
        Ok(())
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    fn push_undo(&mut self, snapshot: PixelBuffer) {
        self.undo.push_back(snapshot);
        if let Some(max) = self.max_depth {
            while self.undo.len() > max {
                self.undo.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn gray(value: u8) -> PixelBuffer {
        PixelBuffer::filled(2, 2, Rgb::gray(value)).unwrap()
    }

    #[test]
    fn test_undo_empty_leaves_current() {
        let mut history = EditHistory::new();
        let mut current = gray(7);

        assert_eq!(history.undo(&mut current), Err(EditError::EmptyHistory));
        assert_eq!(current, gray(7));
        assert_eq!(history.redo(&mut current), Err(EditError::EmptyHistory));
        assert_eq!(current, gray(7));
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = EditHistory::new();
        history.record(gray(1));
        let mut current = gray(2);

        history.undo(&mut current).unwrap();
        assert_eq!(current, gray(1));
        assert!(!history.can_undo());
        assert!(history.can_redo());

        history.redo(&mut current).unwrap();
        assert_eq!(current, gray(2));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_multiple_undo_order() {
        let mut history = EditHistory::new();
        let mut current = gray(0);
        for v in 1..=3 {
            let previous = std::mem::replace(&mut current, gray(v));
            history.record(previous);
        }
        assert_eq!(history.undo_depth(), 3);

        for expected in [2, 1, 0] {
            history.undo(&mut current).unwrap();
            assert_eq!(current, gray(expected));
        }
        assert_eq!(history.redo_depth(), 3);
    }

    #[test]
    fn test_clear_on_edit_drops_redo() {
        let mut history = EditHistory::new();
        history.record(gray(1));
        let mut current = gray(2);
        history.undo(&mut current).unwrap();
        assert!(history.can_redo());

        history.record(current.clone());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_preserve_keeps_redo() {
        let mut history = EditHistory::with_limits(RedoPolicy::Preserve, None);
        history.record(gray(1));
        let mut current = gray(2);
        history.undo(&mut current).unwrap();

        history.record(current.clone());
        current = gray(3);
        assert!(history.can_redo());

        // The old redo entry is still reachable
        history.redo(&mut current).unwrap();
        assert_eq!(current, gray(2));
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_max_depth_drops_oldest() {
        let mut history = EditHistory::with_limits(RedoPolicy::ClearOnEdit, Some(2));
        for v in 0..4 {
            history.record(gray(v));
        }
        assert_eq!(history.undo_depth(), 2);

        let mut current = gray(9);
        history.undo(&mut current).unwrap();
        assert_eq!(current, gray(3));
        history.undo(&mut current).unwrap();
        assert_eq!(current, gray(2));
        assert_eq!(history.undo(&mut current), Err(EditError::EmptyHistory));
    }

    #[test]
    fn test_clear() {
        let mut history = EditHistory::new();
        history.record(gray(1));
        let mut current = gray(2);
        history.undo(&mut current).unwrap();
        history.record(gray(3));

        history.clear();
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }
}

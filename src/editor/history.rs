use std::collections::VecDeque;

use ropey::Rope;

use super::buffer::Cursor;

/// Upper bound on stored undo steps; the oldest step is dropped beyond this.
const MAX_UNDO_STEPS: usize = 1_000;

/// Kind of edit being recorded, used to merge runs of typing into one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EditKind {
    Insert,
    DeleteBack,
    DeleteForward,
    /// Never merged with neighbours (paste, cut, Enter, selection replace).
    Other,
}

/// Buffer state captured before an edit.
#[derive(Debug, Clone)]
pub(super) struct Snapshot {
    pub rope: Rope,
    pub cursor: Cursor,
    pub revision: u64,
}

/// Linear undo/redo stacks of whole-buffer snapshots.
///
/// Rope clones share their nodes, so a snapshot costs little more than the
/// nodes an edit actually touches.
#[derive(Debug, Default)]
pub(super) struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    open_group: Option<EditKind>,
}

impl History {
    /// Record the state preceding an edit of `kind`.
    ///
    /// Consecutive edits of the same mergeable kind share the snapshot taken
    /// before the first of them. Any recorded edit invalidates redo.
    pub(super) fn record(&mut self, kind: EditKind, before: impl FnOnce() -> Snapshot) {
        self.redo.clear();
        if kind != EditKind::Other && self.open_group == Some(kind) {
            return;
        }
        self.undo.push_back(before());
        if self.undo.len() > MAX_UNDO_STEPS {
            self.undo.pop_front();
        }
        self.open_group = (kind != EditKind::Other).then_some(kind);
    }

    /// End the current merge group so the next edit starts a new undo step.
    pub(super) const fn break_group(&mut self) {
        self.open_group = None;
    }

    pub(super) fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        self.open_group = None;
        Some(previous)
    }

    pub(super) fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        self.open_group = None;
        Some(next)
    }

    pub(super) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.open_group = None;
    }

    pub(super) fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub(super) const fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

//! Snapshot-based undo/redo.
//!
//! Every entry is a full copy of the [`Project`]. Gestures capture a snapshot
//! with [`History::begin_interaction`] before mutating and hand it back to
//! [`History::commit_interaction`] once the mutation is final, so a drag of
//! any length produces exactly one undo step.

use tracing::debug;

use crate::model::Project;

/// Default maximum number of undo steps kept.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// An immutable copy of the project taken before a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSnapshot(Project);

impl ProjectSnapshot {
    pub fn project(&self) -> &Project {
        &self.0
    }

    pub fn into_project(self) -> Project {
        self.0
    }
}

/// Undo and redo stacks of project snapshots.
#[derive(Debug, Clone)]
pub struct History {
    /// Oldest first; the last entry is restored by the next undo.
    past: Vec<Project>,
    /// The last entry is restored by the next redo.
    future: Vec<Project>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Captures the state to return to if the coming mutation is committed.
    pub fn begin_interaction(&self, current: &Project) -> ProjectSnapshot {
        ProjectSnapshot(current.clone())
    }

    /// Records `snapshot` as the state before the latest mutation and drops
    /// the redo chain.
    pub fn commit_interaction(&mut self, snapshot: ProjectSnapshot) {
        self.past.push(snapshot.0);
        if self.past.len() > self.max_depth {
            let excess = self.past.len() - self.max_depth;
            self.past.drain(..excess);
        }
        self.future.clear();
    }

    /// Restores the previous state into `current`. Returns `false` when there
    /// is nothing to undo.
    pub fn undo(&mut self, current: &mut Project) -> bool {
        let Some(previous) = self.past.pop() else {
            debug!("Nothing to undo");
            return false;
        };
        self.future.push(std::mem::replace(current, previous));
        true
    }

    /// Re-applies the most recently undone state. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self, current: &mut Project) -> bool {
        let Some(next) = self.future.pop() else {
            debug!("Nothing to redo");
            return false;
        };
        self.past.push(std::mem::replace(current, next));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

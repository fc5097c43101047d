//! Edit session: the current snapshot plus undo/redo history.

use std::sync::Arc;

use crate::error::Result;
use crate::schema::AcquisitionForm;

use super::engine::TransformEngine;
use super::operations::{FormChange, FormOperation};

/// Default number of snapshots kept for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Holds the snapshot an editor works on.
///
/// Snapshots are shared as `Arc`s. Applying an operation swaps in a new
/// snapshot, so anything still holding an older one keeps seeing it as it
/// was.
pub struct EditSession {
    engine: TransformEngine,
    current: Arc<AcquisitionForm>,
    undo: Vec<Arc<AcquisitionForm>>,
    redo: Vec<Arc<AcquisitionForm>>,
    focus: Option<usize>,
    history_limit: usize,
}

impl EditSession {
    /// Start a session on a form.
    pub fn new(form: AcquisitionForm) -> Self {
        Self {
            engine: TransformEngine::new(),
            current: Arc::new(form),
            undo: Vec::new(),
            redo: Vec::new(),
            focus: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Cap the undo history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<AcquisitionForm> {
        Arc::clone(&self.current)
    }

    /// Borrow the current form.
    pub fn form(&self) -> &AcquisitionForm {
        &self.current
    }

    /// Series the operator is editing, set by `AddSeries`.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Apply an operation. On error the session is unchanged.
    pub fn apply(&mut self, operation: FormOperation) -> Result<FormChange> {
        let transition = self.engine.apply(&self.current, &operation)?;

        let previous = std::mem::replace(&mut self.current, Arc::new(transition.form));
        self.undo.push(previous);
        if self.undo.len() > self.history_limit {
            let excess = self.undo.len() - self.history_limit;
            self.undo.drain(..excess);
        }
        self.redo.clear();
        self.focus = transition.change.focus;

        Ok(transition.change)
    }

    /// Step back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.current, previous);
                self.redo.push(current);
                self.focus = None;
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.current, next);
                self.undo.push(current);
                self.focus = None;
                true
            }
            None => false,
        }
    }

    /// Close the session and hand back the final snapshot.
    pub fn finish(self) -> Arc<AcquisitionForm> {
        self.current
    }
}

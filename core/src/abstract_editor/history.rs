//! Undo/redo action history.
//!
//! [`EditActionHistory`] owns a linear undo/redo stack of [`EditAction`]
//! trait objects. Pushing a new entry discards the redo branch.

use std::collections::VecDeque;
use std::fmt;

use super::action::{EditAction, EditActionError, EditActionResult, Editable};

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Bounded undo stack plus redo stack.
///
/// Overflow drops the oldest undo entry.
pub struct EditActionHistory<T: Editable> {
    undo_stack: VecDeque<Box<dyn EditAction<T>>>,
    redo_stack: Vec<Box<dyn EditAction<T>>>,
    max_undo: usize,
}

impl<T: Editable> EditActionHistory<T> {
    /// Creates an empty history holding at most `max_undo` undo steps.
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo,
        }
    }

    /// Records an action whose effect is already present on the target.
    pub fn push_applied(&mut self, action: Box<dyn EditAction<T>>) {
        log::debug!("Recorded: {}", action.description());
        self.redo_stack.clear();
        self.push_undo(action);
    }

    /// Undoes the most recent action. A failing action stays on the stack.
    pub fn undo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self
            .undo_stack
            .pop_back()
            .ok_or(EditActionError::EmptyHistory("undo"))?;
        if let Err(err) = action.undo(target) {
            self.undo_stack.push_back(action);
            return Err(err);
        }
        log::debug!("Undo: {}", action.description());
        self.redo_stack.push(action);
        Ok(())
    }

    /// Redoes the most recently undone action.
    pub fn redo(&mut self, target: &mut T) -> EditActionResult {
        let mut action = self
            .redo_stack
            .pop()
            .ok_or(EditActionError::EmptyHistory("redo"))?;
        if let Err(err) = action.apply(target) {
            self.redo_stack.push(action);
            return Err(err);
        }
        log::debug!("Redo: {}", action.description());
        self.push_undo(action);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|a| a.description())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_undo(&mut self, action: Box<dyn EditAction<T>>) {
        self.undo_stack.push_back(action);
        if self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
    }
}

impl<T: Editable> fmt::Debug for EditActionHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditActionHistory")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("max_undo", &self.max_undo)
            .finish()
    }
}

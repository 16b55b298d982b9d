//! Snapshot transactions: many in-place edits, one undo step.
//!
//! A [`Transaction`] is opened on a [`Recordable`] target together with its
//! [`EditActionHistory`]. Callers register every object with
//! [`Transaction::record`] before mutating it; the transaction remembers the
//! object's state at that moment. Closing the transaction (explicitly with
//! [`Transaction::commit`] or implicitly on drop) captures the final state of
//! each recorded object and pushes a single [`SnapshotGroupAction`] that can
//! flip all of them back and forth.

use std::fmt;

use super::action::{EditAction, EditActionResult, Editable};
use super::history::EditActionHistory;

/// An editing target whose objects can be snapshotted by key.
pub trait Recordable: Editable {
    /// Identifies one object inside the target.
    type Key: Copy + Eq + fmt::Debug + Send + 'static;
    /// Full state of one object, as captured for undo.
    type State: Clone + PartialEq + fmt::Debug + Send + 'static;

    /// Captures the current state of `key`, or `None` if it does not exist.
    fn capture(&self, key: Self::Key) -> Option<Self::State>;

    /// Overwrites the object at `key` with a previously captured state.
    fn restore(&mut self, key: Self::Key, state: Self::State) -> EditActionResult;
}

struct SnapshotEntry<T: Recordable> {
    key: T::Key,
    before: T::State,
    after: T::State,
}

/// Undo entry produced by a committed [`Transaction`].
///
/// Holds before/after snapshots of every object that changed inside the
/// transaction. Undo restores the before-states in reverse record order,
/// redo restores the after-states in record order.
pub struct SnapshotGroupAction<T: Recordable> {
    description: String,
    entries: Vec<SnapshotEntry<T>>,
}

impl<T: Recordable> fmt::Debug for SnapshotGroupAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotGroupAction")
            .field("description", &self.description)
            .field(
                "keys",
                &self.entries.iter().map(|e| e.key).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T: Recordable> EditAction<T> for SnapshotGroupAction<T> {
    fn apply(&mut self, target: &mut T) -> EditActionResult {
        for entry in &self.entries {
            target.restore(entry.key, entry.after.clone())?;
        }
        Ok(())
    }

    fn undo(&mut self, target: &mut T) -> EditActionResult {
        for entry in self.entries.iter().rev() {
            target.restore(entry.key, entry.before.clone())?;
        }
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Scoped undo group over a [`Recordable`] target.
///
/// The transaction always closes: either through [`commit`](Self::commit)
/// or when it is dropped, including on early returns.
///
/// # Example
///
/// ```ignore
/// let mut tx = Transaction::begin(&mut scene, &mut history, "Replace materials");
/// tx.record(component);
/// tx.target_mut().component_mut(component)?.set_slot(0, Some(new_material));
/// tx.commit(); // one undo step
/// ```
pub struct Transaction<'a, T: Recordable> {
    target: &'a mut T,
    history: &'a mut EditActionHistory<T>,
    label: String,
    records: Vec<(T::Key, T::State)>,
    closed: bool,
}

impl<'a, T: Recordable> Transaction<'a, T> {
    /// Opens a transaction labelled `label` in the undo history.
    pub fn begin(
        target: &'a mut T,
        history: &'a mut EditActionHistory<T>,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        log::debug!("Begin transaction \"{label}\"");
        Self {
            target,
            history,
            label,
            records: Vec::new(),
            closed: false,
        }
    }

    /// Captures the current state of `key` for undo.
    ///
    /// Must be called before the object is mutated. Recording the same key
    /// again keeps the first snapshot. Returns `false` if the object does
    /// not exist.
    pub fn record(&mut self, key: T::Key) -> bool {
        if self.records.iter().any(|(k, _)| *k == key) {
            return true;
        }
        match self.target.capture(key) {
            Some(state) => {
                self.records.push((key, state));
                true
            }
            None => false,
        }
    }

    pub fn target(&self) -> &T {
        &*self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut *self.target
    }

    /// Closes the transaction and returns the number of changed objects
    /// pushed to the history as one undo step.
    pub fn commit(mut self) -> usize {
        self.close()
    }

    fn close(&mut self) -> usize {
        if self.closed {
            return 0;
        }
        self.closed = true;

        let mut entries = Vec::new();
        for (key, before) in self.records.drain(..) {
            match self.target.capture(key) {
                Some(after) if after != before => entries.push(SnapshotEntry { key, before, after }),
                Some(_) => {}
                None => log::warn!(
                    "Transaction \"{}\": {key:?} disappeared before commit",
                    self.label
                ),
            }
        }

        if entries.is_empty() {
            log::debug!("Transaction \"{}\" closed without changes", self.label);
            return 0;
        }

        let changed = entries.len();
        let action = SnapshotGroupAction {
            description: std::mem::take(&mut self.label),
            entries,
        };
        // The target already holds the after-states.
        self.history.push_applied(Box::new(action));
        changed
    }
}

impl<T: Recordable> Drop for Transaction<'_, T> {
    fn drop(&mut self) {
        self.close();
    }
}

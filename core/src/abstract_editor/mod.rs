//! Undo/redo framework for reversible editor operations.
//!
//! The types here know nothing about scenes or materials. A concrete editing
//! target implements [`Editable`] (and [`Recordable`] when it wants snapshot
//! based undo), and edits flow through an [`EditActionHistory`].
//!
//! - [`EditAction`]: a reversible edit (Command pattern)
//! - [`EditActionHistory`]: bounded undo stack plus redo stack
//! - [`Transaction`]: scoped undo group that snapshots objects before they
//!   are mutated and commits all changes as a single undo step
//!
//! # Recording a batch edit
//!
//! Open a [`Transaction`], call [`Transaction::record`] on every object
//! *before* mutating it, mutate the target in place, and let the
//! transaction close. Closing compares each recorded object with its
//! current state and pushes one [`SnapshotGroupAction`] holding only the
//! objects that actually changed.

mod action;
mod history;
mod transaction;

pub use action::{EditAction, EditActionError, EditActionResult, Editable};
pub use history::{DEFAULT_MAX_UNDO, EditActionHistory};
pub use transaction::{Recordable, SnapshotGroupAction, Transaction};

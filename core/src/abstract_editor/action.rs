//! Editable targets and reversible editor actions.
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`EditAction`]: a reversible edit operation (Command pattern)
//! - [`EditActionError`] / [`EditActionResult`]: error handling for actions

use std::fmt;

use thiserror::Error;

/// Marker trait for types that serve as editing targets.
pub trait Editable: 'static {}

/// Error type for action execution failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditActionError {
    /// The target object was not found.
    #[error("target not found: {0}")]
    TargetNotFound(String),
    /// The history has nothing to undo or redo.
    #[error("nothing to {0}")]
    EmptyHistory(&'static str),
}

/// Result type for action operations.
pub type EditActionResult<T = ()> = Result<T, EditActionError>;

/// A reversible editor action (Command pattern).
///
/// The trait is dyn-compatible so different action types share one
/// [`EditActionHistory`](super::EditActionHistory) as `Box<dyn EditAction<T>>`.
pub trait EditAction<T: Editable>: fmt::Debug + Send {
    /// Applies the action to the target (forward / redo direction).
    fn apply(&mut self, target: &mut T) -> EditActionResult;

    /// Reverses the action (undo direction).
    ///
    /// Must restore the target to the state before [`apply`](Self::apply)
    /// was called.
    fn undo(&mut self, target: &mut T) -> EditActionResult;

    /// A short, human-readable description for display in the edit menu.
    fn description(&self) -> &str;
}

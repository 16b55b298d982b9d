//! Scene graph with renderable components.
//!
//! - [`Scene`]: arena of nodes forming a forest
//! - [`SceneNode`]: a named node with children and components
//! - [`Component`]: what can be attached to a node
//! - [`HasMaterialSlots`]: capability of components that reference materials
//!
//! [`Scene`] implements [`Recordable`](crate::abstract_editor::Recordable)
//! with components as the unit of undo capture, so any component edit can be
//! wrapped in a [`Transaction`](crate::abstract_editor::Transaction).

mod renderer;
mod types;

pub use renderer::{Component, HasMaterialSlots, Light, MeshRenderer, SkinnedMeshRenderer};
pub use types::{ComponentId, NodeId, Scene, SceneError, SceneNode};

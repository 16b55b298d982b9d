//! # Unshare Core
//!
//! Editor-agnostic building blocks for the material unsharing tool:
//!
//! - [`abstract_editor`]: undo/redo history and snapshot transactions
//! - [`material`]: material assets, variants and property resolution
//! - [`scene`]: scene graph with renderable components and material slots

pub mod abstract_editor;
pub mod material;
pub mod scene;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

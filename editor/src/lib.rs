//! # Unshare Editor
//!
//! Editor side of the material unsharing tool. Selecting a scene node and
//! running one of the [`menu`] commands duplicates every persisted material
//! used under that node and points the renderers at the duplicates, as one
//! undo step.
//!
//! - [`asset_database`]: material assets stored in the [`unshare_vfs::Vfs`]
//! - [`cloner`]: usage collection, naming, duplication and slot rewriting
//! - [`context`]: scene, assets, undo history and selection
//! - [`menu`]: the two context-menu commands
//! - [`project`]: `project.toml` loading
//! - [`log_capture`]: console log sink
//!
//! # Example
//!
//! ```
//! use unshare_core::material::Material;
//! use unshare_core::scene::{MeshRenderer, Scene};
//! use unshare_editor::asset_database::AssetDatabase;
//! use unshare_editor::context::EditorContext;
//! use unshare_editor::menu::MenuAction;
//! use unshare_editor::project::ClonerSettings;
//! use unshare_vfs::{MemoryProvider, Vfs};
//!
//! let mut vfs = Vfs::new();
//! vfs.mount("assets", MemoryProvider::new());
//! let mut assets = AssetDatabase::new(vfs, "mat");
//! let metal = assets
//!     .create_material("assets/mats/Metal.mat", Material::new("Metal"))
//!     .unwrap();
//!
//! let mut scene = Scene::new();
//! let crate_node = scene.spawn("Crate");
//! let renderer = MeshRenderer::new("crate.mesh").with_materials(vec![Some(metal)]);
//! scene.add_component(crate_node, renderer).unwrap();
//!
//! let mut ctx = EditorContext::new(scene, assets, ClonerSettings::default());
//! ctx.selection.select(crate_node);
//! let report = ctx.dispatch(MenuAction::CloneMaterials).unwrap();
//! assert_eq!(report.cloned_count(), 1);
//! assert_eq!(report.cloned[0].path, "assets/mats/clone/Metal.mat");
//! ```

pub mod asset_database;
pub mod cloner;
pub mod context;
pub mod log_capture;
pub mod menu;
pub mod project;

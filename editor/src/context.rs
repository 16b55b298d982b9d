//! Editor state passed explicitly to commands.

use unshare_core::abstract_editor::{DEFAULT_MAX_UNDO, EditActionHistory, EditActionResult};
use unshare_core::scene::{NodeId, Scene};

use crate::asset_database::AssetDatabase;
use crate::cloner::{self, CloneReport};
use crate::menu::MenuAction;
use crate::project::{ClonerSettings, ProjectConfig};

/// The editor's node selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<NodeId>,
}

impl Selection {
    pub fn single(node: NodeId) -> Self {
        Self { active: Some(node) }
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn select(&mut self, node: NodeId) {
        self.active = Some(node);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Everything an editor command may read or modify.
pub struct EditorContext {
    pub scene: Scene,
    pub assets: AssetDatabase,
    /// Undo history of scene edits.
    pub history: EditActionHistory<Scene>,
    pub selection: Selection,
    pub settings: ClonerSettings,
}

impl EditorContext {
    pub fn new(scene: Scene, assets: AssetDatabase, settings: ClonerSettings) -> Self {
        Self {
            scene,
            assets,
            history: EditActionHistory::new(DEFAULT_MAX_UNDO),
            selection: Selection::default(),
            settings,
        }
    }

    /// Empty scene over the project's mounts.
    pub fn from_project(config: &ProjectConfig, vfs: unshare_vfs::Vfs) -> Self {
        let assets = AssetDatabase::new(vfs, config.cloner.material_extension.clone());
        Self::new(Scene::new(), assets, config.cloner.clone())
    }

    /// Selected node, if it still exists.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.selection
            .active()
            .filter(|&node| self.scene.contains(node))
    }

    /// Runs a menu command on the current selection.
    ///
    /// Returns `None` without doing anything when the command is disabled.
    pub fn dispatch(&mut self, action: MenuAction) -> Option<CloneReport> {
        if !action.is_enabled(self) {
            return None;
        }
        let root = self.selected_node();
        log::info!("{}", action.label());
        Some(cloner::clone_materials(self, root, action.mode()))
    }

    pub fn undo(&mut self) -> EditActionResult {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> EditActionResult {
        self.history.redo(&mut self.scene)
    }
}

//! Scene-node context menu entries.

use crate::cloner::CloneMode;
use crate::context::EditorContext;

/// Commands offered in the scene-node context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    CloneMaterials,
    CreateMaterialVariants,
}

impl MenuAction {
    pub const ALL: [MenuAction; 2] = [
        MenuAction::CloneMaterials,
        MenuAction::CreateMaterialVariants,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::CloneMaterials => "Clone Materials and Replace References",
            MenuAction::CreateMaterialVariants => "Create Material Variants and Replace References",
        }
    }

    pub fn mode(self) -> CloneMode {
        match self {
            MenuAction::CloneMaterials => CloneMode::Duplicate,
            MenuAction::CreateMaterialVariants => CloneMode::Variant,
        }
    }

    /// Enabled iff a node that still exists is selected.
    pub fn is_enabled(self, ctx: &EditorContext) -> bool {
        ctx.selected_node().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_database::AssetDatabase;
    use crate::project::ClonerSettings;
    use unshare_core::scene::Scene;
    use unshare_vfs::Vfs;

    #[test]
    fn entries_map_to_modes() {
        assert_eq!(MenuAction::ALL.len(), 2);
        assert_eq!(MenuAction::CloneMaterials.mode(), CloneMode::Duplicate);
        assert_eq!(MenuAction::CreateMaterialVariants.mode(), CloneMode::Variant);
        assert_ne!(
            MenuAction::CloneMaterials.label(),
            MenuAction::CreateMaterialVariants.label()
        );
    }

    #[test]
    fn enabled_only_with_selection() {
        let mut ctx = EditorContext::new(
            Scene::new(),
            AssetDatabase::new(Vfs::new(), "mat"),
            ClonerSettings::default(),
        );
        let node = ctx.scene.spawn("Crate");

        for action in MenuAction::ALL {
            assert!(!action.is_enabled(&ctx));
        }
        ctx.selection.select(node);
        for action in MenuAction::ALL {
            assert!(action.is_enabled(&ctx));
        }
    }
}

//! Material cloner: unshares the materials used under a scene node.
//!
//! For every persisted material referenced by a renderer under the node,
//! the cloner:
//!
//! 1. collects the slots that use it ([`collect_usages`]),
//! 2. duplicates it next to the original, in a `clone` folder, under a name
//!    that does not collide with earlier duplicates ([`duplicate_material`],
//!    [`allocate_name`]),
//! 3. re-points those slots at the duplicate ([`rewrite_references`]).
//!
//! All slot rewrites of one run form a single undo step labelled
//! [`UNDO_LABEL`]. Created asset files stay on disk after undo; running the
//! command again simply picks the next free names.
//!
//! Failures are per material: a material that cannot be duplicated is
//! logged, reported in [`CloneReport::skipped`] and the others proceed.

mod duplicate;
mod error;
mod naming;
mod rewrite;
mod usage;

pub use duplicate::{destination_folder, duplicate_material};
pub use error::CloneError;
pub use naming::{allocate_name, base_name};
pub use rewrite::rewrite_references;
pub use usage::{SlotUsage, UsageGroup, collect_usages};

use unshare_core::abstract_editor::{EditActionHistory, Transaction};
use unshare_core::material::MaterialHandle;
use unshare_core::scene::{NodeId, Scene};

use crate::asset_database::AssetStore;
use crate::context::EditorContext;
use crate::project::ClonerSettings;

/// Label of the undo step recorded by one clone run.
pub const UNDO_LABEL: &str = "Clone materials and rewrite references";

/// What a clone run creates for each material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloneMode {
    /// Independent copy with all properties duplicated.
    Duplicate,
    /// Variant that stores no overrides and inherits everything from the
    /// original.
    Variant,
}

/// A material that was duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedMaterial {
    pub original: MaterialHandle,
    pub duplicate: MaterialHandle,
    /// Storage path of the duplicate.
    pub path: String,
    /// Number of slots re-pointed at the duplicate.
    pub rewritten_slots: usize,
}

/// A material that was left shared.
#[derive(Debug)]
pub struct SkippedMaterial {
    pub original: MaterialHandle,
    pub reason: CloneError,
}

/// Outcome of one clone run.
#[derive(Debug, Default)]
pub struct CloneReport {
    pub cloned: Vec<ClonedMaterial>,
    pub skipped: Vec<SkippedMaterial>,
}

impl CloneReport {
    pub fn cloned_count(&self) -> usize {
        self.cloned.len()
    }

    /// Entry for `original`, if it was duplicated.
    pub fn cloned(&self, original: MaterialHandle) -> Option<&ClonedMaterial> {
        self.cloned.iter().find(|c| c.original == original)
    }

    /// Human-readable result line.
    pub fn summary(&self) -> String {
        let count = self.cloned_count();
        let noun = if count == 1 { "material" } else { "materials" };
        match self.skipped.len() {
            0 => format!("Cloned {count} {noun}"),
            skipped => format!("Cloned {count} {noun}, skipped {skipped}"),
        }
    }
}

/// Clones the materials used under `root`, the editor's selected node.
///
/// `None`, or a node that is not in the scene, is a no-op. So is a subtree
/// without persisted materials. Neither pushes anything to the undo history.
pub fn clone_materials(
    ctx: &mut EditorContext,
    root: Option<NodeId>,
    mode: CloneMode,
) -> CloneReport {
    let Some(root) = root.filter(|&node| ctx.scene.contains(node)) else {
        log::warn!("Cannot clone materials: {}", CloneError::NoSelection);
        return CloneReport::default();
    };
    let EditorContext {
        scene,
        assets,
        history,
        settings,
        ..
    } = ctx;
    clone_subtree(scene, history, assets, settings, root, mode)
}

/// [`clone_materials`] over explicit collaborators.
pub fn clone_subtree<S>(
    scene: &mut Scene,
    history: &mut EditActionHistory<Scene>,
    store: &mut S,
    settings: &ClonerSettings,
    root: NodeId,
    mode: CloneMode,
) -> CloneReport
where
    S: AssetStore + ?Sized,
{
    let usages = collect_usages(scene, root, &*store);
    if usages.is_empty() {
        log::info!("{}", CloneError::NoMaterialsFound);
        return CloneReport::default();
    }
    log::debug!(
        "Found {} materials in {} slots under {root}",
        usages.len(),
        usages.usage_count()
    );

    let mut report = CloneReport::default();
    let mut tx = Transaction::begin(scene, history, UNDO_LABEL);
    for (original, slots) in usages.iter() {
        match duplicate_material(&mut *store, original, mode, settings) {
            Ok(duplicate) => {
                let rewritten_slots = rewrite_references(&mut tx, slots, original, duplicate);
                report.cloned.push(ClonedMaterial {
                    original,
                    duplicate,
                    path: store.storage_path(duplicate).unwrap_or_default(),
                    rewritten_slots,
                });
            }
            Err(reason) => {
                let name = store
                    .material(original)
                    .map_or_else(|| original.to_string(), |m| m.name.clone());
                log::warn!("Skipping material '{name}': {reason}");
                report.skipped.push(SkippedMaterial { original, reason });
            }
        }
    }
    tx.commit();

    log::info!("{}", report.summary());
    report
}

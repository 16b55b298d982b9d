//! Which renderer slots use which persisted material.

use indexmap::IndexMap;
use unshare_core::material::MaterialHandle;
use unshare_core::scene::{ComponentId, NodeId, Scene};

use crate::asset_database::AssetStore;

/// One material slot on one renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotUsage {
    pub component: ComponentId,
    pub slot: usize,
}

/// Slot usages grouped by the material they reference.
///
/// Materials are kept in first-seen order. Within a group, usages are in
/// traversal order, then slot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageGroup {
    groups: IndexMap<MaterialHandle, Vec<SlotUsage>>,
}

impl UsageGroup {
    /// Number of distinct materials.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, material: MaterialHandle) -> Option<&[SlotUsage]> {
        self.groups.get(&material).map(Vec::as_slice)
    }

    pub fn materials(&self) -> impl Iterator<Item = MaterialHandle> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialHandle, &[SlotUsage])> {
        self.groups.iter().map(|(m, u)| (*m, u.as_slice()))
    }

    /// Total number of slot usages across all materials.
    pub fn usage_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    fn push(&mut self, material: MaterialHandle, usage: SlotUsage) {
        self.groups.entry(material).or_default().push(usage);
    }
}

/// Collects every slot under `root` that references a persisted material.
///
/// Walks `root` and all descendants, inactive ones included, and looks at
/// every renderer on them. Empty slots and slots holding non-persisted
/// materials are skipped.
pub fn collect_usages<S>(scene: &Scene, root: NodeId, store: &S) -> UsageGroup
where
    S: AssetStore + ?Sized,
{
    let mut group = UsageGroup::default();
    for node in scene.descendants(root) {
        for (component, renderer) in scene
            .components(node)
            .filter_map(|(id, c)| c.as_renderer().map(|r| (id, r)))
        {
            for (slot, material) in renderer.material_slots().iter().enumerate() {
                let Some(material) = *material else {
                    continue;
                };
                if !store.is_persistent(material) {
                    log::debug!("{component} slot {slot}: {material} is not an asset, skipped");
                    continue;
                }
                group.push(material, SlotUsage { component, slot });
            }
        }
    }
    group
}

//! Re-pointing renderer slots from a shared material to its duplicate.

use unshare_core::abstract_editor::Transaction;
use unshare_core::material::MaterialHandle;
use unshare_core::scene::{Component, Scene};

use super::usage::SlotUsage;

/// Replaces `original` with `replacement` in every usage that still holds
/// `original`, and returns how many slots changed.
///
/// Each renderer's current slot array is re-read before writing, so a slot
/// that changed since collection is left alone. Renderers are recorded in
/// `tx` before they are modified, and slot arrays are written back whole.
pub fn rewrite_references(
    tx: &mut Transaction<'_, Scene>,
    usages: &[SlotUsage],
    original: MaterialHandle,
    replacement: MaterialHandle,
) -> usize {
    let mut rewritten = 0;
    for usage in usages {
        let Some(mut slots) = tx
            .target()
            .component(usage.component)
            .and_then(Component::as_renderer)
            .map(|r| r.material_slots().to_vec())
        else {
            log::debug!("{} is gone, skipped", usage.component);
            continue;
        };

        match slots.get_mut(usage.slot) {
            Some(slot) if *slot == Some(original) => *slot = Some(replacement),
            _ => {
                log::debug!(
                    "{} slot {} no longer holds {original}, skipped",
                    usage.component,
                    usage.slot
                );
                continue;
            }
        }

        tx.record(usage.component);
        if let Some(renderer) = tx
            .target_mut()
            .component_mut(usage.component)
            .and_then(Component::as_renderer_mut)
        {
            renderer.set_material_slots(slots);
            rewritten += 1;
        }
    }
    rewritten
}

//! Shared fixtures for editor integration tests.

#![allow(dead_code)]

use unshare_core::material::{Material, MaterialHandle, MaterialValue};
use unshare_core::scene::{Component, ComponentId, Scene};
use unshare_editor::asset_database::AssetDatabase;
use unshare_editor::context::EditorContext;
use unshare_editor::project::ClonerSettings;
use unshare_vfs::{MemoryProvider, Vfs, VfsProvider};

/// Editor context over an in-memory `assets` mount, plus the mount itself.
pub fn memory_context() -> (EditorContext, MemoryProvider) {
    let mem = MemoryProvider::new();
    let mut vfs = Vfs::new();
    vfs.mount("assets", mem.clone());
    let assets = AssetDatabase::new(vfs, "mat");
    (
        EditorContext::new(Scene::new(), assets, ClonerSettings::default()),
        mem,
    )
}

/// A persisted PBR material with a distinctive roughness.
pub fn material_at(ctx: &mut EditorContext, path: &str, roughness: f32) -> MaterialHandle {
    let name = unshare_vfs::path::file_stem(path).to_owned();
    ctx.assets
        .create_material(
            path,
            Material::new(name)
                .with_shader("pbr")
                .with_property("roughness", MaterialValue::Float(roughness)),
        )
        .unwrap()
}

pub fn slots(scene: &Scene, id: ComponentId) -> Vec<Option<MaterialHandle>> {
    scene
        .component(id)
        .and_then(Component::as_renderer)
        .map(|r| r.material_slots().to_vec())
        .unwrap()
}

/// Sorted material file stems directly inside `folder` of the mount.
pub fn material_files(mem: &MemoryProvider, folder: &str) -> Vec<String> {
    let mut names: Vec<String> = mem
        .list_dir(folder)
        .unwrap()
        .into_iter()
        .filter_map(|entry| entry.strip_suffix(".mat").map(str::to_owned))
        .collect();
    names.sort();
    names
}

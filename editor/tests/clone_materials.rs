mod common;

use common::{material_at, material_files, memory_context, slots};
use unshare_core::material::{
    Material, MaterialHandle, MaterialLookup, MaterialValue, resolve_property, resolve_shader,
};
use unshare_core::scene::{Light, MeshRenderer, SkinnedMeshRenderer};
use unshare_editor::asset_database::AssetStore;
use unshare_editor::cloner::{
    CloneError, CloneMode, UNDO_LABEL, clone_materials, collect_usages,
};
use unshare_editor::menu::MenuAction;
use unshare_vfs::VfsProvider;

fn some(handle: MaterialHandle) -> Option<MaterialHandle> {
    Some(handle)
}

// ---------------------------------------------------------------------------
// Grouping and rewriting
// ---------------------------------------------------------------------------

#[test]
fn three_renderers_two_shared_materials() {
    let (mut ctx, mem) = memory_context();
    let m1 = material_at(&mut ctx, "assets/mats/M1.mat", 0.1);
    let m2 = material_at(&mut ctx, "assets/mats/M2.mat", 0.2);

    let root = ctx.scene.spawn("Props");
    let node_a = ctx.scene.spawn_child(root, "A").unwrap();
    let node_b = ctx.scene.spawn_child(root, "B").unwrap();
    let node_c = ctx.scene.spawn_child(node_b, "C").unwrap();
    let a = ctx
        .scene
        .add_component(node_a, MeshRenderer::new("a.mesh").with_materials(vec![some(m1), some(m2)]))
        .unwrap();
    let b = ctx
        .scene
        .add_component(node_b, MeshRenderer::new("b.mesh").with_materials(vec![some(m1)]))
        .unwrap();
    let c = ctx
        .scene
        .add_component(
            node_c,
            SkinnedMeshRenderer::new("c.mesh").with_materials(vec![some(m2), some(m2)]),
        )
        .unwrap();

    let group = collect_usages(&ctx.scene, root, &ctx.assets);
    assert_eq!(group.len(), 2);
    assert_eq!(group.get(m1).unwrap().len(), 2);
    assert_eq!(group.get(m2).unwrap().len(), 3);

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    assert_eq!(report.cloned_count(), 2);
    assert!(report.skipped.is_empty());
    assert_eq!(material_files(&mem, "mats/clone"), vec!["M1", "M2"]);

    let d1 = report.cloned(m1).unwrap().duplicate;
    let d2 = report.cloned(m2).unwrap().duplicate;
    assert_eq!(report.cloned(m1).unwrap().rewritten_slots, 2);
    assert_eq!(report.cloned(m2).unwrap().rewritten_slots, 3);
    assert_eq!(slots(&ctx.scene, a), vec![some(d1), some(d2)]);
    assert_eq!(slots(&ctx.scene, b), vec![some(d1)]);
    assert_eq!(slots(&ctx.scene, c), vec![some(d2), some(d2)]);

    assert_eq!(ctx.history.undo_count(), 1);
    assert_eq!(ctx.history.undo_descriptions().next(), Some(UNDO_LABEL));
}

#[test]
fn duplicates_are_independent_copies() {
    let (mut ctx, _) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    ctx.scene
        .add_component(root, MeshRenderer::new("crate.mesh").with_materials(vec![some(metal)]))
        .unwrap();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    let copy = report.cloned(metal).unwrap().duplicate;

    ctx.assets
        .set_property(copy, "roughness", MaterialValue::Float(0.95))
        .unwrap();
    assert_eq!(
        ctx.assets.material(metal).unwrap().property("roughness"),
        Some(&MaterialValue::Float(0.3))
    );
    assert_eq!(ctx.assets.material(copy).unwrap().parent, None);
}

#[test]
fn other_subtrees_keep_the_shared_material() {
    let (mut ctx, _) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let left = ctx.scene.spawn("Left");
    let right = ctx.scene.spawn("Right");
    let l = ctx
        .scene
        .add_component(left, MeshRenderer::new("l.mesh").with_materials(vec![some(metal)]))
        .unwrap();
    let r = ctx
        .scene
        .add_component(right, MeshRenderer::new("r.mesh").with_materials(vec![some(metal)]))
        .unwrap();

    let report = clone_materials(&mut ctx, Some(left), CloneMode::Duplicate);
    let copy = report.cloned(metal).unwrap().duplicate;

    assert_eq!(slots(&ctx.scene, l), vec![some(copy)]);
    assert_eq!(slots(&ctx.scene, r), vec![some(metal)]);
}

#[test]
fn inactive_descendants_are_unshared_too() {
    let (mut ctx, _) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Root");
    let hidden = ctx.scene.spawn_child(root, "Hidden").unwrap();
    ctx.scene.set_active(hidden, false).unwrap();
    let id = ctx
        .scene
        .add_component(hidden, MeshRenderer::new("h.mesh").with_materials(vec![some(metal)]))
        .unwrap();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    assert_eq!(report.cloned_count(), 1);
    assert_ne!(slots(&ctx.scene, id), vec![some(metal)]);
}

// ---------------------------------------------------------------------------
// No-op cases
// ---------------------------------------------------------------------------

#[test]
fn node_without_renderers_is_a_no_op() {
    let (mut ctx, mem) = memory_context();
    material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Lamp");
    ctx.scene.add_component(root, Light::default()).unwrap();
    let files_before = mem.file_count();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    assert_eq!(report.cloned_count(), 0);
    assert!(report.skipped.is_empty());
    assert_eq!(mem.file_count(), files_before);
    assert!(!ctx.history.can_undo());
}

#[test]
fn missing_root_is_a_no_op() {
    let (mut ctx, _) = memory_context();
    let report = clone_materials(&mut ctx, None, CloneMode::Duplicate);
    assert_eq!(report.cloned_count(), 0);
    assert!(!ctx.history.can_undo());
}

#[test]
fn transient_materials_are_left_alone() {
    let (mut ctx, mem) = memory_context();
    let instance = ctx.assets.register_transient(Material::new("Runtime Instance"));
    let root = ctx.scene.spawn("Crate");
    let id = ctx
        .scene
        .add_component(
            root,
            MeshRenderer::new("crate.mesh").with_materials(vec![some(instance), None]),
        )
        .unwrap();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    assert_eq!(report.cloned_count(), 0);
    assert_eq!(slots(&ctx.scene, id), vec![some(instance), None]);
    assert_eq!(mem.file_count(), 0);
}

// ---------------------------------------------------------------------------
// Per-material failures
// ---------------------------------------------------------------------------

#[test]
fn builtin_material_is_skipped_and_batch_continues() {
    let (mut ctx, _) = memory_context();
    let builtin = ctx.assets.register_builtin(Material::new("Default-Material"));
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    let id = ctx
        .scene
        .add_component(
            root,
            MeshRenderer::new("crate.mesh").with_materials(vec![some(builtin), some(metal)]),
        )
        .unwrap();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    assert_eq!(report.cloned_count(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].original, builtin);
    assert!(matches!(
        report.skipped[0].reason,
        CloneError::PathResolution { material } if material == builtin
    ));

    let copy = report.cloned(metal).unwrap().duplicate;
    assert_eq!(slots(&ctx.scene, id), vec![some(builtin), some(copy)]);
    assert_eq!(report.summary(), "Cloned 1 material, skipped 1");
}

#[test]
fn folder_creation_failure_skips_only_that_material() {
    let (mut ctx, mem) = memory_context();
    let blocked = material_at(&mut ctx, "assets/blocked/Metal.mat", 0.3);
    let fine = material_at(&mut ctx, "assets/fine/Wood.mat", 0.7);
    mem.insert("blocked/clone", b"not a folder".to_vec());

    let root = ctx.scene.spawn("Crate");
    ctx.scene
        .add_component(
            root,
            MeshRenderer::new("crate.mesh").with_materials(vec![some(blocked), some(fine)]),
        )
        .unwrap();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    assert_eq!(report.cloned_count(), 1);
    assert!(report.cloned(fine).is_some());
    assert!(matches!(
        report.skipped[0].reason,
        CloneError::FolderCreation { .. }
    ));
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

#[test]
fn existing_family_members_push_the_suffix() {
    let (mut ctx, mem) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    material_at(&mut ctx, "assets/mats/clone/Metal.mat", 0.3);
    material_at(&mut ctx, "assets/mats/clone/Metal 1.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    ctx.scene
        .add_component(root, MeshRenderer::new("crate.mesh").with_materials(vec![some(metal)]))
        .unwrap();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    assert_eq!(report.cloned[0].path, "assets/mats/clone/Metal 2.mat");
    assert_eq!(
        material_files(&mem, "mats/clone"),
        vec!["Metal", "Metal 1", "Metal 2"]
    );
}

#[test]
fn rerunning_never_reuses_a_name() {
    let (mut ctx, mem) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    let id = ctx
        .scene
        .add_component(root, MeshRenderer::new("crate.mesh").with_materials(vec![some(metal)]))
        .unwrap();

    let mut paths = Vec::new();
    for _ in 0..3 {
        let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
        assert_eq!(report.cloned_count(), 1);
        paths.push(report.cloned[0].path.clone());
    }

    // The second run duplicates the first duplicate, which already lives in
    // the clone folder, so no nested folder appears.
    assert_eq!(
        paths,
        vec![
            "assets/mats/clone/Metal.mat",
            "assets/mats/clone/Metal 1.mat",
            "assets/mats/clone/Metal 2.mat",
        ]
    );
    assert!(!mem.is_dir("mats/clone/clone").unwrap());
    assert_eq!(
        ctx.assets.storage_path(slots(&ctx.scene, id)[0].unwrap()).as_deref(),
        Some("assets/mats/clone/Metal 2.mat")
    );
    assert_eq!(ctx.history.undo_count(), 3);
}

// ---------------------------------------------------------------------------
// Undo / redo
// ---------------------------------------------------------------------------

#[test]
fn whole_batch_undoes_as_one_step() {
    let (mut ctx, mem) = memory_context();
    let m1 = material_at(&mut ctx, "assets/mats/M1.mat", 0.1);
    let m2 = material_at(&mut ctx, "assets/mats/M2.mat", 0.2);
    let root = ctx.scene.spawn("Root");
    let child = ctx.scene.spawn_child(root, "Child").unwrap();
    let a = ctx
        .scene
        .add_component(root, MeshRenderer::new("a.mesh").with_materials(vec![some(m1), some(m2)]))
        .unwrap();
    let b = ctx
        .scene
        .add_component(child, MeshRenderer::new("b.mesh").with_materials(vec![some(m2)]))
        .unwrap();

    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    let after_a = slots(&ctx.scene, a);
    let after_b = slots(&ctx.scene, b);

    ctx.undo().unwrap();
    assert_eq!(slots(&ctx.scene, a), vec![some(m1), some(m2)]);
    assert_eq!(slots(&ctx.scene, b), vec![some(m2)]);
    assert!(!ctx.history.can_undo());
    // Created files are not removed by undo.
    assert_eq!(material_files(&mem, "mats/clone").len(), report.cloned_count());

    ctx.redo().unwrap();
    assert_eq!(slots(&ctx.scene, a), after_a);
    assert_eq!(slots(&ctx.scene, b), after_b);
}

#[test]
fn rerun_after_undo_picks_fresh_names() {
    let (mut ctx, mem) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    ctx.scene
        .add_component(root, MeshRenderer::new("crate.mesh").with_materials(vec![some(metal)]))
        .unwrap();

    clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);
    ctx.undo().unwrap();
    let report = clone_materials(&mut ctx, Some(root), CloneMode::Duplicate);

    assert_eq!(report.cloned[0].path, "assets/mats/clone/Metal 1.mat");
    assert_eq!(material_files(&mem, "mats/clone"), vec!["Metal", "Metal 1"]);
}

// ---------------------------------------------------------------------------
// Variants and menu commands
// ---------------------------------------------------------------------------

#[test]
fn variant_command_derives_from_the_original() {
    let (mut ctx, _) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    let id = ctx
        .scene
        .add_component(root, MeshRenderer::new("crate.mesh").with_materials(vec![some(metal)]))
        .unwrap();
    ctx.selection.select(root);

    let report = ctx.dispatch(MenuAction::CreateMaterialVariants).unwrap();
    let variant = report.cloned(metal).unwrap().duplicate;
    assert_eq!(slots(&ctx.scene, id), vec![some(variant)]);

    let material = ctx.assets.material(variant).unwrap();
    assert_eq!(material.parent, Some(metal));
    assert_eq!(material.name, "Metal");
    assert_eq!(resolve_shader(&ctx.assets, variant), Some("pbr"));

    // Overrides stay local, unset keys follow the base.
    ctx.assets
        .set_property(variant, "roughness", MaterialValue::Float(0.8))
        .unwrap();
    ctx.assets
        .set_property(metal, "metallic", MaterialValue::Float(1.0))
        .unwrap();
    assert_eq!(
        resolve_property(&ctx.assets, variant, "roughness"),
        Some(&MaterialValue::Float(0.8))
    );
    assert_eq!(
        resolve_property(&ctx.assets, variant, "metallic"),
        Some(&MaterialValue::Float(1.0))
    );
    assert_eq!(
        resolve_property(&ctx.assets, metal, "roughness"),
        Some(&MaterialValue::Float(0.3))
    );
}

#[test]
fn disabled_menu_command_does_nothing() {
    let (mut ctx, mem) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    ctx.scene
        .add_component(root, MeshRenderer::new("crate.mesh").with_materials(vec![some(metal)]))
        .unwrap();
    let files_before = mem.file_count();

    for action in MenuAction::ALL {
        assert!(!action.is_enabled(&ctx));
        assert!(ctx.dispatch(action).is_none());
    }
    assert_eq!(mem.file_count(), files_before);
    assert!(!ctx.history.can_undo());
}

#[test]
fn clone_command_uses_selection() {
    let (mut ctx, _) = memory_context();
    let metal = material_at(&mut ctx, "assets/mats/Metal.mat", 0.3);
    let root = ctx.scene.spawn("Crate");
    let id = ctx
        .scene
        .add_component(root, MeshRenderer::new("crate.mesh").with_materials(vec![some(metal)]))
        .unwrap();
    ctx.selection.select(root);

    let report = ctx.dispatch(MenuAction::CloneMaterials).unwrap();
    assert_eq!(report.cloned_count(), 1);
    let copy = slots(&ctx.scene, id)[0].unwrap();
    assert!(!ctx.assets.material(copy).unwrap().is_variant());
    assert!(ctx.assets.is_persistent(copy));
}

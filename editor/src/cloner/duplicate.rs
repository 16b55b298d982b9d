//! Creating the duplicate asset of one source material.

use unshare_core::material::MaterialHandle;
use unshare_vfs::path;

use super::CloneMode;
use super::error::CloneError;
use super::naming::{allocate_name, base_name, same_name};
use crate::asset_database::{AssetError, AssetStore};
use crate::project::ClonerSettings;

/// Folder that receives duplicates of the material stored at `source_path`.
///
/// Duplicates go into a `reserved` subfolder next to the source. A source
/// that already lives in such a folder keeps its duplicates beside it, so
/// duplicating a duplicate never nests folders.
///
/// ```
/// use unshare_editor::cloner::destination_folder;
///
/// assert_eq!(destination_folder("Art/Mats/Metal.mat", "clone"), "Art/Mats/clone");
/// assert_eq!(destination_folder("Art/Mats/clone/Metal.mat", "clone"), "Art/Mats/clone");
/// ```
pub fn destination_folder(source_path: &str, reserved: &str) -> String {
    let folder = path::parent(source_path);
    if same_name(path::file_name(folder), reserved) {
        folder.to_owned()
    } else {
        path::join(folder, reserved)
    }
}

/// Duplicates `source` (or derives a variant of it) into its clone folder.
///
/// The new asset is named after the base name of `source`, with the lowest
/// suffix that is free in the destination folder. Returns the canonical
/// handle of the persisted asset, as loaded back from its path.
pub fn duplicate_material<S>(
    store: &mut S,
    source: MaterialHandle,
    mode: CloneMode,
    settings: &ClonerSettings,
) -> Result<MaterialHandle, CloneError>
where
    S: AssetStore + ?Sized,
{
    let source_path = store
        .storage_path(source)
        .ok_or(CloneError::PathResolution { material: source })?;
    let source_name = store
        .material(source)
        .ok_or(AssetError::UnknownMaterial(source))?
        .name
        .clone();

    let folder = destination_folder(&source_path, &settings.folder_name);
    if !store.folder_exists(&folder) {
        store
            .create_folder(path::parent(&folder), path::file_name(&folder))
            .map_err(|err| CloneError::FolderCreation {
                path: folder.clone(),
                source: err,
            })?;
    }

    let existing = store.find_material_names(&folder)?;
    let name = allocate_name(base_name(&source_name), &existing);

    let created = match mode {
        CloneMode::Duplicate => store.create_copy(source, &name)?,
        CloneMode::Variant => store.create_variant(source, &name)?,
    };
    let destination = path::join(
        &folder,
        &format!("{name}.{}", settings.material_extension),
    );
    if let Err(err) = store.persist_at(created, &destination) {
        store.discard(created);
        return Err(err.into());
    }

    let persisted = store.load_at(&destination)?;
    log::debug!("{source_path} -> {destination} ({mode:?})");
    Ok(persisted)
}

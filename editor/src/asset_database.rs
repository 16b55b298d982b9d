//! Material asset database backed by the virtual file system.
//!
//! The database hands out [`MaterialHandle`]s and remembers where each
//! material lives ([`AssetLocation`]). Material files are RON documents with
//! the configured extension; a material's name is always its file stem.
//!
//! The [`AssetStore`] trait is the part the cloner depends on, so the cloner
//! can run against any host that can answer these questions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unshare_core::material::{Material, MaterialHandle, MaterialLookup, MaterialValue};
use unshare_vfs::{Vfs, VfsError, path};

/// Errors raised by the asset database.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("unknown material {0}")]
    UnknownMaterial(MaterialHandle),
    #[error("{0} is already persisted")]
    AlreadyPersisted(MaterialHandle),
    #[error("asset already exists at {0}")]
    AlreadyExists(String),
    #[error("not a material file: {0}")]
    NotAMaterial(String),
    #[error("parent of {0} has no storage path")]
    UnpersistedParent(MaterialHandle),
    #[error("cyclic parent chain through {0}")]
    CyclicParent(String),
    #[error("failed to encode {path}: {message}")]
    Format { path: String, message: String },
    #[error(transparent)]
    Vfs(VfsError),
}

impl From<VfsError> for AssetError {
    fn from(err: VfsError) -> Self {
        match err {
            VfsError::AlreadyExists(path) => AssetError::AlreadyExists(path),
            other => AssetError::Vfs(other),
        }
    }
}

/// Where a material lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    /// Persisted in a file at this normalized VFS path.
    File(String),
    /// Persisted inside the host (embedded default material). It is an asset,
    /// but it has no path that a duplicate could be placed next to.
    Builtin,
    /// In-memory instance that was never saved.
    Transient,
}

impl AssetLocation {
    pub fn is_persistent(&self) -> bool {
        !matches!(self, AssetLocation::Transient)
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            AssetLocation::File(path) => Some(path),
            _ => None,
        }
    }
}

/// On-disk form of a material.
///
/// The name is not stored: it is the file stem. The parent of a variant is
/// stored as its asset path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shader: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, MaterialValue>,
}

impl MaterialDocument {
    pub fn to_ron(&self, path: &str) -> Result<String, AssetError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| {
            AssetError::Format {
                path: path.to_owned(),
                message: e.to_string(),
            }
        })
    }

    pub fn from_ron(path: &str, text: &str) -> Result<Self, AssetError> {
        ron::from_str(text).map_err(|e| AssetError::Format {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }
}

/// Host operations the material cloner needs.
///
/// Paths are VFS paths (`source/folder/Name.ext`). Folder arguments name a
/// directory, never a file.
pub trait AssetStore: MaterialLookup {
    /// Whether `handle` is a persisted asset (file-backed or builtin).
    fn is_persistent(&self, handle: MaterialHandle) -> bool;

    /// File path of a persisted material, or `None` if it has none.
    fn storage_path(&self, handle: MaterialHandle) -> Option<String>;

    fn folder_exists(&self, path: &str) -> bool;

    /// Creates `name` inside `parent` and returns the new folder's path.
    fn create_folder(&mut self, parent: &str, name: &str) -> Result<String, AssetError>;

    /// Names of the material assets directly inside `folder`.
    fn find_material_names(&self, folder: &str) -> Result<Vec<String>, AssetError>;

    /// Creates an unsaved, independent copy of `source` named `name`.
    fn create_copy(
        &mut self,
        source: MaterialHandle,
        name: &str,
    ) -> Result<MaterialHandle, AssetError>;

    /// Creates an unsaved variant of `base` named `name`, with no overrides.
    fn create_variant(
        &mut self,
        base: MaterialHandle,
        name: &str,
    ) -> Result<MaterialHandle, AssetError>;

    /// Saves an unsaved material at `path`. Never overwrites an existing file.
    fn persist_at(&mut self, handle: MaterialHandle, path: &str) -> Result<(), AssetError>;

    /// Canonical handle of the material stored at `path`, loading it if needed.
    fn load_at(&mut self, path: &str) -> Result<MaterialHandle, AssetError>;

    /// Forgets an unsaved material. Persisted materials are left alone.
    ///
    /// Returns `true` if `handle` was unsaved and has been removed.
    fn discard(&mut self, handle: MaterialHandle) -> bool;
}

struct AssetRecord {
    material: Material,
    location: AssetLocation,
}

/// [`AssetStore`] over a [`Vfs`].
///
/// # Example
///
/// ```
/// use unshare_core::material::{Material, MaterialValue};
/// use unshare_editor::asset_database::{AssetDatabase, AssetStore};
/// use unshare_vfs::{MemoryProvider, Vfs};
///
/// let mut vfs = Vfs::new();
/// vfs.mount("assets", MemoryProvider::new());
/// let mut db = AssetDatabase::new(vfs, "mat");
///
/// let steel = db
///     .create_material(
///         "assets/materials/Steel.mat",
///         Material::new("Steel").with_property("metallic", MaterialValue::Float(1.0)),
///     )
///     .unwrap();
/// assert_eq!(db.storage_path(steel).as_deref(), Some("assets/materials/Steel.mat"));
/// assert_eq!(db.load_at("assets/materials/Steel.mat").unwrap(), steel);
/// ```
pub struct AssetDatabase {
    vfs: Vfs,
    extension: String,
    records: HashMap<MaterialHandle, AssetRecord>,
    by_path: HashMap<String, MaterialHandle>,
    next_id: u64,
}

impl AssetDatabase {
    /// Creates an empty database. `extension` is the material file extension
    /// without the dot.
    pub fn new(vfs: Vfs, extension: impl Into<String>) -> Self {
        Self {
            vfs,
            extension: extension.into(),
            records: HashMap::new(),
            by_path: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Number of known materials, persisted or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn location(&self, handle: MaterialHandle) -> Option<&AssetLocation> {
        self.records.get(&handle).map(|r| &r.location)
    }

    /// Registers an in-memory material that is not an asset.
    pub fn register_transient(&mut self, material: Material) -> MaterialHandle {
        self.register(material, AssetLocation::Transient)
    }

    /// Registers an embedded material owned by the host.
    pub fn register_builtin(&mut self, material: Material) -> MaterialHandle {
        self.register(material, AssetLocation::Builtin)
    }

    /// Saves a new material file at `path` and returns its handle.
    pub fn create_material(
        &mut self,
        path: &str,
        material: Material,
    ) -> Result<MaterialHandle, AssetError> {
        let handle = self.register_transient(material);
        if let Err(err) = self.persist_at(handle, path) {
            self.discard(handle);
            return Err(err);
        }
        Ok(handle)
    }

    /// Loads every material file under `folder`, recursively.
    ///
    /// Files that fail to load are logged and skipped.
    pub fn import_folder(&mut self, folder: &str) -> Result<Vec<MaterialHandle>, AssetError> {
        let mut pending = vec![path::normalize(folder)?];
        let mut imported = Vec::new();
        while let Some(dir) = pending.pop() {
            for entry in self.vfs.list_dir(&dir)? {
                let child = path::join(&dir, &entry);
                if self.vfs.is_dir(&child)? {
                    pending.push(child);
                } else if self.is_material_path(&child) {
                    match self.load_at(&child) {
                        Ok(handle) => imported.push(handle),
                        Err(err) => log::warn!("Skipping {child}: {err}"),
                    }
                }
            }
        }
        log::info!("Imported {} materials from {folder}", imported.len());
        Ok(imported)
    }

    /// Sets a property on a material and saves the file if it has one.
    ///
    /// Returns the previous local value.
    pub fn set_property(
        &mut self,
        handle: MaterialHandle,
        key: &str,
        value: MaterialValue,
    ) -> Result<Option<MaterialValue>, AssetError> {
        let record = self
            .records
            .get_mut(&handle)
            .ok_or(AssetError::UnknownMaterial(handle))?;
        let previous = record.material.set_property(key, value);
        if let AssetLocation::File(file) = record.location.clone() {
            let text = self.document_for(handle)?.to_ron(&file)?;
            self.vfs.write(&file, text.into_bytes())?;
        }
        Ok(previous)
    }

    fn register(&mut self, material: Material, location: AssetLocation) -> MaterialHandle {
        let handle = MaterialHandle::from_raw(self.next_id);
        self.next_id += 1;
        if let AssetLocation::File(file) = &location {
            self.by_path.insert(file.clone(), handle);
        }
        self.records.insert(handle, AssetRecord { material, location });
        handle
    }

    fn is_material_path(&self, file: &str) -> bool {
        path::extension(file).is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn material_path(&self, raw: &str) -> Result<String, AssetError> {
        let normalized = path::normalize(raw)?;
        if !self.is_material_path(&normalized) {
            return Err(AssetError::NotAMaterial(normalized));
        }
        Ok(normalized)
    }

    fn document_for(&self, handle: MaterialHandle) -> Result<MaterialDocument, AssetError> {
        let material = self
            .material(handle)
            .ok_or(AssetError::UnknownMaterial(handle))?;
        let parent = match material.parent {
            Some(parent) => Some(
                self.storage_path(parent)
                    .ok_or(AssetError::UnpersistedParent(handle))?,
            ),
            None => None,
        };
        Ok(MaterialDocument {
            parent,
            shader: material.shader.clone(),
            properties: material.properties.clone(),
        })
    }

    fn load_chain(
        &mut self,
        file: String,
        loading: &mut Vec<String>,
    ) -> Result<MaterialHandle, AssetError> {
        if let Some(&handle) = self.by_path.get(&file) {
            return Ok(handle);
        }
        if loading.contains(&file) {
            return Err(AssetError::CyclicParent(file));
        }

        let bytes = self.vfs.read(&file)?;
        let text = String::from_utf8_lossy(&bytes);
        let document = MaterialDocument::from_ron(&file, &text)?;

        let parent = match document.parent {
            Some(parent_path) => {
                loading.push(file.clone());
                let parent_file = self.material_path(&parent_path)?;
                let parent = self.load_chain(parent_file, loading)?;
                loading.pop();
                Some(parent)
            }
            None => None,
        };

        let material = Material {
            name: path::file_stem(&file).to_owned(),
            shader: document.shader,
            properties: document.properties,
            parent,
        };
        log::debug!("Loaded material {file}");
        Ok(self.register(material, AssetLocation::File(file)))
    }
}

impl MaterialLookup for AssetDatabase {
    fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.records.get(&handle).map(|r| &r.material)
    }
}

impl AssetStore for AssetDatabase {
    fn is_persistent(&self, handle: MaterialHandle) -> bool {
        self.location(handle)
            .is_some_and(AssetLocation::is_persistent)
    }

    fn storage_path(&self, handle: MaterialHandle) -> Option<String> {
        self.location(handle)?.path().map(str::to_owned)
    }

    fn folder_exists(&self, path: &str) -> bool {
        self.vfs.is_dir(path).unwrap_or(false)
    }

    fn create_folder(&mut self, parent: &str, name: &str) -> Result<String, AssetError> {
        let folder = path::normalize(&path::join(parent, name))?;
        self.vfs.create_dir(&folder)?;
        log::info!("Created folder {folder}");
        Ok(folder)
    }

    fn find_material_names(&self, folder: &str) -> Result<Vec<String>, AssetError> {
        let folder = path::normalize(folder)?;
        let mut names = Vec::new();
        for entry in self.vfs.list_dir(&folder)? {
            let child = path::join(&folder, &entry);
            if self.is_material_path(&child) && !self.vfs.is_dir(&child)? {
                names.push(path::file_stem(&entry).to_owned());
            }
        }
        Ok(names)
    }

    fn create_copy(
        &mut self,
        source: MaterialHandle,
        name: &str,
    ) -> Result<MaterialHandle, AssetError> {
        let mut copy = self
            .material(source)
            .ok_or(AssetError::UnknownMaterial(source))?
            .clone();
        copy.name = name.to_owned();
        Ok(self.register_transient(copy))
    }

    fn create_variant(
        &mut self,
        base: MaterialHandle,
        name: &str,
    ) -> Result<MaterialHandle, AssetError> {
        if self.material(base).is_none() {
            return Err(AssetError::UnknownMaterial(base));
        }
        Ok(self.register_transient(Material::variant_of(base, name)))
    }

    fn persist_at(&mut self, handle: MaterialHandle, path: &str) -> Result<(), AssetError> {
        let file = self.material_path(path)?;
        match self.location(handle) {
            None => return Err(AssetError::UnknownMaterial(handle)),
            Some(AssetLocation::Transient) => {}
            Some(_) => return Err(AssetError::AlreadyPersisted(handle)),
        }

        let text = self.document_for(handle)?.to_ron(&file)?;
        self.vfs
            .write_new(&file, text.into_bytes())
            .map_err(|err| match err {
                VfsError::AlreadyExists(_) => AssetError::AlreadyExists(file.clone()),
                other => other.into(),
            })?;

        if let Some(record) = self.records.get_mut(&handle) {
            record.material.name = path::file_stem(&file).to_owned();
            record.location = AssetLocation::File(file.clone());
        }
        self.by_path.insert(file.clone(), handle);
        log::debug!("Saved {handle} at {file}");
        Ok(())
    }

    fn load_at(&mut self, path: &str) -> Result<MaterialHandle, AssetError> {
        let file = self.material_path(path)?;
        self.load_chain(file, &mut Vec::new())
    }

    fn discard(&mut self, handle: MaterialHandle) -> bool {
        if !matches!(self.location(handle), Some(AssetLocation::Transient)) {
            return false;
        }
        self.records.remove(&handle);
        log::debug!("Discarded unsaved {handle}");
        true
    }
}

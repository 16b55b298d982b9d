use std::collections::HashMap;

use crate::error::VfsError;
use crate::path;
use crate::provider::VfsProvider;

/// Virtual file system that routes paths to mounted providers.
///
/// Paths are structured as `"source_name/rest/of/path"`. The first path
/// segment selects the provider. If no source name matches, the default
/// source (if set) is tried with the full path.
///
/// # Example
///
/// ```
/// use unshare_vfs::{MemoryProvider, Vfs};
///
/// let assets = MemoryProvider::new();
/// assets.insert("materials/Steel.mat", b"()".to_vec());
///
/// let mut vfs = Vfs::new();
/// vfs.mount("assets", assets);
/// vfs.set_default("assets");
///
/// assert_eq!(vfs.read("assets/materials/Steel.mat").unwrap(), b"()");
/// assert_eq!(vfs.read("materials/Steel.mat").unwrap(), b"()");
/// ```
#[derive(Default)]
pub struct Vfs {
    sources: HashMap<String, Box<dyn VfsProvider>>,
    default_source: Option<String>,
}

impl Vfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a provider under the given source name.
    ///
    /// Replaces any previously mounted provider with the same name.
    pub fn mount(&mut self, name: impl Into<String>, provider: impl VfsProvider) {
        let name = name.into();
        log::debug!("Mounted VFS source \"{name}\"");
        self.sources.insert(name, Box::new(provider));
    }

    /// Set the default source name used when a path does not match any mount.
    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default_source = Some(name.into());
    }

    /// Whether a source with this name is mounted.
    pub fn has_source(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Read the entire contents of a file.
    pub fn read(&self, raw_path: &str) -> Result<Vec<u8>, VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.read(&path)
    }

    /// Whether a file or directory exists.
    pub fn exists(&self, raw_path: &str) -> Result<bool, VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.exists(&path)
    }

    /// Whether `raw_path` is an existing directory. A bare source name is
    /// the root directory of that source.
    pub fn is_dir(&self, raw_path: &str) -> Result<bool, VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.is_dir(&path)
    }

    /// List the immediate children of a directory.
    pub fn list_dir(&self, raw_path: &str) -> Result<Vec<String>, VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.list_dir(&path)
    }

    /// Write data to a file.
    ///
    /// Returns [`VfsError::ReadOnly`] if the resolved provider does not
    /// support writes.
    pub fn write(&self, raw_path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.write(&path, data)
    }

    /// Write a file that must not exist yet.
    pub fn write_new(&self, raw_path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.write_new(&path, data)
    }

    /// Create a directory and any missing parents.
    pub fn create_dir(&self, raw_path: &str) -> Result<(), VfsError> {
        let (provider, path) = self.resolve(raw_path)?;
        provider.create_dir(&path)
    }

    /// Resolve a raw path to a provider and the path within that provider.
    fn resolve(&self, raw_path: &str) -> Result<(&dyn VfsProvider, String), VfsError> {
        let normalized = path::normalize(raw_path)?;
        let (source, rest) = path::split_source(&normalized);

        if let Some(provider) = self.sources.get(source) {
            return Ok((provider.as_ref(), rest.to_owned()));
        }

        if let Some(default_name) = &self.default_source
            && let Some(provider) = self.sources.get(default_name)
        {
            return Ok((provider.as_ref(), normalized));
        }

        Err(VfsError::NoSuchSource(source.to_owned()))
    }
}

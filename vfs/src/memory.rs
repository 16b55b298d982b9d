use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::VfsError;
use crate::provider::VfsProvider;

#[derive(Default)]
struct MemoryTree {
    files: HashMap<String, Vec<u8>>,
    /// Directories created explicitly. Parents of files are implicit.
    dirs: BTreeSet<String>,
}

impl MemoryTree {
    fn is_dir(&self, path: &str) -> bool {
        if path.is_empty() || self.dirs.contains(path) {
            return true;
        }
        let prefix = format!("{path}/");
        self.files.keys().any(|key| key.starts_with(&prefix))
            || self.dirs.iter().any(|dir| dir.starts_with(&prefix))
    }
}

/// In-memory VFS provider for tests and embedded assets.
///
/// Thread-safe and mutable even after being mounted in a [`Vfs`](crate::Vfs):
/// clones share the same storage. Empty directories are kept once created,
/// so an editor can create a folder before writing into it.
///
/// # Example
///
/// ```
/// use unshare_vfs::{MemoryProvider, Vfs, VfsProvider};
///
/// let mem = MemoryProvider::new();
/// mem.insert("materials/Steel.mat", b"()".to_vec());
///
/// let mut vfs = Vfs::new();
/// vfs.mount("assets", mem.clone());
/// assert!(vfs.is_dir("assets/materials").unwrap());
/// assert!(mem.exists("materials/Steel.mat").unwrap());
/// ```
#[derive(Clone, Default)]
pub struct MemoryProvider {
    tree: Arc<RwLock<MemoryTree>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file at the given normalized path, overwriting any previous
    /// contents.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) {
        self.tree.write().files.insert(path.into(), data);
    }

    /// Number of stored files.
    pub fn file_count(&self) -> usize {
        self.tree.read().files.len()
    }
}

impl VfsProvider for MemoryProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        self.tree
            .read()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        let tree = self.tree.read();
        Ok(tree.files.contains_key(path) || tree.is_dir(path))
    }

    fn is_dir(&self, path: &str) -> Result<bool, VfsError> {
        Ok(self.tree.read().is_dir(path))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let tree = self.tree.read();
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut children = BTreeSet::new();
        for key in tree.files.keys().chain(tree.dirs.iter()) {
            if let Some(rest) = key.strip_prefix(&prefix) {
                let child = rest.split('/').next().unwrap_or_default();
                if !child.is_empty() {
                    children.insert(child.to_owned());
                }
            }
        }
        Ok(children.into_iter().collect())
    }

    fn write(&self, path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        self.insert(path, data);
        Ok(())
    }

    fn write_new(&self, path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        let mut tree = self.tree.write();
        if tree.files.contains_key(path) || tree.is_dir(path) {
            return Err(VfsError::AlreadyExists(path.to_owned()));
        }
        tree.files.insert(path.to_owned(), data);
        Ok(())
    }

    fn create_dir(&self, path: &str) -> Result<(), VfsError> {
        let mut tree = self.tree.write();
        if tree.files.contains_key(path) {
            return Err(VfsError::AlreadyExists(path.to_owned()));
        }
        tree.dirs.insert(path.to_owned());
        Ok(())
    }
}

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// File system VFS provider for reading and writing assets on disk.
///
/// The root path is joined with the VFS path to form the actual filesystem
/// path. All I/O is blocking `std::fs`.
///
/// Path traversal is prevented by the VFS path normalization which rejects
/// `..` segments before they reach the provider.
///
/// # Example
///
/// ```ignore
/// let mut vfs = Vfs::new();
/// vfs.mount("assets", FileSystemProvider::new("./assets"));
///
/// // Reads ./assets/materials/Steel.mat
/// let bytes = vfs.read("assets/materials/Steel.mat")?;
/// ```
pub struct FileSystemProvider {
    root: PathBuf,
}

impl FileSystemProvider {
    /// Create a provider rooted at the given directory.
    ///
    /// The directory does not need to exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }

    fn create_parent(full_path: &std::path::Path) -> Result<(), VfsError> {
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl VfsProvider for FileSystemProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        Ok(self.resolve(path).exists())
    }

    fn is_dir(&self, path: &str) -> Result<bool, VfsError> {
        Ok(self.resolve(path).is_dir())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let full_path = self.resolve(path);
        if !full_path.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(full_path)? {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => entries.push(name),
                Err(name) => log::warn!("Skipping non UTF-8 entry {name:?}"),
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn write(&self, path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        let full_path = self.resolve(path);
        Self::create_parent(&full_path)?;
        std::fs::write(full_path, data)?;
        Ok(())
    }

    fn write_new(&self, path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        let full_path = self.resolve(path);
        Self::create_parent(&full_path)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::AlreadyExists => VfsError::AlreadyExists(path.to_owned()),
                _ => VfsError::from(err),
            })?;
        file.write_all(&data)?;
        Ok(())
    }

    fn create_dir(&self, path: &str) -> Result<(), VfsError> {
        std::fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }
}
